//! Per-section expand/collapse flags
//!
//! Flags are keyed by section position, not identity: after a move or a
//! delete the flag stays with the position. Only flags that point past the
//! end of the curriculum are dropped.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    flags: BTreeMap<usize, bool>,
}

impl ExpansionState {
    /// First section expanded, everything else collapsed
    pub fn initial() -> Self {
        let mut flags = BTreeMap::new();
        flags.insert(0, true);
        Self { flags }
    }

    pub fn is_expanded(&self, section: usize) -> bool {
        self.flags.get(&section).copied().unwrap_or(false)
    }

    /// Flip one flag and return its new value
    pub fn toggle(&mut self, section: usize) -> bool {
        let flag = self.flags.entry(section).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Forget flags for positions `>= len`
    pub fn retain_within(&mut self, len: usize) {
        self.flags.retain(|&section, _| section < len);
    }

    /// Positions currently expanded, ascending
    pub fn expanded(&self) -> Vec<usize> {
        self.flags
            .iter()
            .filter(|(_, &expanded)| expanded)
            .map(|(&section, _)| section)
            .collect()
    }
}
