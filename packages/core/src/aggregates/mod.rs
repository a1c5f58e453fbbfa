//! Curriculum Aggregates
//!
//! Pure functions deriving display figures from a curriculum snapshot. They
//! are recomputed from scratch on every call; trees are small enough that no
//! caching or incremental bookkeeping is needed.
//!
//! # Examples
//!
//! ```rust
//! use coursedesk_core::aggregates::{format_duration, CurriculumStats};
//! use coursedesk_core::models::Curriculum;
//!
//! let stats = CurriculumStats::of(&Curriculum::default());
//! assert_eq!(stats.total_lessons, 1);
//! assert_eq!(format_duration(125), "2h 5m");
//! ```

use crate::models::Curriculum;
use serde::{Deserialize, Serialize};

/// Sum of every lesson's duration, in minutes
pub fn total_duration(tree: &Curriculum) -> u64 {
    tree.sections().iter().map(|section| section.duration()).sum()
}

/// Number of lessons across all sections
pub fn total_lessons(tree: &Curriculum) -> usize {
    tree.sections()
        .iter()
        .map(|section| section.lessons.len())
        .sum()
}

/// Number of lessons viewable without enrollment
pub fn preview_lesson_count(tree: &Curriculum) -> usize {
    tree.sections()
        .iter()
        .map(|section| section.preview_count())
        .sum()
}

/// Render minutes as `"{h}h {m}m"` from one hour up, else `"{m}m"`
pub fn format_duration(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// All display figures for one snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumStats {
    pub sections: usize,
    pub total_lessons: usize,
    pub preview_lessons: usize,
    pub total_minutes: u64,
    pub formatted_duration: String,
}

impl CurriculumStats {
    pub fn of(tree: &Curriculum) -> Self {
        let total_minutes = total_duration(tree);
        Self {
            sections: tree.section_count(),
            total_lessons: total_lessons(tree),
            preview_lessons: preview_lesson_count(tree),
            total_minutes,
            formatted_duration: format_duration(total_minutes),
        }
    }
}

impl std::fmt::Display for CurriculumStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} sections, {} lessons ({} preview), {}",
            self.sections, self.total_lessons, self.preview_lessons, self.formatted_duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LessonNode, SectionNode};

    fn sample() -> Curriculum {
        Curriculum::from_sections(vec![
            SectionNode::new("One", 0).with_lessons(vec![
                LessonNode::new("a", 0).with_duration(30).with_preview(true),
                LessonNode::new("b", 1).with_duration(45),
            ]),
            SectionNode::new("Two", 1),
            SectionNode::new("Three", 2).with_lessons(vec![
                LessonNode::new("c", 0).with_duration(50).with_preview(true)
            ]),
        ])
    }

    #[test]
    fn test_format_duration_boundaries() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "59m");
        assert_eq!(format_duration(60), "1h 0m");
        assert_eq!(format_duration(125), "2h 5m");
        assert_eq!(format_duration(600), "10h 0m");
    }

    #[test]
    fn test_totals() {
        let tree = sample();
        assert_eq!(total_duration(&tree), 125);
        assert_eq!(total_lessons(&tree), 3);
        assert_eq!(preview_lesson_count(&tree), 2);
    }

    #[test]
    fn test_stats_and_display() {
        let stats = CurriculumStats::of(&sample());
        assert_eq!(stats.sections, 3);
        assert_eq!(stats.formatted_duration, "2h 5m");
        assert_eq!(
            stats.to_string(),
            "3 sections, 3 lessons (2 preview), 2h 5m"
        );
    }

    #[test]
    fn test_default_curriculum_stats() {
        let stats = CurriculumStats::of(&Curriculum::default());
        assert_eq!(stats.total_minutes, 0);
        assert_eq!(stats.formatted_duration, "0m");
        assert_eq!(stats.preview_lessons, 0);
    }

    #[test]
    fn test_totals_past_u32_range() {
        let tree = Curriculum::from_sections(vec![
            SectionNode::new("One", 0)
                .with_lessons(vec![LessonNode::new("a", 0).with_duration(u32::MAX)]),
            SectionNode::new("Two", 1).with_lessons(vec![
                LessonNode::new("b", 0).with_duration(u32::MAX),
                LessonNode::new("c", 1).with_duration(1),
            ]),
        ]);

        let expected = 2 * u64::from(u32::MAX) + 1;
        assert_eq!(total_duration(&tree), expected);

        let stats = CurriculumStats::of(&tree);
        assert_eq!(stats.total_minutes, expected);
        assert_eq!(
            stats.formatted_duration,
            format!("{}h {}m", expected / 60, expected % 60)
        );
    }
}
