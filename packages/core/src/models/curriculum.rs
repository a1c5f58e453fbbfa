//! Curriculum Tree
//!
//! The root aggregate edited as one unit and persisted atomically.
//!
//! # Invariants
//!
//! - Section `order` values are exactly `0..n-1`, matching position
//! - Each section's lesson `order` values are exactly `0..m-1`, matching position
//! - There is always at least one section
//!
//! The section list is private: a `Curriculum` can only be built through
//! [`Curriculum::from_sections`] (which normalizes) or returned by the
//! operations in [`crate::operations`], so every value in circulation holds the
//! invariants above.
//!
//! # Index Validity
//!
//! Sections and lessons are addressed by position. Any index read from one
//! snapshot is only meaningful against that snapshot: a delete or move shifts
//! every later position.
//!
//! # Examples
//!
//! ```rust
//! use coursedesk_core::models::{Curriculum, LessonNode, SectionNode};
//!
//! // Server data with gaps in the ordering is renumbered on hydration
//! let curriculum = Curriculum::from_sections(vec![
//!     SectionNode::new("Advanced", 10),
//!     SectionNode::new("Basics", 3).with_lessons(vec![LessonNode::new("Hello", 0)]),
//! ]);
//!
//! assert_eq!(curriculum.sections()[0].title, "Basics");
//! assert_eq!(curriculum.sections()[1].order, 1);
//! assert!(curriculum.is_densely_ordered());
//! ```

use crate::models::{
    CurriculumIssue, LessonNode, SectionNode, ValidationError, DEFAULT_SECTION_TITLE,
};
use serde::{Deserialize, Serialize};

/// Ordered, never-empty sequence of sections
///
/// Serializes as a plain JSON array of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SectionNode>", into = "Vec<SectionNode>")]
pub struct Curriculum {
    sections: Vec<SectionNode>,
}

impl Default for Curriculum {
    /// One "Introduction" section holding the welcome video lesson
    fn default() -> Self {
        Self {
            sections: vec![SectionNode::new(DEFAULT_SECTION_TITLE, 0)
                .with_lessons(vec![LessonNode::welcome()])],
        }
    }
}

impl Curriculum {
    /// Build a curriculum from stored sections
    ///
    /// Sections and lessons are stably sorted by their stored `order` and then
    /// renumbered densely. An empty list yields [`Curriculum::default`].
    pub fn from_sections(mut sections: Vec<SectionNode>) -> Self {
        if sections.is_empty() {
            return Self::default();
        }

        sections.sort_by_key(|section| section.order);
        for section in &mut sections {
            section.normalize_lessons();
        }
        Self::renumbered(sections)
    }

    /// Wrap an edited section list, renumbering by current position
    ///
    /// Callers must guarantee the list is non-empty.
    pub(crate) fn renumbered(mut sections: Vec<SectionNode>) -> Self {
        debug_assert!(!sections.is_empty(), "curriculum must keep one section");
        for (index, section) in sections.iter_mut().enumerate() {
            section.order = index;
            section.renumber_lessons();
        }
        Self { sections }
    }

    pub fn sections(&self) -> &[SectionNode] {
        &self.sections
    }

    pub fn section(&self, index: usize) -> Option<&SectionNode> {
        self.sections.get(index)
    }

    pub fn lesson(&self, section_index: usize, lesson_index: usize) -> Option<&LessonNode> {
        self.section(section_index)
            .and_then(|section| section.lesson(lesson_index))
    }

    /// Number of sections (always at least one)
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn into_sections(self) -> Vec<SectionNode> {
        self.sections
    }

    /// Check that every order value matches its position at both levels
    pub fn is_densely_ordered(&self) -> bool {
        self.sections.iter().enumerate().all(|(index, section)| {
            section.order == index
                && section
                    .lessons
                    .iter()
                    .enumerate()
                    .all(|(lesson_index, lesson)| lesson.order == lesson_index)
        })
    }

    /// List every problem that would make the server reject this curriculum
    pub fn issues(&self) -> Vec<CurriculumIssue> {
        let mut issues = Vec::new();
        for (section_index, section) in self.sections.iter().enumerate() {
            if section.title.trim().is_empty() {
                issues.push(CurriculumIssue::EmptySectionTitle {
                    section: section_index,
                });
            }
            for (lesson_index, lesson) in section.lessons.iter().enumerate() {
                if lesson.title.trim().is_empty() {
                    issues.push(CurriculumIssue::EmptyLessonTitle {
                        section: section_index,
                        lesson: lesson_index,
                    });
                }
            }
        }
        issues
    }

    /// Fail with every issue found, or succeed when the tree is saveable
    pub fn validate(&self) -> Result<(), ValidationError> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Curriculum(issues))
        }
    }
}

impl From<Vec<SectionNode>> for Curriculum {
    fn from(sections: Vec<SectionNode>) -> Self {
        Self::from_sections(sections)
    }
}

impl From<Curriculum> for Vec<SectionNode> {
    fn from(curriculum: Curriculum) -> Self {
        curriculum.sections
    }
}
