//! Section Data Structures
//!
//! A `SectionNode` groups lessons under a title. Lesson `order` values inside a
//! section always mirror their position in `lessons`; the operations layer
//! calls [`SectionNode::renumber_lessons`] after any change to the sequence.

use crate::models::LessonNode;
use serde::{Deserialize, Serialize};

/// Title given to the section seeded into a brand new course
pub const DEFAULT_SECTION_TITLE: &str = "Introduction";

/// Ordered group of lessons with section metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    pub title: String,

    /// Optional free text, empty when unset
    #[serde(default)]
    pub description: String,

    /// Position in the curriculum
    #[serde(default)]
    pub order: usize,

    #[serde(default)]
    pub lessons: Vec<LessonNode>,
}

impl SectionNode {
    /// Create an empty section
    pub fn new(title: impl Into<String>, order: usize) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            order,
            lessons: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Replace the lesson list, renumbering lesson orders by position
    pub fn with_lessons(mut self, lessons: Vec<LessonNode>) -> Self {
        self.lessons = lessons;
        self.renumber_lessons();
        self
    }

    pub fn lesson(&self, index: usize) -> Option<&LessonNode> {
        self.lessons.get(index)
    }

    /// Total minutes across this section's lessons
    pub fn duration(&self) -> u64 {
        self.lessons
            .iter()
            .map(|lesson| u64::from(lesson.duration))
            .sum()
    }

    /// Number of lessons flagged as free previews
    pub fn preview_count(&self) -> usize {
        self.lessons.iter().filter(|lesson| lesson.is_preview).count()
    }

    /// Reassign lesson orders densely as `0..n-1` in sequence order
    pub(crate) fn renumber_lessons(&mut self) {
        for (index, lesson) in self.lessons.iter_mut().enumerate() {
            lesson.order = index;
        }
    }

    /// Stable sort by stored order, then renumber
    ///
    /// Used when hydrating server data that may carry gaps or duplicates.
    pub(crate) fn normalize_lessons(&mut self) {
        self.lessons.sort_by_key(|lesson| lesson.order);
        self.renumber_lessons();
    }
}
