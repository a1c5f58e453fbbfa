//! Error types for curriculum mutations
//!
//! Every variant describes a rejected mutation. A rejected mutation never
//! produces a new tree, so the caller's snapshot stays exactly as it was.

use thiserror::Error;

/// Errors that can occur while mutating a curriculum
///
/// # Examples
///
/// ```rust
/// use coursedesk_core::operations::CurriculumError;
///
/// let err = CurriculumError::section_not_found(4, 2);
/// assert_eq!(err.to_string(), "Section 4 does not exist (curriculum has 2 sections)");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CurriculumError {
    /// Deleting the only remaining section
    #[error("A curriculum must keep at least one section")]
    MinimumSectionViolation,

    /// A delete was requested without the caller confirming it
    #[error("Deleting {target} requires confirmation")]
    DeletionNotConfirmed { target: String },

    /// Section index outside the current snapshot
    #[error("Section {index} does not exist (curriculum has {len} sections)")]
    SectionNotFound { index: usize, len: usize },

    /// Lesson index outside the addressed section
    #[error("Lesson {lesson} does not exist in section {section} (section has {len} lessons)")]
    LessonNotFound {
        section: usize,
        lesson: usize,
        len: usize,
    },
}

impl CurriculumError {
    pub fn deletion_not_confirmed(target: impl Into<String>) -> Self {
        Self::DeletionNotConfirmed {
            target: target.into(),
        }
    }

    pub fn section_not_found(index: usize, len: usize) -> Self {
        Self::SectionNotFound { index, len }
    }

    pub fn lesson_not_found(section: usize, lesson: usize, len: usize) -> Self {
        Self::LessonNotFound {
            section,
            lesson,
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_section_violation_message() {
        assert_eq!(
            CurriculumError::MinimumSectionViolation.to_string(),
            "A curriculum must keep at least one section"
        );
    }

    #[test]
    fn test_deletion_not_confirmed_error() {
        let err = CurriculumError::deletion_not_confirmed("section 2");
        assert!(matches!(err, CurriculumError::DeletionNotConfirmed { .. }));
        assert_eq!(err.to_string(), "Deleting section 2 requires confirmation");
    }

    #[test]
    fn test_lesson_not_found_error() {
        let err = CurriculumError::lesson_not_found(1, 5, 3);
        assert_eq!(
            err.to_string(),
            "Lesson 5 does not exist in section 1 (section has 3 lessons)"
        );
    }
}
