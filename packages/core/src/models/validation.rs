//! Client-side validation errors
//!
//! The server remains the authority on every business rule; these checks only
//! catch input that would certainly be rejected, before a request is sent.

use thiserror::Error;

/// A problem found in a curriculum that blocks saving it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurriculumIssue {
    EmptySectionTitle { section: usize },
    EmptyLessonTitle { section: usize, lesson: usize },
}

impl std::fmt::Display for CurriculumIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySectionTitle { section } => {
                write!(f, "section {} has an empty title", section + 1)
            }
            Self::EmptyLessonTitle { section, lesson } => write!(
                f,
                "lesson {} in section {} has an empty title",
                lesson + 1,
                section + 1
            ),
        }
    }
}

fn join_issues(issues: &[CurriculumIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validation errors for course, coupon and curriculum input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    OutOfRange { field: String, reason: String },

    #[error("Invalid validity window: {0}")]
    InvalidWindow(String),

    #[error("Curriculum cannot be saved: {}", join_issues(.0))]
    Curriculum(Vec<CurriculumIssue>),
}

impl ValidationError {
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_window(msg: impl Into<String>) -> Self {
        Self::InvalidWindow(msg.into())
    }
}
