//! Editor error types

use crate::client::ApiError;
use crate::models::ValidationError;
use crate::operations::CurriculumError;
use thiserror::Error;

/// Everything a [`super::CurriculumEditor`] call can fail with
///
/// None of these leave the curriculum half-modified: a rejected edit or a
/// failed save keeps the previous snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The action was rejected by the curriculum rules
    #[error(transparent)]
    Validation(#[from] CurriculumError),

    /// The curriculum is not complete enough to save
    #[error(transparent)]
    Incomplete(#[from] ValidationError),

    /// Fetch or save did not complete; saving again may succeed
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A save is in flight; edits and further saves are refused
    #[error("A save is in progress")]
    Busy,

    /// A save result arrived while the editor was idle
    #[error("No save is in progress")]
    NoSaveInProgress,

    #[error("Editor has been closed")]
    Closed,
}

impl EditorError {
    /// Whether retrying the save could help without further edits
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<ApiError> for EditorError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Transport(msg) => Self::Transport(msg),
            ApiError::Decode(msg) => Self::Transport(format!("unreadable response: {}", msg)),
            ApiError::NotFound { resource, id } => Self::NotFound { resource, id },
            ApiError::Rejected { status, message } => Self::Rejected { status, message },
        }
    }
}
