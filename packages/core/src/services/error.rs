//! Service Layer Error Types

use crate::client::ApiError;
use crate::models::ValidationError;
use thiserror::Error;

/// Errors from the course and coupon services
///
/// `Validation` is raised before any request is sent; `Api` carries the
/// remote failure unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Course API request failed: {0}")]
    Api(#[from] ApiError),
}

impl ServiceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api(ApiError::NotFound { .. }))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
