//! Course API error types

use thiserror::Error;

/// Failures reported by a [`crate::client::CourseApi`] implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, timeout or server-side (5xx) failure; retrying may help
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The addressed course or coupon does not exist server-side
    #[error("{resource} not found: {id}")]
    NotFound { resource: String, id: String },

    /// The server refused the request (4xx other than 404)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Whether repeating the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Classify a non-success HTTP status
    ///
    /// `body` is the raw response body; a JSON `{"message": "..."}` envelope
    /// is unwrapped when present.
    pub fn from_status(status: u16, body: &str, resource: &str, id: &str) -> Self {
        let message = extract_message(body);
        match status {
            404 => Self::not_found(resource, id),
            400..=499 => Self::rejected(status, message),
            _ => Self::transport(format!("server returned {}: {}", status, message)),
        }
    }
}

fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "no details".to_string()
    } else {
        trimmed.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_not_found() {
        let err = ApiError::from_status(404, "", "course", "c-1");
        assert_eq!(err, ApiError::not_found("course", "c-1"));
        assert_eq!(err.to_string(), "course not found: c-1");
    }

    #[test]
    fn test_from_status_unwraps_json_message() {
        let err = ApiError::from_status(
            422,
            r#"{"message": "code already exists", "code": "VALIDATION_ERROR"}"#,
            "coupon",
            "x",
        );
        assert_eq!(err, ApiError::rejected(422, "code already exists"));
        assert!(!err.is_transient());
    }

    #[test]
    fn test_from_status_server_error_is_transient() {
        let err = ApiError::from_status(503, "  ", "course", "c-1");
        assert_eq!(
            err,
            ApiError::transport("server returned 503: no details")
        );
        assert!(err.is_transient());
    }

    #[test]
    fn test_from_status_plain_text_body() {
        let err = ApiError::from_status(400, "bad payload\n", "course", "c-1");
        assert_eq!(err, ApiError::rejected(400, "bad payload"));
    }
}
