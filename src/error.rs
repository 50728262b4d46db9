//! Error types for the grading client

use thiserror::Error;

/// Errors raised while editing a session or talking to the grading service
#[derive(Debug, Error)]
pub enum GraderError {
    /// Submission preconditions not met; no request is sent
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Key point index {index} out of bounds (have {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// The grading service could not be reached
    #[error("Transport error: {0}")]
    Transport(String),

    /// The grading service answered with a non-success status
    #[error("Service error (status {status}): {message}")]
    Service { status: u16, message: String },

    /// A success response that does not carry the expected result shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GraderError {
    /// Message shown to the user when a grading call fails.
    ///
    /// Prefers the server-supplied message; a malformed success response is
    /// reported the same way as a service error without a message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service { message, .. } => message.clone(),
            Self::MalformedResponse(_) => UNKNOWN_ERROR.to_string(),
            other => other.to_string(),
        }
    }
}

/// Fallback when the server does not say what went wrong
pub const UNKNOWN_ERROR: &str = "Unknown error";

pub type Result<T> = std::result::Result<T, GraderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_prefers_server_message() {
        let err = GraderError::Service {
            status: 400,
            message: "Essay text is required".to_string(),
        };
        assert_eq!(err.user_message(), "Essay text is required");
    }

    #[test]
    fn test_malformed_response_is_generic() {
        let err = GraderError::MalformedResponse("missing results".to_string());
        assert_eq!(err.user_message(), UNKNOWN_ERROR);
    }

    #[test]
    fn test_transport_message_uses_display() {
        let err = GraderError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "Transport error: connection refused");
    }
}
