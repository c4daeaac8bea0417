//! Error types for the library admin console

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Invalid form state: {0}")]
    InvalidState(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned by the backend on non-2xx replies
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AppError {
    /// Build an error from a non-success backend reply.
    ///
    /// The backend puts a human readable `message` in most error bodies; when it
    /// is missing the raw body (or the status reason) is used instead.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let parsed: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
        let message = parsed
            .message
            .or(parsed.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                } else {
                    body.trim().to_string()
                }
            });

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Authentication(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            StatusCode::CONFLICT => AppError::Conflict(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AppError::BadRequest(message)
            }
            _ => AppError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Process exit code used by the command-line front end
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => 2,
            AppError::Authentication(_) => 3,
            AppError::NotFound(_) => 4,
            AppError::Conflict(_) => 5,
            AppError::Config(_) => 78,
            _ => 1,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_uses_backend_message() {
        let err = AppError::from_status(StatusCode::NOT_FOUND, r#"{"message":"Book not found"}"#);
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Book not found"));

        let err = AppError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"Sai mật khẩu"}"#);
        assert!(matches!(err, AppError::Authentication(ref m) if m == "Sai mật khẩu"));
    }

    #[test]
    fn test_status_mapping_falls_back_to_body_or_reason() {
        let err = AppError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        match err {
            AppError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let err = AppError::from_status(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(err, AppError::Api { status: 502, ref message } if message == "upstream down"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Validation("x".into()).exit_code(), 2);
        assert_eq!(AppError::Authentication("x".into()).exit_code(), 3);
        assert_eq!(AppError::SubmissionInProgress.exit_code(), 1);
    }
}
