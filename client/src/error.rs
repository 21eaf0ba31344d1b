//! Error handling for the Pharmacy Stock client
//!
//! Client-detected problems block an action before any request is sent;
//! everything else comes back from the transport or the backend. Nothing is
//! retried and no error is fatal to the application.

use reqwest::StatusCode;
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Client-side checks
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    // Backend responses
    #[error("Backend error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    // Transport
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    // Local environment
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::Validation(message.into())
    }

    /// Text to show the user: the backend's own message when it sent one,
    /// otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Backend {
                message: Some(msg), ..
            } => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::SubmissionInProgress
        )
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Backend { status, .. } => Some(*status),
            ClientError::Network(e) => e.status(),
            _ => None,
        }
    }
}

impl From<&'static str> for ClientError {
    fn from(message: &'static str) -> Self {
        ClientError::Validation(message.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Pull a human-readable message out of an error response body
///
/// The backend answers either `{"message": "..."}`, a bare JSON string, or
/// plain text.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(text)) => Some(text),
        Ok(serde_json::Value::Object(map)) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        Ok(_) => None,
        Err(_) => Some(trimmed.to_string()),
    }
}
