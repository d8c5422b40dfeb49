//! Error handling for the Stock Admin client
//!
//! Every failure reaches the user as one free-text notification, whether it
//! comes from the network, the backend or local validation.

use serde_json::Value;
use shared::{BasketError, LineItemError};
use thiserror::Error;

/// Client error types
#[derive(Error, Debug)]
pub enum ClientError {
    // Transport errors
    #[error("Network error: {0}")]
    Transport(String),

    // Backend errors
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),

    // Client-side validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Basket(#[from] BasketError),

    // Session errors
    #[error("Not logged in")]
    Unauthenticated,

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),
}

impl ClientError {
    /// Text shown in the blocking notification
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(msg) => format!("Unable to reach the server: {}", msg),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Decode(_) => "The server sent an unexpected response".to_string(),
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Basket(err) => err.to_string(),
            ClientError::Unauthenticated => "Please log in again".to_string(),
            ClientError::Configuration(err) => format!("Configuration error: {}", err),
        }
    }

    /// Whether the error was raised before anything was sent
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            ClientError::Validation(_) | ClientError::Basket(_) | ClientError::Unauthenticated
        )
    }

    /// Build an API error from a non-2xx status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        ClientError::Api {
            status,
            message: extract_error_message(status, body),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<validator::ValidationErrors> for ClientError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ClientError::Validation(errors.to_string())
    }
}

impl From<LineItemError> for ClientError {
    fn from(err: LineItemError) -> Self {
        ClientError::Basket(BasketError::InvalidLine(err))
    }
}

/// Pull a readable message out of an error body.
///
/// The backend answers `{"message": "..."}`, `{"message": {"message": "..."}}`
/// or `{"error": "..."}`; anything else falls back to the raw text, then to
/// the status code.
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let candidates = [
            value.pointer("/message/message"),
            value.get("message"),
            value.get("error"),
        ];
        for candidate in candidates.into_iter().flatten() {
            if let Some(text) = candidate.as_str().filter(|s| !s.trim().is_empty()) {
                return text.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') && !trimmed.starts_with('[') {
        return trimmed.to_string();
    }

    format!("Request failed with status {}", status)
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
