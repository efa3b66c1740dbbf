//! Errors for the session layer

use carrepair_core::CarRepairError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Base64 decoding failed: {0}")]
    InvalidBase64(String),

    #[error("Storage operation on '{key}' failed: {message}")]
    Storage { key: String, message: String },

    #[error("Token rejected: {0}")]
    TokenRejected(String),

    #[error("JSON serialization failed: {0}")]
    Serialize(String),
}

impl SessionError {
    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        SessionError::Storage {
            key: key.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialize(err.to_string())
    }
}

impl From<SessionError> for CarRepairError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Storage { .. } => CarRepairError::StorageError(err.to_string()),
            SessionError::Serialize(msg) => CarRepairError::SerializeError(msg),
            other => CarRepairError::SessionError(other.to_string()),
        }
    }
}

/// Result type alias for session operations
pub type Result<T> = std::result::Result<T, SessionError>;
