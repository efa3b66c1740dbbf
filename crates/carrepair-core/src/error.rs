//! Unified Error Model
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarRepairError {
    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("STORAGE/{0}")]
    StorageError(String),

    #[error("SESSION/{0}")]
    SessionError(String),

    #[error("VALIDATION/{0}")]
    ValidationError(String),

    #[error("SERIALIZE/{0}")]
    SerializeError(String),
}

impl From<serde_json::Error> for CarRepairError {
    fn from(err: serde_json::Error) -> Self {
        CarRepairError::SerializeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CarRepairError {
    fn from(err: serde_yaml::Error) -> Self {
        CarRepairError::ConfigError(err.to_string())
    }
}
