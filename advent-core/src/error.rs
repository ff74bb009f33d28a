//! Error types for the advent calendar core.

use thiserror::Error;

/// Errors that can occur in advent calendar operations.
#[derive(Error, Debug)]
pub enum AdventError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid calendar items: {0}")]
    InvalidItems(String),
}

/// Result type alias for advent calendar operations.
pub type AdventResult<T> = Result<T, AdventError>;
