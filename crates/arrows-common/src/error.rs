//! Error types for shared configuration and unit handling.

use thiserror::Error;

/// Result type alias using ArrowsError.
pub type ArrowsResult<T> = Result<T, ArrowsError>;

/// Primary error type for shared arrow types.
#[derive(Debug, Error)]
pub enum ArrowsError {
    #[error("Unknown wind unit: {0}")]
    UnknownUnit(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    #[error("Failed to read style: {0}")]
    IoError(String),

    #[error("Failed to parse style: {0}")]
    ParseError(String),
}

impl From<std::io::Error> for ArrowsError {
    fn from(err: std::io::Error) -> Self {
        ArrowsError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ArrowsError {
    fn from(err: serde_json::Error) -> Self {
        ArrowsError::ParseError(format!("JSON error: {}", err))
    }
}
