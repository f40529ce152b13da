//! Error types for the activity log crate

use thiserror::Error;

/// Result type for activity logging operations
pub type ActivityLogResult<T> = Result<T, ActivityLogError>;

/// Errors that can occur in activity logging operations
#[derive(Error, Debug)]
pub enum ActivityLogError {
    #[error("Configuration error: {field} - {message}")]
    ConfigError { field: String, message: String },

    #[error("Unknown activity type: {0}")]
    UnknownType(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}
