//! Security-related error types

use thiserror::Error;

/// Security operation errors
#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("Encryption error: {message}")]
    Encryption { message: String },

    #[error("Invalid salt: {message}")]
    InvalidSalt { message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
