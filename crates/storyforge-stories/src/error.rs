//! Error types for story generation

use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors surfaced by the generation pipeline.
///
/// Parsing and organizing never fail; only the model call can.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The completion client failed
    #[error("Completion failed for model {model}: {message}")]
    Completion {
        /// Model that was asked
        model: String,
        /// Client-reported failure
        message: String,
    },

    /// The requirement text was empty
    #[error("Requirement text is required")]
    EmptyRequirement,
}
