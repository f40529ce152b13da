//! # StoryForge Security
//!
//! Password-based encryption for credentials stored on project records.
//!
//! This crate provides:
//! - [`CredentialCipher`]: PBKDF2-HMAC-SHA512 key derivation with AES-256-GCM
//! - [`SealedCredentials`]: work-tracker credentials sealed under a user password

pub mod cipher;
pub mod credentials;
pub mod error;

pub use cipher::{CredentialCipher, EncryptedPayload};
pub use credentials::{SealedCredentials, WorkTrackerCredentials};
pub use error::SecurityError;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, SecurityError>;
