//! Password-based credential encryption
//!
//! Keys are derived with PBKDF2-HMAC-SHA512 (100 000 rounds) from the user's
//! password and a 16-byte salt, then used for AES-256-GCM with a fresh 16-byte IV
//! per call. The serialized blob is `hex(iv):hex(ciphertext):hex(tag)`; the salt
//! travels separately as hex.

use aes_gcm::{
    aead::{Aead, KeyInit},
    aes::Aes256,
    AesGcm, Nonce,
};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use tracing::debug;
use typenum::U16;
use zeroize::Zeroizing;

use crate::{Result, SecurityError};

/// PBKDF2 iteration count
pub const ITERATIONS: u32 = 100_000;
/// Derived key length in bytes
pub const KEY_LENGTH: usize = 32;
/// IV length in bytes
pub const IV_LENGTH: usize = 16;
/// Generated salt length in bytes
pub const SALT_LENGTH: usize = 16;
/// GCM tag length in bytes
pub const TAG_LENGTH: usize = 16;
/// Separator between the blob's hex segments
pub const DELIMITER: char = ':';

/// AES-256-GCM with a 16-byte nonce
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Encrypted blob plus the salt needed to re-derive its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptedPayload {
    /// `iv:ciphertext:tag`, each segment hex
    pub encrypted_data: String,
    /// Hex-encoded salt
    pub salt: String,
}

/// Symmetric authenticated encryption under a user password
pub struct CredentialCipher;

impl CredentialCipher {
    /// Encrypt `plaintext` under `password`.
    ///
    /// A random 16-byte salt is generated when `salt` is `None`. An empty salt is a
    /// caller bug and is rejected.
    pub fn encrypt(plaintext: &str, password: &str, salt: Option<&[u8]>) -> Result<EncryptedPayload> {
        let salt = match salt {
            Some([]) => {
                return Err(SecurityError::InvalidSalt {
                    message: "salt must not be empty".to_string(),
                })
            }
            Some(salt) => salt.to_vec(),
            None => Self::generate_salt().to_vec(),
        };

        let key = Self::derive_key(password, &salt);
        let cipher = Aes256Gcm16::new_from_slice(&key[..]).map_err(|e| SecurityError::Encryption {
            message: e.to_string(),
        })?;

        let iv = Self::generate_iv();
        let mut sealed = cipher
            .encrypt(Nonce::<U16>::from_slice(&iv), plaintext.as_bytes())
            .map_err(|e| SecurityError::Encryption {
                message: e.to_string(),
            })?;
        let tag = sealed.split_off(sealed.len() - TAG_LENGTH);

        Ok(EncryptedPayload {
            encrypted_data: format!(
                "{}{DELIMITER}{}{DELIMITER}{}",
                hex::encode(iv),
                hex::encode(&sealed),
                hex::encode(&tag)
            ),
            salt: hex::encode(&salt),
        })
    }

    /// Encrypt reusing a hex-encoded salt, e.g. one already stored on a project
    pub fn encrypt_with_salt_hex(
        plaintext: &str,
        password: &str,
        salt_hex: &str,
    ) -> Result<EncryptedPayload> {
        let salt = hex::decode(salt_hex).map_err(|e| SecurityError::InvalidSalt {
            message: e.to_string(),
        })?;
        Self::encrypt(plaintext, password, Some(&salt))
    }

    /// Decrypt a blob produced by [`CredentialCipher::encrypt`].
    ///
    /// Returns `None` for a malformed blob, bad hex, a wrong password, tampered
    /// data, or non-UTF-8 plaintext. The cause is not reported.
    pub fn decrypt(encrypted_data: &str, password: &str, salt_hex: &str) -> Option<String> {
        let plaintext = Self::open(encrypted_data, password, salt_hex);
        if plaintext.is_none() {
            debug!("Credential decryption failed");
        }
        plaintext
    }

    /// Whether `password` decrypts the blob
    pub fn validate_password(encrypted_data: &str, password: &str, salt_hex: &str) -> bool {
        Self::decrypt(encrypted_data, password, salt_hex).is_some()
    }

    fn open(encrypted_data: &str, password: &str, salt_hex: &str) -> Option<String> {
        let mut segments = encrypted_data.split(DELIMITER);
        let (iv_hex, ciphertext_hex, tag_hex) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }

        let iv = hex::decode(iv_hex).ok()?;
        let mut sealed = hex::decode(ciphertext_hex).ok()?;
        let tag = hex::decode(tag_hex).ok()?;
        let salt = hex::decode(salt_hex).ok()?;
        if iv.len() != IV_LENGTH || tag.len() != TAG_LENGTH {
            return None;
        }
        sealed.extend_from_slice(&tag);

        let key = Self::derive_key(password, &salt);
        let cipher = Aes256Gcm16::new_from_slice(&key[..]).ok()?;
        let plaintext = cipher
            .decrypt(Nonce::<U16>::from_slice(&iv), sealed.as_slice())
            .ok()?;

        String::from_utf8(plaintext).ok()
    }

    /// PBKDF2-HMAC-SHA512 key derivation
    fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LENGTH]> {
        let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
        pbkdf2_hmac::<Sha512>(password.as_bytes(), salt, ITERATIONS, &mut key[..]);
        key
    }

    fn generate_salt() -> [u8; SALT_LENGTH] {
        let mut bytes = [0u8; SALT_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    }

    fn generate_iv() -> [u8; IV_LENGTH] {
        let mut bytes = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    }
}
