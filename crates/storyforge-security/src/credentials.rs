//! Work-tracker credentials sealed under a user password

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::cipher::{CredentialCipher, EncryptedPayload};
use crate::Result;

/// Connection details for the external work-tracking system
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkTrackerCredentials {
    /// Organization URL, e.g. `https://dev.azure.com/acme`
    pub organization_url: String,
    /// Personal access token
    pub personal_access_token: String,
    /// Project name in the tracker
    pub project: String,
    /// Optional team
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl fmt::Debug for WorkTrackerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkTrackerCredentials")
            .field("organization_url", &self.organization_url)
            .field("personal_access_token", &"<redacted>")
            .field("project", &self.project)
            .field("team_id", &self.team_id)
            .finish()
    }
}

/// The two fields persisted on a project record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedCredentials {
    /// `iv:ciphertext:tag` blob
    pub encrypted_data: String,
    /// Hex salt for key derivation
    pub salt: String,
}

impl SealedCredentials {
    /// Serialize and encrypt credentials under `password`
    pub fn seal(credentials: &WorkTrackerCredentials, password: &str) -> Result<Self> {
        let json = Zeroizing::new(serde_json::to_string(credentials)?);
        Ok(CredentialCipher::encrypt(&json, password, None)?.into())
    }

    /// Decrypt and deserialize; `None` on a wrong password or corrupt record
    pub fn unseal(&self, password: &str) -> Option<WorkTrackerCredentials> {
        let json = Zeroizing::new(CredentialCipher::decrypt(
            &self.encrypted_data,
            password,
            &self.salt,
        )?);
        serde_json::from_str(&json).ok()
    }

    /// Whether `password` unlocks this record
    pub fn verify(&self, password: &str) -> bool {
        CredentialCipher::validate_password(&self.encrypted_data, password, &self.salt)
    }
}

impl From<EncryptedPayload> for SealedCredentials {
    fn from(payload: EncryptedPayload) -> Self {
        Self {
            encrypted_data: payload.encrypted_data,
            salt: payload.salt,
        }
    }
}
