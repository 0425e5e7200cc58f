//! Vault payload types.
//!
//! `Vault` is the plaintext structure that gets serialized to JSON and
//! sealed into the envelope.  Record contents are zeroized on drop so
//! deleted credentials do not linger in freed memory, and `Debug`
//! output never contains the stored password.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::errors::{Result, VaultError};

/// A single credential stored in the vault.
///
/// `id` is assigned once at creation and never reused or changed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize)]
#[zeroize(drop)]
pub struct VaultRecord {
    /// Opaque unique token identifying this record.
    pub id: String,

    /// The site or service this credential belongs to.
    pub site: String,

    /// The account username.
    pub username: String,

    /// The account password, in plaintext while the vault is unlocked.
    pub password: String,

    /// Optional folder for UI grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,

    /// When this record was first created.
    #[zeroize(skip)]
    pub created_at: DateTime<Utc>,

    /// When this record was last updated.
    #[zeroize(skip)]
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Debug for VaultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultRecord")
            .field("id", &self.id)
            .field("site", &self.site)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("folder", &self.folder)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

/// The caller-supplied fields of a record, shared by add and update.
#[derive(Debug, Clone, Default)]
pub struct RecordFields {
    pub site: String,
    pub username: String,
    pub password: String,
    pub folder: Option<String>,
}

impl RecordFields {
    /// Convenience constructor for the common no-folder case.
    pub fn new(site: &str, username: &str, password: &str) -> Self {
        Self {
            site: site.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            folder: None,
        }
    }

    /// Set the folder, builder-style.
    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folder = Some(folder.to_string());
        self
    }
}

/// The decrypted vault: the full record collection.
///
/// This is exactly what round-trips through the AEAD codec — content
/// equality is preserved across seal/open even though each seal
/// produces fresh ciphertext.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub records: Vec<VaultRecord>,
}

impl Vault {
    /// An empty vault, as written at creation time.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Serialize to the JSON payload that gets sealed.
    pub fn to_payload(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| VaultError::SerializationError(format!("vault: {e}")))
    }

    /// Deserialize from an opened payload.
    pub fn from_payload(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| VaultError::SerializationError(format!("vault: {e}")))
    }
}
