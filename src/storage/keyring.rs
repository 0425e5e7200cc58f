//! OS keyring blob storage.
//!
//! Stores each blob as an entry in the operating system's secure
//! credential store:
//! - macOS: Keychain
//! - Windows: Credential Manager
//! - Linux: Secret Service (GNOME Keyring / KDE Wallet)
//!
//! Keyring entries are strings, so blob bytes are wrapped in base64.
//! All operations fail gracefully — if the keyring is unavailable, the
//! error propagates as `StorageFailure` and the caller can fall back
//! to a file-backed store.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{Result, VaultError};

use super::SecureBlobStorage;

/// Blob storage backed by the OS credential store.
pub struct KeyringBlobStorage {
    service: String,
}

impl KeyringBlobStorage {
    /// Create a store namespaced under `service` in the OS keyring.
    pub fn new(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| VaultError::StorageFailure(format!("keyring entry {key}: {e}")))
    }
}

impl SecureBlobStorage for KeyringBlobStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.entry(key)?.get_password() {
            Ok(encoded) => {
                let bytes = BASE64.decode(&encoded).map_err(|e| {
                    VaultError::StorageFailure(format!("keyring entry {key} is malformed: {e}"))
                })?;
                Ok(Some(bytes))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(VaultError::StorageFailure(format!(
                "keyring read {key}: {e}"
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.entry(key)?
            .set_password(&BASE64.encode(value))
            .map_err(|e| VaultError::StorageFailure(format!("keyring write {key}: {e}")))
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()), // Already gone, that's fine.
            Err(e) => Err(VaultError::StorageFailure(format!(
                "keyring delete {key}: {e}"
            ))),
        }
    }
}
