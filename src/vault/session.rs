//! The unlocked session.
//!
//! `VaultSession` owns the decrypted vault, the live master key, and
//! the store itself for the lifetime of an unlock.  Exclusive ownership
//! is what serializes mutations: every read-modify-write cycle runs
//! through `&mut self`, so two cycles can never interleave against the
//! same envelope.
//!
//! Each mutation is a single transaction: snapshot the in-memory vault,
//! apply the change, persist, and roll the memory back if the persist
//! fails.  Memory and disk never disagree after a reported failure.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::TryRngCore;

use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};

use super::record::{RecordFields, Vault, VaultRecord};
use super::store::VaultStore;

/// Length of the random token behind each record id.
const RECORD_ID_LEN: usize = 16;

/// An unlocked vault: the record CRUD surface exposed to the UI.
pub struct VaultSession {
    store: VaultStore,
    vault: Vault,
    key: MasterKey,
}

impl VaultSession {
    /// Take ownership of an unlocked vault and its key.
    ///
    /// `key` and `vault` come from `VaultStore::create_vault` or one of
    /// the unlock methods on the same store.
    pub fn new(store: VaultStore, key: MasterKey, vault: Vault) -> Self {
        Self { store, vault, key }
    }

    // ------------------------------------------------------------------
    // Record CRUD
    // ------------------------------------------------------------------

    /// Add a record and persist.  Returns the new record's id.
    ///
    /// Site, username, and password must all be non-empty.
    pub fn add_record(&mut self, fields: RecordFields) -> Result<String> {
        Self::validate_fields(&fields)?;

        let id = self.fresh_record_id()?;
        let now = Utc::now();
        let record = VaultRecord {
            id: id.clone(),
            site: fields.site,
            username: fields.username,
            password: fields.password,
            folder: fields.folder,
            created_at: now,
            updated_at: now,
        };

        self.apply_and_persist(move |vault| {
            vault.records.push(record);
            Ok(())
        })?;

        Ok(id)
    }

    /// Replace the fields of an existing record and persist.
    ///
    /// The id and `created_at` are immutable; `updated_at` is bumped.
    pub fn update_record(&mut self, id: &str, fields: RecordFields) -> Result<()> {
        Self::validate_fields(&fields)?;
        if !self.vault.records.iter().any(|r| r.id == id) {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }

        self.apply_and_persist(move |vault| {
            if let Some(record) = vault.records.iter_mut().find(|r| r.id == id) {
                record.site = fields.site;
                record.username = fields.username;
                record.password = fields.password;
                record.folder = fields.folder;
                record.updated_at = Utc::now();
            }
            Ok(())
        })
    }

    /// Remove a record and persist.
    ///
    /// Deleting an id that does not exist is `RecordNotFound` rather
    /// than a silent success, to catch caller bugs.
    pub fn delete_record(&mut self, id: &str) -> Result<()> {
        if !self.vault.records.iter().any(|r| r.id == id) {
            return Err(VaultError::RecordNotFound(id.to_string()));
        }

        self.apply_and_persist(move |vault| {
            vault.records.retain(|r| r.id != id);
            Ok(())
        })
    }

    /// Case-insensitive substring search over site, username, and
    /// folder.  Pure: touches nothing persisted.  An empty query
    /// returns every record.
    pub fn search(&self, query: &str) -> Vec<&VaultRecord> {
        if query.is_empty() {
            return self.vault.records.iter().collect();
        }

        let needle = query.to_lowercase();
        self.vault
            .records
            .iter()
            .filter(|r| {
                r.site.to_lowercase().contains(&needle)
                    || r.username.to_lowercase().contains(&needle)
                    || r.folder
                        .as_deref()
                        .is_some_and(|f| f.to_lowercase().contains(&needle))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Escrow and logout
    // ------------------------------------------------------------------

    /// Opt in to biometric unlock by escrowing this session's key.
    /// No-op if an escrowed key already exists.
    pub fn enable_biometric_escrow(&mut self) -> Result<()> {
        self.store.enable_biometric_escrow(&self.key)
    }

    /// End the session: clear the escrowed key and discard the
    /// decrypted vault and master key (both zeroized on drop).
    /// Returns the store so the caller can unlock again later.
    pub fn logout(mut self) -> Result<VaultStore> {
        self.store.clear_escrow()?;
        // self.vault and self.key drop (and zeroize) here.
        Ok(self.store)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// All records, in insertion order.
    pub fn records(&self) -> &[VaultRecord] {
        &self.vault.records
    }

    /// Number of records in the vault.
    pub fn record_count(&self) -> usize {
        self.vault.records.len()
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    /// Run one mutation as a transaction against memory + disk.
    fn apply_and_persist<F>(&mut self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Vault) -> Result<()>,
    {
        let snapshot = self.vault.clone();
        mutate(&mut self.vault)?;

        if let Err(e) = self.store.persist(&self.vault, &self.key) {
            self.vault = snapshot;
            return Err(e);
        }
        Ok(())
    }

    /// Generate a record id that does not collide with any existing id.
    fn fresh_record_id(&self) -> Result<String> {
        loop {
            let mut token = [0u8; RECORD_ID_LEN];
            rand::rngs::OsRng
                .try_fill_bytes(&mut token)
                .map_err(|e| VaultError::RngFailure(format!("OS RNG: {e}")))?;
            let id = URL_SAFE_NO_PAD.encode(token);
            if !self.vault.records.iter().any(|r| r.id == id) {
                return Ok(id);
            }
        }
    }

    fn validate_fields(fields: &RecordFields) -> Result<()> {
        if fields.site.is_empty() {
            return Err(VaultError::InvalidRecord("site cannot be empty".into()));
        }
        if fields.username.is_empty() {
            return Err(VaultError::InvalidRecord("username cannot be empty".into()));
        }
        if fields.password.is_empty() {
            return Err(VaultError::InvalidRecord("password cannot be empty".into()));
        }
        Ok(())
    }
}
