//! Persisted vault state and the unlock paths.
//!
//! `VaultStore` is the single source of truth for the three persisted
//! facts — salt, sealed envelope, escrowed key — and mediates every
//! disk round trip.  It owns the storage and biometric collaborators;
//! all access goes through `&mut self`, so read-modify-write cycles
//! against the envelope never interleave.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use zeroize::Zeroize;

use crate::crypto::encryption::{open, seal};
use crate::crypto::kdf::{derive_master_key_with_params, generate_salt, Argon2Params};
use crate::crypto::keys::MasterKey;
use crate::errors::{Result, VaultError};
use crate::escrow::BiometricEscrow;
use crate::storage::{SecureBlobStorage, ENVELOPE_KEY, ESCROW_KEY, SALT_KEY};

use super::record::Vault;

/// Minimum master password length, enforced before key derivation.
pub const MIN_PASSWORD_LEN: usize = 8;

/// The persisted-vault handle.  Create one over a storage backend and
/// a biometric backend, then `create_vault` or unlock.
pub struct VaultStore {
    storage: Box<dyn SecureBlobStorage>,
    biometric: Box<dyn BiometricEscrow>,
    params: Argon2Params,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Build a store with default Argon2id parameters.
    pub fn new(storage: Box<dyn SecureBlobStorage>, biometric: Box<dyn BiometricEscrow>) -> Self {
        Self::with_params(storage, biometric, Argon2Params::default())
    }

    /// Build a store with explicit Argon2id parameters.
    ///
    /// The same params must be used to unlock a vault as were used to
    /// create it; treat them as deployment configuration.
    pub fn with_params(
        storage: Box<dyn SecureBlobStorage>,
        biometric: Box<dyn BiometricEscrow>,
        params: Argon2Params,
    ) -> Self {
        Self {
            storage,
            biometric,
            params,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Create a brand-new vault.
    ///
    /// Rejects passwords under 8 characters with `WeakPassword` and
    /// refuses to overwrite an existing vault.  Generates a random
    /// salt, derives the master key, seals an empty vault, and persists
    /// envelope + salt as one logical unit: the envelope is written
    /// first, and if the salt write fails the envelope is removed
    /// again, so a later `unlock_with_password` sees either a complete
    /// vault or `NoVaultFound`.
    pub fn create_vault(&mut self, password: &str) -> Result<(MasterKey, Vault)> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(VaultError::WeakPassword(MIN_PASSWORD_LEN));
        }
        if self.storage.get(ENVELOPE_KEY)?.is_some() {
            return Err(VaultError::VaultAlreadyExists);
        }

        let salt = generate_salt()?;
        let mut key_bytes =
            derive_master_key_with_params(password.as_bytes(), &salt, &self.params)?;
        let key = MasterKey::new(key_bytes);
        key_bytes.zeroize();

        let vault = Vault::empty();
        let envelope = seal(key.as_bytes(), &vault.to_payload()?)?;

        self.storage.set(ENVELOPE_KEY, envelope.as_bytes())?;
        if let Err(e) = self
            .storage
            .set(SALT_KEY, BASE64.encode(salt).as_bytes())
        {
            // Roll back the half-created vault; a failed delete leaves
            // an envelope with no salt, which still reads as NoVaultFound.
            let _ = self.storage.delete(ENVELOPE_KEY);
            return Err(e);
        }

        Ok((key, vault))
    }

    /// Unlock an existing vault with the master password.
    ///
    /// Wrong password and corrupted storage are reported identically as
    /// `InvalidPassword` — the AEAD tag cannot tell them apart, and
    /// neither should the caller.
    pub fn unlock_with_password(&self, password: &str) -> Result<(MasterKey, Vault)> {
        let salt = self.load_salt()?;
        let envelope = self.load_envelope()?;

        let mut key_bytes =
            derive_master_key_with_params(password.as_bytes(), &salt, &self.params)?;
        let key = MasterKey::new(key_bytes);
        key_bytes.zeroize();

        let vault = Self::open_vault(&key, &envelope).map_err(|_| VaultError::InvalidPassword)?;

        Ok((key, vault))
    }

    /// Unlock with the biometric-escrowed key.
    ///
    /// Requires hardware, enrollment, an escrowed key, and a passing
    /// challenge; anything short of that is `BiometricUnavailable` and
    /// the caller falls back to password entry.  A passing challenge
    /// whose envelope still fails to open is `VaultCorrupted` — escrow
    /// success never bypasses the integrity check.
    pub fn unlock_with_biometric(&self) -> Result<(MasterKey, Vault)> {
        if !self.biometric.hardware_available() || !self.biometric.enrolled() {
            return Err(VaultError::BiometricUnavailable);
        }
        let Some(escrowed) = self.storage.get(ESCROW_KEY)? else {
            return Err(VaultError::BiometricUnavailable);
        };
        if !self.biometric.challenge("Unlock your vault") {
            return Err(VaultError::BiometricUnavailable);
        }

        let mut key_bytes = BASE64
            .decode(&escrowed)
            .map_err(|_| VaultError::VaultCorrupted)?;
        let key = MasterKey::from_slice(&key_bytes).ok_or(VaultError::VaultCorrupted)?;
        key_bytes.zeroize();

        let envelope = self.load_envelope()?;
        let vault = Self::open_vault(&key, &envelope).map_err(|_| VaultError::VaultCorrupted)?;

        Ok((key, vault))
    }

    /// Seal `vault` under `key` and atomically replace the stored
    /// envelope.  Per-key atomicity is the storage backend's contract;
    /// the old envelope stays intact if the write fails.
    pub fn persist(&mut self, vault: &Vault, key: &MasterKey) -> Result<()> {
        let envelope = seal(key.as_bytes(), &vault.to_payload()?)?;
        self.storage.set(ENVELOPE_KEY, envelope.as_bytes())
    }

    // ------------------------------------------------------------------
    // Escrow management
    // ------------------------------------------------------------------

    /// Store `key` in the biometric-gated escrow slot.
    ///
    /// Idempotent: if an escrowed key already exists it is left
    /// untouched — no silent overwrite.
    pub fn enable_biometric_escrow(&mut self, key: &MasterKey) -> Result<()> {
        if self.storage.get(ESCROW_KEY)?.is_some() {
            return Ok(());
        }
        self.storage
            .set(ESCROW_KEY, BASE64.encode(key.as_bytes()).as_bytes())
    }

    /// Remove any escrowed key.  Called on logout so the next launch
    /// requires the password before biometric unlock is offered again.
    pub fn clear_escrow(&mut self) -> Result<()> {
        self.storage.delete(ESCROW_KEY)
    }

    // ------------------------------------------------------------------
    // Inspectors (for the UI layer's create/unlock screens)
    // ------------------------------------------------------------------

    /// True if a vault envelope exists in storage.
    pub fn has_vault(&self) -> Result<bool> {
        Ok(self.storage.get(ENVELOPE_KEY)?.is_some())
    }

    /// True if an escrowed key exists in storage.
    pub fn escrow_enabled(&self) -> Result<bool> {
        Ok(self.storage.get(ESCROW_KEY)?.is_some())
    }

    /// True if biometric unlock could succeed right now: usable
    /// hardware, enrollment, and an escrowed key.
    pub fn biometric_ready(&self) -> Result<bool> {
        Ok(self.biometric.hardware_available()
            && self.biometric.enrolled()
            && self.escrow_enabled()?)
    }

    // ------------------------------------------------------------------
    // Internal helpers
    // ------------------------------------------------------------------

    fn load_salt(&self) -> Result<Vec<u8>> {
        let encoded = self.storage.get(SALT_KEY)?.ok_or(VaultError::NoVaultFound)?;
        BASE64
            .decode(&encoded)
            .map_err(|_| VaultError::InvalidPassword)
    }

    fn load_envelope(&self) -> Result<String> {
        let bytes = self
            .storage
            .get(ENVELOPE_KEY)?
            .ok_or(VaultError::NoVaultFound)?;
        String::from_utf8(bytes).map_err(|_| VaultError::InvalidPassword)
    }

    /// Open and decode the envelope.  Callers map the error to the
    /// path-appropriate variant; payload decode failures collapse into
    /// the same bucket as tag failures so nothing leaks about which
    /// stage rejected the data.
    fn open_vault(key: &MasterKey, envelope: &str) -> Result<Vault> {
        let mut payload = open(key.as_bytes(), envelope)?;
        let vault = Vault::from_payload(&payload);
        payload.zeroize();
        vault
    }
}
