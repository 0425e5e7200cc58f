//! The in-memory master key.

use zeroize::Zeroize;

use crate::crypto::kdf::KEY_LEN;

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// Exactly one `MasterKey` is live per unlocked session; it is never
/// persisted in plaintext outside the biometric-gated escrow slot.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Build a key from an untrusted byte slice (e.g. the escrow slot).
    ///
    /// Returns `None` if the slice is not exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().ok()?;
        Some(Self { bytes })
    }

    /// Access the raw key bytes (e.g. to pass to the AEAD codec).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MasterKey(<redacted>)")
    }
}
