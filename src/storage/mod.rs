//! Secure blob storage — the persistence collaborator.
//!
//! The vault core never touches the filesystem or the OS credential
//! store directly; it talks to a `SecureBlobStorage`, a keyed blob
//! store assumed to provide at-rest protection and per-key atomic
//! replacement.  Three backends ship with the crate:
//! - `FileBlobStorage`: one file per key, atomic temp-file + rename
//! - `MemoryBlobStorage`: HashMap-backed, for tests and embedding
//! - `KeyringBlobStorage`: OS credential store (feature `keyring-store`)

pub mod file;
pub mod memory;

#[cfg(feature = "keyring-store")]
pub mod keyring;

pub use file::FileBlobStorage;
pub use memory::MemoryBlobStorage;

#[cfg(feature = "keyring-store")]
pub use keyring::KeyringBlobStorage;

use crate::errors::Result;

/// Storage key for the key-derivation salt.
pub const SALT_KEY: &str = "vault.salt";

/// Storage key for the sealed vault envelope.
pub const ENVELOPE_KEY: &str = "vault.envelope";

/// Storage key for the biometric-gated escrowed master key.
pub const ESCROW_KEY: &str = "vault.escrow-key";

/// A keyed blob store with per-key atomic replacement.
///
/// Implementations must guarantee that `set` either fully replaces the
/// previous value under `key` or leaves it untouched — readers never
/// observe a half-written blob.  Durability beyond that (fsync policy,
/// hardware-backed encryption) is the backend's concern.
pub trait SecureBlobStorage: Send {
    /// Read the blob stored under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Atomically replace the blob stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<()>;

    /// Remove the blob stored under `key`.  Absent keys are a no-op.
    fn delete(&mut self, key: &str) -> Result<()>;
}
