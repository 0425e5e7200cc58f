//! PassVault — a local, offline encrypted password vault engine.
//!
//! The crate is the storage core only: Argon2id key derivation, the
//! AES-256-GCM envelope the vault persists as, biometric key escrow,
//! and the read-modify-write protocol that keeps the on-disk vault
//! consistent across edits.  Screens and rendering belong to the
//! embedding application, which drives everything through
//! [`vault::VaultStore`] and [`vault::VaultSession`].

pub mod crypto;
pub mod errors;
pub mod escrow;
pub mod storage;
pub mod vault;

pub use errors::{Result, VaultError};
