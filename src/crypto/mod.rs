//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM seal/open over base64 text envelopes (`encryption`)
//! - Argon2id password-based key derivation (`kdf`)
//! - The zeroizing `MasterKey` wrapper (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{seal, open, derive_master_key, ...};
pub use encryption::{open, seal};
pub use kdf::{derive_master_key, derive_master_key_with_params, generate_salt, Argon2Params};
pub use keys::MasterKey;
