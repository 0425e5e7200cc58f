//! AES-256-GCM authenticated encryption envelope.
//!
//! Each call to `seal` generates a fresh random 12-byte nonce, prepends
//! it to the ciphertext, and base64-encodes the whole thing into a
//! self-describing text envelope.  `open` reverses the process and only
//! returns plaintext if the authentication tag verifies.
//!
//! Layout of the envelope before encoding:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Encrypt `plaintext` with a 32-byte `key` into a text envelope.
///
/// Returns base64(nonce || ciphertext).  The nonce is random per call,
/// so sealing the same plaintext twice yields two different envelopes.
pub fn seal(key: &[u8], plaintext: &[u8]) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let ciphertext = cipher
        .encrypt(&nonce, plaintext)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    // Prepend the nonce so the caller only needs to store one blob.
    let mut bytes = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    bytes.extend_from_slice(&nonce);
    bytes.extend_from_slice(&ciphertext);

    Ok(BASE64.encode(&bytes))
}

/// Decrypt an envelope that was produced by `seal`.
///
/// Every failure mode — malformed base64, an envelope too short to hold
/// a nonce, a bad key, or a tag mismatch — collapses to
/// `AuthenticationFailed`.  A wrong key and corrupted storage are
/// indistinguishable by construction, and this is an expected outcome,
/// never a panic.
pub fn open(key: &[u8], envelope: &str) -> Result<Vec<u8>> {
    let bytes = BASE64
        .decode(envelope)
        .map_err(|_| VaultError::AuthenticationFailed)?;

    // Must hold at least a nonce plus a full auth tag.
    if bytes.len() < NONCE_LEN {
        return Err(VaultError::AuthenticationFailed);
    }

    let (nonce_bytes, ciphertext) = bytes.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::AuthenticationFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::AuthenticationFailed)?;

    Ok(plaintext)
}
