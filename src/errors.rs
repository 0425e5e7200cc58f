use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// The AEAD tag did not verify. Wrong key and corrupted ciphertext are
    /// cryptographically indistinguishable; `VaultStore` maps this to
    /// `InvalidPassword` or `VaultCorrupted` depending on the unlock path.
    #[error("Decryption failed — wrong key or corrupted data")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Random generator failure: {0}")]
    RngFailure(String),

    // --- Vault lifecycle errors ---
    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("A vault already exists in this storage")]
    VaultAlreadyExists,

    #[error("No vault found — create one first")]
    NoVaultFound,

    #[error("Invalid password or corrupted vault")]
    InvalidPassword,

    #[error("Vault failed its integrity check — unlock with your password")]
    VaultCorrupted,

    // --- Record errors ---
    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // --- Storage / biometric errors ---
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    #[error("Biometric unlock unavailable")]
    BiometricUnavailable,

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
