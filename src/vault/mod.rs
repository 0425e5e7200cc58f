//! Vault module — the encrypted vault engine.
//!
//! This module provides:
//! - `Vault`, `VaultRecord`, and `RecordFields` types (`record`)
//! - `VaultStore` for creating, unlocking, and persisting vaults (`store`)
//! - `VaultSession` for record CRUD over an unlocked vault (`session`)

pub mod record;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use record::{RecordFields, Vault, VaultRecord};
pub use session::VaultSession;
pub use store::{VaultStore, MIN_PASSWORD_LEN};
