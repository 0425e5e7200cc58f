//! In-memory blob storage.
//!
//! Nothing is persisted across process restarts.  Useful for tests and
//! for embedders that supply their own durability.

use std::collections::HashMap;

use crate::errors::Result;

use super::SecureBlobStorage;

/// HashMap-backed blob storage.
#[derive(Default)]
pub struct MemoryBlobStorage {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureBlobStorage for MemoryBlobStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        self.blobs.remove(key);
        Ok(())
    }
}
