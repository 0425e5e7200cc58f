//! File-backed blob storage.
//!
//! Each key maps to a file inside a single directory.  Writes go to a
//! temp file in the same directory followed by a rename, so a reader
//! never sees a half-written blob even if the process dies mid-write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::{Result, VaultError};

use super::SecureBlobStorage;

/// Blob storage rooted at a directory, one file per key.
pub struct FileBlobStorage {
    dir: PathBuf,
}

impl FileBlobStorage {
    /// Open (creating if needed) a blob store rooted at `dir`.
    pub fn open(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| VaultError::StorageFailure(format!("create {}: {e}", dir.display())))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        // Keys are fixed identifiers like "vault.envelope", safe as
        // file names as-is.
        self.dir.join(key)
    }
}

impl SecureBlobStorage for FileBlobStorage {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match fs::read(self.blob_path(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VaultError::StorageFailure(format!("read {key}: {e}"))),
        }
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.blob_path(key);

        // Atomic write: write to a temp file, then rename.  The temp
        // file is in the same directory so the rename stays on one
        // filesystem and is guaranteed atomic.
        let tmp_path = self.dir.join(format!(".{key}.tmp"));

        fs::write(&tmp_path, value)
            .map_err(|e| VaultError::StorageFailure(format!("write {key}: {e}")))?;
        fs::rename(&tmp_path, &path)
            .map_err(|e| VaultError::StorageFailure(format!("replace {key}: {e}")))?;

        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Already gone, that's fine.
            Err(e) => Err(VaultError::StorageFailure(format!("delete {key}: {e}"))),
        }
    }
}
