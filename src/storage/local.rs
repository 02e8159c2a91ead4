//! File system blob store
//!
//! Each key maps to one file under a base directory. Writes go through a
//! temporary file and rename so a crash mid-write never leaves a truncated
//! blob behind.

use std::fs;
use std::path::{Path, PathBuf};

use super::{validate_key, BlobStore, StorageError};

/// A blob store backed by the local file system.
pub struct FileBlobStore {
    /// Base directory for storage
    base_dir: PathBuf,
}

impl FileBlobStore {
    /// Create a new file-backed store, creating the base directory if it
    /// does not exist.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        if !base_dir.exists() {
            fs::create_dir_all(&base_dir)?;
        }
        Ok(Self { base_dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_dir.join(format!("{key}.json")))
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self.base_dir.join(format!("{key}.json.tmp"));
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_remove_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path()).unwrap();

        assert!(store.load("receipts").unwrap().is_none());

        store.save("receipts", b"[1,2,3]").unwrap();
        assert_eq!(store.load("receipts").unwrap().unwrap(), b"[1,2,3]");

        store.save("receipts", b"[]").unwrap();
        assert_eq!(store.load("receipts").unwrap().unwrap(), b"[]");

        store.remove("receipts").unwrap();
        assert!(store.load("receipts").unwrap().is_none());
        // Removing again is fine.
        store.remove("receipts").unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path()).unwrap();

        store.save("receipts", b"collection").unwrap();
        store.save("draft", b"form").unwrap();
        store.remove("draft").unwrap();

        assert_eq!(store.load("receipts").unwrap().unwrap(), b"collection");
        assert!(store.load("draft").unwrap().is_none());
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileBlobStore::new(dir.path()).unwrap();
        assert!(matches!(
            store.save("../escape", b"x"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
