//! In-memory blob store, used as a test double and for ephemeral sessions.

use std::collections::HashMap;

use super::{validate_key, BlobStore, StorageError};

/// A blob store that keeps everything in a process-local map.
#[derive(Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        self.blobs.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.blobs.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryBlobStore::new();
        assert!(store.load("draft").unwrap().is_none());
        store.save("draft", b"{}").unwrap();
        assert_eq!(store.load("draft").unwrap().unwrap(), b"{}");
        store.remove("draft").unwrap();
        assert!(store.load("draft").unwrap().is_none());
    }
}
