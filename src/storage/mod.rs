//! Keyed blob storage for the receipt subsystem
//!
//! The repository and the draft store each persist one durable blob behind
//! the narrow `BlobStore` interface, keeping lifecycle rules independent of
//! the physical backend.

pub mod local;
pub mod memory;

use thiserror::Error;

pub use local::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Key under which the ordered receipt collection is persisted.
pub const RECEIPTS_KEY: &str = "receipts";

/// Key under which the in-progress draft is persisted.
pub const DRAFT_KEY: &str = "draft";

/// Error types for storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A durable store of independent byte blobs addressed by key.
///
/// All operations are synchronous; a returned `Ok` means the mutation has
/// been committed to the backend.
pub trait BlobStore {
    /// Load the blob for `key`, or `None` if it was never saved.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the blob for `key`.
    fn save(&mut self, key: &str, data: &[u8]) -> Result<(), StorageError>;

    /// Remove the blob for `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Keys become file names in the file backend, so they are restricted to a
/// safe character set.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let ok = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
