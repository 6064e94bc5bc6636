//! The persistence seam: a durable key-value store of string blobs.

use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

/// A named-blob store the exercise collection is persisted through.
///
/// Implementations must make `set` durable before returning; the store
/// re-reads the blob at startup and treats it as the source of truth.
pub trait BackingStore {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Durably write `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process backing store (for testing and ephemeral use).
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BackingStore + ?Sized> BackingStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::ReadFailed(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Backing store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect to storage: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}
