//! crates/eduvista_core/src/ports.rs
//!
//! Defines the storage contract (trait) the stores are built against.
//! The trait forms the boundary of the hexagonal architecture, allowing the
//! core to be independent of the concrete storage medium (a file tree, an
//! in-memory map, or whatever a host application provides).

use std::collections::HashMap;
use std::sync::Mutex;

//=========================================================================================
// Port Error and Result Types
//=========================================================================================

/// The error type for raw storage operations.
///
/// The storage medium being unavailable is the only failure the port can
/// report; everything above it (missing keys, absent entities) degrades to
/// `None` values or unchanged collections instead.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage medium unavailable: {0}")]
    Unavailable(String),
}

/// The error type for store operations layered on top of the port.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying storage medium failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A persisted record no longer parses as the expected shape.
    #[error("corrupt record in storage: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// A convenience type alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

//=========================================================================================
// Storage Port (Trait)
//=========================================================================================

/// A synchronous string key-value medium, the analog of browser local
/// storage. Each key is an independent namespace holding one serialized
/// record; writes replace the whole value (last write wins).
pub trait StorageService: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the value under `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

//=========================================================================================
// In-Memory Implementation
//=========================================================================================

/// A `StorageService` backed by a plain map, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageService for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage mutex poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage mutex poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("storage mutex poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}
