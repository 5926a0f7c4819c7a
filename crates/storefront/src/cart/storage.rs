//! Durable storage backends for the cart.
//!
//! The cart store talks to storage through the [`CartStorage`] trait: a
//! minimal get/set contract over string blobs keyed by record name. The
//! persisted record is the JSON serialization of the cart state under the
//! [`CART_STORAGE_KEY`] key.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Record key for the persisted cart blob.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Storage operation failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed (file missing is NOT an error; see `get`).
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart state could not be serialized for writing.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Minimal get/set contract over named string records.
///
/// Implementations must be safe to share across tasks; the cart store calls
/// `set` from its background writer and `get` once during hydration.
pub trait CartStorage: Send + Sync + 'static {
    /// Read the record for `key`, or `None` if it was never written.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write the record for `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend could not be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// JSON File Backend
// =============================================================================

/// File-backed storage: one JSON file per record key under a directory.
///
/// Writes go through a temporary file followed by a rename, so a crash
/// mid-write never leaves a truncated record behind.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Create a backend rooted at `dir`. The directory is created on first
    /// write, not here.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CartStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.record_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.record_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with a single record.
    #[must_use]
    pub fn with_record(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        storage
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Join a base directory with a unique per-test subdirectory.
///
/// Kept here rather than pulling in a tempdir crate; callers clean up by
/// letting the OS temp reaper handle it.
#[cfg(test)]
fn unique_temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("bazaar-storage-{}", uuid::Uuid::new_v4()))
}
