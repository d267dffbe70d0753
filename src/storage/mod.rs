//! Key/value persistence backends.
//!
//! Every persisted entity lives under its own key as a JSON string.
//! Backends are synchronous, non-transactional and may reject writes
//! (e.g. when a capacity quota is exhausted).

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Quota exceeded writing {key}: {needed} bytes needed, capacity {capacity}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        capacity: usize,
    },

    #[error("Migration failed at version {version}: {reason}")]
    MigrationFailed { version: i64, reason: String },

    #[error("Storage lock poisoned")]
    LockPoisoned,
}

/// Synchronous string key/value store.
///
/// Implementations own their synchronisation so a single store can be
/// shared as `Arc<dyn KeyValueStore>` by every field.
pub trait KeyValueStore: Send + Sync {
    /// Read the payload stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous payload.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}
