use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use super::{KeyValueStore, StorageError};

/// In-process store, optionally bounded by a byte quota.
///
/// Capacity counts key and value bytes of every stored entry, the same
/// accounting a browser applies to its local storage area.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    capacity: Option<usize>,
}

impl MemoryStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that rejects any write pushing total usage past `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            capacity: Some(capacity),
        }
    }

    /// Bytes currently used (keys + values).
    pub fn used_bytes(&self) -> usize {
        self.lock()
            .map(|entries| usage(&entries))
            .unwrap_or(0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries.lock().map_err(|_| StorageError::LockPoisoned)
    }
}

fn usage(entries: &HashMap<String, String>) -> usize {
    entries.iter().map(|(k, v)| k.len() + v.len()).sum()
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock()?;

        if let Some(capacity) = self.capacity {
            let replaced = entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = usage(&entries) - replaced + key.len() + value.len();
            if needed > capacity {
                return Err(StorageError::QuotaExceeded {
                    key: key.into(),
                    needed,
                    capacity,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}
