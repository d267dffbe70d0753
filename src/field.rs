//! Storage-backed typed field.
//!
//! A `PersistentField<T>` binds an in-memory value to one key of a
//! `KeyValueStore`. The value is loaded once at creation; every write
//! updates memory first and then persists the JSON payload immediately.
//!
//! Durability is best effort: a failed persist is logged and swallowed,
//! and the in-memory value stays authoritative for the rest of the
//! session even if it no longer matches the stored payload.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::{KeyValueStore, StorageError};

/// Next value for a field: a replacement or a function of the current value.
pub enum Update<T> {
    Replace(T),
    Apply(Box<dyn FnOnce(&T) -> T>),
}

impl<T> Update<T> {
    pub fn apply<F>(f: F) -> Self
    where
        F: FnOnce(&T) -> T + 'static,
    {
        Self::Apply(Box::new(f))
    }

    fn resolve(self, current: &T) -> T {
        match self {
            Self::Replace(next) => next,
            Self::Apply(f) => f(current),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Replace(value)
    }
}

impl<T> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(_) => f.write_str("Update::Replace(..)"),
            Self::Apply(_) => f.write_str("Update::Apply(..)"),
        }
    }
}

type Listener<T> = Box<dyn Fn(&T) + Send + Sync>;

pub struct PersistentField<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    default: T,
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> PersistentField<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Bind a field to `key`, loading any previously persisted value.
    ///
    /// Falls back to `default` when nothing is stored, the store cannot
    /// be read, or the payload does not parse as `T`.
    pub fn create(store: Arc<dyn KeyValueStore>, key: impl Into<String>, default: T) -> Self {
        let key = key.into();
        let value = load(store.as_ref(), &key).unwrap_or_else(|| default.clone());
        Self {
            store,
            key,
            default,
            value,
            listeners: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current in-memory value.
    pub fn read(&self) -> &T {
        &self.value
    }

    /// Replace the value (or derive it from the current one) and persist.
    ///
    /// Returns whether the payload reached the store. The in-memory value
    /// is updated either way.
    pub fn write(&mut self, next: impl Into<Update<T>>) -> bool {
        self.value = next.into().resolve(&self.value);
        let persisted = match self.persist() {
            Ok(()) => {
                tracing::debug!(key = %self.key, "Persisted field");
                true
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to persist field, keeping in-memory value");
                false
            }
        };
        self.notify();
        persisted
    }

    /// Shorthand for a functional update.
    pub fn update<F>(&mut self, f: F) -> bool
    where
        F: FnOnce(&T) -> T + 'static,
    {
        self.write(Update::apply(f))
    }

    /// Remove the persisted payload and reset to the default value.
    pub fn clear(&mut self) -> bool {
        self.value = self.default.clone();
        let removed = match self.store.delete(&self.key) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Failed to clear field");
                false
            }
        };
        self.notify();
        removed
    }

    /// Register a listener called with the new value after every write or clear.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn persist(&self) -> Result<(), StorageError> {
        let payload = serde_json::to_string(&self.value)?;
        self.store.set(&self.key, &payload)
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.value);
        }
    }
}

impl<T> PersistentField<Vec<T>>
where
    T: Serialize + DeserializeOwned + Clone + 'static,
{
    /// Insert `entry` at the front (newest-first collections).
    pub fn prepend(&mut self, entry: T) -> bool {
        self.update(move |current| {
            let mut next = Vec::with_capacity(current.len() + 1);
            next.push(entry);
            next.extend(current.iter().cloned());
            next
        })
    }

    /// Drop every element matching `predicate`. Returns how many were removed.
    pub fn remove_where<P>(&mut self, predicate: P) -> usize
    where
        P: Fn(&T) -> bool + 'static,
    {
        let before = self.value.len();
        self.update(move |current| {
            current
                .iter()
                .filter(|item| !predicate(item))
                .cloned()
                .collect()
        });
        before - self.value.len()
    }
}

fn load<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let payload = match store.get(key) {
        Ok(Some(payload)) => payload,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read field, using default");
            return None;
        }
    };

    match serde_json::from_str(&payload) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored payload does not parse, using default");
            None
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersistentField")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde::Deserialize;

    use crate::storage::{MemoryStore, SqliteStore};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Reading {
        id: i64,
        value: f64,
    }

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    #[test]
    fn create_without_payload_uses_default() {
        let field: PersistentField<Vec<Reading>> =
            PersistentField::create(memory(), "readings", Vec::new());
        assert!(field.read().is_empty());
    }

    #[test]
    fn create_with_corrupt_payload_uses_default() {
        let store = memory();
        store.set("readings", "{not json").unwrap();
        let field: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", Vec::new());
        assert!(field.read().is_empty());
    }

    #[test]
    fn create_with_wrong_shape_uses_default() {
        let store = memory();
        store.set("readings", "{\"id\":1}").unwrap();
        let field: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", vec![Reading { id: 0, value: 1.0 }]);
        assert_eq!(field.read().len(), 1);
        assert_eq!(field.read()[0].id, 0);
    }

    #[test]
    fn write_replaces_and_persists() {
        let store = memory();
        let mut field = PersistentField::create(store.clone(), "count", 0_u32);
        assert!(field.write(5_u32));
        assert_eq!(*field.read(), 5);
        assert_eq!(store.get("count").unwrap().as_deref(), Some("5"));
    }

    #[test]
    fn functional_update_sees_current_value() {
        let mut field = PersistentField::create(memory(), "count", 1_u32);
        field.update(|n| n + 1);
        field.write(Update::apply(|n: &u32| n * 10));
        assert_eq!(*field.read(), 20);
    }

    #[test]
    fn round_trip_through_fresh_field() {
        let store = memory();
        let readings = vec![
            Reading { id: 2, value: 140.0 },
            Reading { id: 1, value: 150.5 },
        ];
        {
            let mut field: PersistentField<Vec<Reading>> =
                PersistentField::create(store.clone(), "readings", Vec::new());
            field.write(readings.clone());
        }
        let fresh: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", Vec::new());
        assert_eq!(fresh.read(), &readings);
    }

    #[test]
    fn round_trip_survives_reopened_sqlite_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.db");
        {
            let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
            let mut field: PersistentField<Vec<Reading>> =
                PersistentField::create(store, "readings", Vec::new());
            field.write(vec![Reading { id: 7, value: 99.0 }]);
        }
        let store: Arc<dyn KeyValueStore> = Arc::new(SqliteStore::open(&path).unwrap());
        let field: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", Vec::new());
        assert_eq!(field.read(), &vec![Reading { id: 7, value: 99.0 }]);
    }

    #[test]
    fn rejected_write_keeps_in_memory_value() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_capacity(16));
        let mut field = PersistentField::create(store.clone(), "notes", String::new());

        assert!(field.write("short".to_string()));
        let persisted = field.write("this payload is far too long".to_string());

        assert!(!persisted);
        assert_eq!(field.read(), "this payload is far too long");
        // Store still holds the last successful write
        assert_eq!(store.get("notes").unwrap().as_deref(), Some("\"short\""));
    }

    #[test]
    fn clear_removes_payload_and_resets_default() {
        let store = memory();
        let mut field = PersistentField::create(store.clone(), "count", 3_u32);
        field.write(9_u32);
        assert!(field.clear());
        assert_eq!(*field.read(), 3);
        assert!(store.get("count").unwrap().is_none());
    }

    #[test]
    fn listeners_see_every_write() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(AtomicUsize::new(0));
        let mut field = PersistentField::create(memory(), "count", 0_usize);

        let (c, s) = (calls.clone(), seen.clone());
        field.subscribe(move |v: &usize| {
            c.fetch_add(1, Ordering::SeqCst);
            s.store(*v, Ordering::SeqCst);
        });

        field.write(4_usize);
        field.update(|v| v + 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(seen.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn listeners_notified_even_when_persist_fails() {
        let calls = Arc::new(AtomicUsize::new(0));
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::with_capacity(0));
        let mut field = PersistentField::create(store, "count", 0_u32);

        let c = calls.clone();
        field.subscribe(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!field.write(1_u32));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn prepend_puts_newest_first() {
        let store = memory();
        let mut field: PersistentField<Vec<Reading>> =
            PersistentField::create(store.clone(), "readings", Vec::new());
        field.prepend(Reading { id: 1, value: 100.0 });
        field.prepend(Reading { id: 2, value: 110.0 });
        let ids: Vec<i64> = field.read().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);

        let fresh: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", Vec::new());
        assert_eq!(fresh.read(), field.read());
    }

    #[test]
    fn remove_where_drops_only_matches() {
        let mut field: PersistentField<Vec<Reading>> =
            PersistentField::create(memory(), "readings", Vec::new());
        field.prepend(Reading { id: 1, value: 100.0 });
        field.prepend(Reading { id: 2, value: 110.0 });
        field.prepend(Reading { id: 3, value: 120.0 });

        assert_eq!(field.remove_where(|r| r.id == 2), 1);
        assert_eq!(field.remove_where(|r| r.id == 99), 0);
        let ids: Vec<i64> = field.read().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn key_is_exposed() {
        let field = PersistentField::create(memory(), "foodDiary", 0_u8);
        assert_eq!(field.key(), "foodDiary");
    }

    // ───────────────────────────────────────
    // unreadable store
    // ───────────────────────────────────────

    /// Store whose reads always fail; writes go to an inner memory store.
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::LockPoisoned)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), StorageError> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn failed_read_uses_default_and_writes_still_apply() {
        let store: Arc<dyn KeyValueStore> = Arc::new(UnreadableStore {
            inner: MemoryStore::new(),
        });
        store.set("readings", r#"[{"id":1,"value":100.0}]"#).unwrap();

        let default = vec![Reading { id: 0, value: 1.0 }];
        let mut field: PersistentField<Vec<Reading>> =
            PersistentField::create(store, "readings", default.clone());
        assert_eq!(field.read(), &default);

        field.prepend(Reading { id: 2, value: 110.0 });
        let ids: Vec<i64> = field.read().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 0]);
    }
}
