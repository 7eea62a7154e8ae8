//! In-memory key-value store

use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::{DomainError, KeyValueStore};

/// Thread-safe in-memory store
///
/// Useful for testing and short-lived processes. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Creates a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, DomainError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, DomainError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = InMemoryKeyValueStore::new();
        store.set("key1", "value1").unwrap();

        assert_eq!(store.get("key1").unwrap(), Some("value1".to_string()));
        assert_eq!(store.get("missing").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = InMemoryKeyValueStore::new();
        store.set("key1", "first").unwrap();
        store.set("key1", "second").unwrap();

        assert_eq!(store.get("key1").unwrap(), Some("second".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove() {
        let store = InMemoryKeyValueStore::with_entries([("key1", "value1")]);

        assert!(store.remove("key1").unwrap());
        assert!(!store.remove("key1").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_keys() {
        let store = InMemoryKeyValueStore::with_entries([("a", "1"), ("b", "2")]);

        let mut keys = store.keys().unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
