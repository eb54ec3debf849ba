//! # In-Memory Store Implementation
//!
//! Simple HashMap-based store for cached values.
//!
//! ## Features
//!
//! * Fast lookups
//! * No eviction policy
//! * No expiry metadata

use super::Store;
use std::collections::HashMap;

/// Simple in-memory store implementation using a HashMap
#[derive(Debug)]
pub struct InMemoryStore<V>
where
    V: Clone + Send + Sync + std::fmt::Debug,
{
    /// Internal storage for cached values
    entries: HashMap<String, V>,
}

impl<V> InMemoryStore<V>
where
    V: Clone + Send + Sync + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Pre-sizes the map. This is never a bound on the number of entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }
}

impl<V> Default for InMemoryStore<V>
where
    V: Clone + Send + Sync + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Store<V> for InMemoryStore<V>
where
    V: Clone + Send + Sync + std::fmt::Debug,
{
    fn get(&self, key: &str) -> Option<V> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: String, value: V) {
        self.entries.insert(key, value);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn entries(&self) -> HashMap<String, V> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_store_operations() {
        let mut store = InMemoryStore::<i32>::new();

        store.set("key1".to_string(), 1);
        assert_eq!(store.get("key1"), Some(1));

        assert_eq!(store.remove("key1"), true);
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.remove("key1"), false);
    }

    #[test]
    fn test_in_memory_store_overwrite() {
        let mut store = InMemoryStore::<i32>::new();

        store.set("key1".to_string(), 1);
        store.set("key1".to_string(), 2);

        assert_eq!(store.get("key1"), Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_in_memory_store_clear() {
        let mut store = InMemoryStore::<i32>::with_capacity(1);

        store.set("key1".to_string(), 1);
        store.set("key2".to_string(), 2);
        store.set("key3".to_string(), 3);
        assert_eq!(store.len(), 3);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
        assert_eq!(store.get("key2"), None);
    }

    #[test]
    fn test_entries_is_a_snapshot() {
        let mut store = InMemoryStore::<i32>::new();
        store.set("key1".to_string(), 1);

        let snapshot = store.entries();
        store.set("key2".to_string(), 2);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("key1"), Some(&1));
    }
}
