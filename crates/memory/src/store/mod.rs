//! # Key-Value Store
//!
//! Storage seam behind every cache adapter.
//!
//! ## Features
//!
//! * Unordered string-keyed mapping
//! * No capacity bound and no expiry
//! * One shared handle per adapter, guarded by a lock
//!
//! ## Store Types
//!
//! * [`InMemoryStore`] - HashMap backed store living as long as its adapter

pub mod in_memory;

pub use in_memory::InMemoryStore;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Core trait defining store behavior
pub trait Store<V>: Send + Sync + std::fmt::Debug {
    /// Retrieves a copy of the value stored under `key`
    fn get(&self, key: &str) -> Option<V>;
    /// Stores `value` under `key`, replacing any previous value
    fn set(&mut self, key: String, value: V);
    /// Removes `key`, returning whether an entry existed
    fn remove(&mut self, key: &str) -> bool;
    /// Removes all entries from the store
    fn clear(&mut self);
    /// Number of entries currently held
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Snapshot of every entry
    fn entries(&self) -> HashMap<String, V>;
}

/// Type alias for the thread-safe store handle
pub type SharedStore<V> = Arc<RwLock<Box<dyn Store<V>>>>;

pub(crate) fn shared<V, S>(store: S) -> SharedStore<V>
where
    S: Store<V> + 'static,
{
    let store: Box<dyn Store<V>> = Box::new(store);
    Arc::new(RwLock::new(store))
}

// A panic while holding the guard cannot leave the map half-updated,
// so poisoned locks are recovered instead of propagated.
pub(crate) fn read_guard<V>(store: &SharedStore<V>) -> RwLockReadGuard<'_, Box<dyn Store<V>>> {
    store.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_guard<V>(store: &SharedStore<V>) -> RwLockWriteGuard<'_, Box<dyn Store<V>>> {
    store.write().unwrap_or_else(PoisonError::into_inner)
}
