//! # Cache Adapters
//!
//! Uniform backend interface consumed by a cache front-end, and the
//! volatile [`MemoryAdapter`] implementing it.
//!
//! ## Features
//!
//! * Deferred `read`, `write` and `delete`, run through a filter chain
//! * Immediate `clear`
//! * No expiry and no garbage collection
//!
//! ## Example
//!
//! ```rust
//! use cache_memory::{Adapter, MemoryAdapter, MemorySettings};
//!
//! let settings = MemorySettings {
//!     initial_capacity: 64,
//! };
//! let adapter = MemoryAdapter::<i64>::with_settings(settings);
//!
//! assert!(adapter.write("hits", 1, None).call().into_flag().unwrap());
//! assert_eq!(adapter.read("hits", None).call().into_value().unwrap(), Some(1));
//! ```

use crate::operation::{DeferredOperation, OperationKind};
use crate::params::{Conditions, Params};
use crate::store::{InMemoryStore, SharedStore, Store, read_guard, shared, write_guard};
use std::collections::HashMap;
use tracing::{debug, warn};

const INITIAL_CAPACITY_ENV: &str = "MEMORY_CACHE_INITIAL_CAPACITY";

/// Settings for configuring the memory adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySettings {
    /// Number of entries to pre-allocate room for. Never a bound.
    /// Default: 0
    pub initial_capacity: usize,
}

impl Default for MemorySettings {
    fn default() -> Self {
        let initial_capacity = match std::env::var(INITIAL_CAPACITY_ENV) {
            Ok(raw) => raw.parse::<usize>().unwrap_or_else(|_| {
                warn!("Ignoring invalid {}: {:?}", INITIAL_CAPACITY_ENV, raw);
                0
            }),
            Err(_) => 0,
        };

        Self { initial_capacity }
    }
}

/// Core trait defining a cache backend
///
/// `read`, `write` and `delete` return a [`DeferredOperation`] which does
/// nothing until invoked, normally as the innermost step of a
/// [`FilterChain`](crate::FilterChain). `conditions` are passed through
/// untouched for filters to interpret.
pub trait Adapter<V>: Send + Sync + std::fmt::Debug
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Yields the stored value, or `None` when the key is absent
    fn read(&self, key: &str, conditions: Option<Conditions>) -> DeferredOperation<V>;
    /// Yields `true` once `data` is stored under `key`
    fn write(&self, key: &str, data: V, conditions: Option<Conditions>) -> DeferredOperation<V>;
    /// Yields whether an entry existed and was removed
    fn delete(&self, key: &str, conditions: Option<Conditions>) -> DeferredOperation<V>;
    /// Empties the backend immediately
    fn clear(&self) -> bool;
    /// Whether the backend is usable
    fn enabled(&self) -> bool;
    /// Runs garbage collection; `false` when the backend has none
    fn clean(&self) -> bool;
}

/// Volatile, non-expiring cache scoped to the adapter's lifetime
///
/// Every entry lives until it is deleted, the adapter is cleared, or the
/// adapter is dropped. The store is never shared with another adapter.
#[derive(Debug)]
pub struct MemoryAdapter<V = serde_json::Value>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    settings: MemorySettings,
    store: SharedStore<V>,
}

impl<V> MemoryAdapter<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Creates an adapter configured from the environment, see
    /// [`MemorySettings::default`].
    pub fn new() -> Self {
        Self::with_settings(MemorySettings::default())
    }

    pub fn with_settings(settings: MemorySettings) -> Self {
        debug!("Initializing MemoryAdapter with settings: {:?}", settings);
        let store = InMemoryStore::with_capacity(settings.initial_capacity);
        Self {
            settings,
            store: shared(store),
        }
    }

    /// Backs the adapter with a caller-supplied store. The adapter takes
    /// ownership, so the store is still never shared with another adapter.
    pub fn with_store(store: impl Store<V> + 'static) -> Self {
        debug!("Initializing MemoryAdapter with store: {:?}", store);
        Self {
            settings: MemorySettings {
                initial_capacity: 0,
            },
            store: shared(store),
        }
    }

    pub fn settings(&self) -> &MemorySettings {
        &self.settings
    }

    /// Snapshot of the cached entries
    pub fn cache(&self) -> HashMap<String, V> {
        read_guard(&self.store).entries()
    }

    pub fn len(&self) -> usize {
        read_guard(&self.store).len()
    }

    pub fn is_empty(&self) -> bool {
        read_guard(&self.store).is_empty()
    }

    fn defer(&self, kind: OperationKind, params: Params<V>) -> DeferredOperation<V> {
        DeferredOperation::new(self.store.clone(), kind, params)
    }
}

impl<V> Default for MemoryAdapter<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Adapter<V> for MemoryAdapter<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn read(&self, key: &str, conditions: Option<Conditions>) -> DeferredOperation<V> {
        self.defer(
            OperationKind::Read,
            Params::new(key).with_conditions(conditions),
        )
    }

    fn write(&self, key: &str, data: V, conditions: Option<Conditions>) -> DeferredOperation<V> {
        self.defer(
            OperationKind::Write,
            Params::new(key)
                .with_data(data)
                .with_conditions(conditions),
        )
    }

    fn delete(&self, key: &str, conditions: Option<Conditions>) -> DeferredOperation<V> {
        self.defer(
            OperationKind::Delete,
            Params::new(key).with_conditions(conditions),
        )
    }

    fn clear(&self) -> bool {
        let mut store = write_guard(&self.store);
        debug!("Clearing {} cached entries", store.len());
        store.clear();
        true
    }

    // No external dependency can be unavailable
    fn enabled(&self) -> bool {
        true
    }

    // Nothing expires, so there is nothing to sweep
    fn clean(&self) -> bool {
        false
    }
}
