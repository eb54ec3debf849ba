//! # Filter Chain
//!
//! Runs an ordered list of filters around a [`DeferredOperation`].
//!
//! The first registered filter is the outermost. Each filter receives the
//! parameter bag and a [`Next`] handle for the rest of the chain; it may
//! rewrite the bag, short-circuit by not calling `next`, or transform the
//! outcome on the way back out. The operation's terminal is always the
//! innermost step.
//!
//! ## Example
//!
//! ```rust
//! use cache_memory::{Adapter, FilterChain, MemoryAdapter, Outcome};
//! use serde_json::{Value, json};
//!
//! let adapter: MemoryAdapter = MemoryAdapter::new();
//! let chain = FilterChain::<Value>::new().with_fn(|_kind, mut params, next| {
//!     params.key = format!("app:{}", params.key);
//!     next.run(params)
//! });
//!
//! chain.run(adapter.write("user:1", json!("Ada"), None)).unwrap();
//! assert!(adapter.cache().contains_key("app:user:1"));
//! assert_eq!(
//!     chain.run(adapter.read("user:1", None)).unwrap(),
//!     Outcome::Value(Some(json!("Ada")))
//! );
//! ```

use crate::error::CacheError;
use crate::operation::{DeferredOperation, OperationKind, Outcome, Terminal};
use crate::params::Params;
use std::sync::Arc;
use tracing::trace;

/// Interceptor wrapped around an adapter operation
pub trait Filter<V>: Send + Sync
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn apply(
        &self,
        kind: OperationKind,
        params: Params<V>,
        next: Next<'_, V>,
    ) -> Result<Outcome<V>, CacheError>;
}

impl<V, F> Filter<V> for F
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
    F: Fn(OperationKind, Params<V>, Next<'_, V>) -> Result<Outcome<V>, CacheError> + Send + Sync,
{
    fn apply(
        &self,
        kind: OperationKind,
        params: Params<V>,
        next: Next<'_, V>,
    ) -> Result<Outcome<V>, CacheError> {
        (self)(kind, params, next)
    }
}

/// The remainder of a chain, ending in the operation's terminal
#[must_use]
pub struct Next<'a, V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    filters: &'a [Arc<dyn Filter<V>>],
    terminal: Terminal<V>,
}

impl<V> Next<'_, V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    /// Forwards `params` to the next link. Consumes the handle, so a filter
    /// can delegate at most once.
    pub fn run(self, params: Params<V>) -> Result<Outcome<V>, CacheError> {
        let filters = self.filters;
        match filters.split_first() {
            Some((filter, rest)) => {
                let kind = self.terminal.kind();
                trace!(%kind, key = %params.key, remaining = rest.len(), "applying filter");
                filter.apply(
                    kind,
                    params,
                    Next {
                        filters: rest,
                        terminal: self.terminal,
                    },
                )
            }
            None => Ok(self.terminal.invoke(params)),
        }
    }
}

/// Ordered list of filters applied to every operation it runs
#[derive(Clone)]
pub struct FilterChain<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    filters: Vec<Arc<dyn Filter<V>>>,
}

impl<V> std::fmt::Debug for FilterChain<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl<V> Default for FilterChain<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> FilterChain<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    pub fn with_filter(mut self, filter: impl Filter<V> + 'static) -> Self {
        self.push(filter);
        self
    }

    /// Closure form of [`FilterChain::with_filter`].
    pub fn with_fn<F>(self, filter: F) -> Self
    where
        F: Fn(OperationKind, Params<V>, Next<'_, V>) -> Result<Outcome<V>, CacheError>
            + Send
            + Sync
            + 'static,
    {
        self.with_filter(filter)
    }

    pub fn push(&mut self, filter: impl Filter<V> + 'static) {
        self.filters.push(Arc::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Runs `operation` through every filter, its terminal innermost.
    pub fn run(&self, operation: DeferredOperation<V>) -> Result<Outcome<V>, CacheError> {
        let (terminal, params) = operation.into_parts();
        Next {
            filters: self.filters.as_slice(),
            terminal,
        }
        .run(params)
    }
}
