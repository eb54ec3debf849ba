//! # Memory Cache Adapter
//!
//! A request-scoped, in-memory cache backend whose operations are
//! filterable.
//!
//! `read`, `write` and `delete` do not execute eagerly. Each returns a
//! [`DeferredOperation`] that a [`FilterChain`] runs as its innermost step,
//! after every registered [`Filter`] has had the chance to intercept the
//! call. `clear`, `enabled` and `clean` are immediate.
//!
//! Entries never expire and are never evicted: they live until deleted,
//! cleared, or until the adapter is dropped.
//!
//! ## Example
//!
//! ```rust
//! use cache_memory::{Adapter, FilterChain, MemoryAdapter, OperationKind, Outcome};
//! use serde_json::{Value, json};
//!
//! let adapter: MemoryAdapter = MemoryAdapter::new();
//! let chain = FilterChain::<Value>::new().with_fn(|kind, params, next| {
//!     if kind == OperationKind::Write && params.key.is_empty() {
//!         return Ok(Outcome::Flag(false));
//!     }
//!     next.run(params)
//! });
//!
//! let written = chain.run(adapter.write("user:1", json!({"name": "Ada"}), None));
//! assert!(written.unwrap().into_flag().unwrap());
//!
//! let read = chain.run(adapter.read("user:1", None)).unwrap();
//! assert_eq!(read.into_value().unwrap(), Some(json!({"name": "Ada"})));
//!
//! assert!(adapter.clear());
//! assert!(adapter.read("user:1", None).call().into_value().unwrap().is_none());
//! ```

pub mod adapter;
pub mod chain;
pub mod error;
pub mod operation;
pub mod params;
pub mod store;

pub use adapter::{Adapter, MemoryAdapter, MemorySettings};
pub use chain::{Filter, FilterChain, Next};
pub use error::CacheError;
pub use operation::{DeferredOperation, OperationKind, Outcome, Terminal};
pub use params::{Conditions, Params};
pub use store::{InMemoryStore, SharedStore, Store};
