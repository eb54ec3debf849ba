//! # Deferred Operations
//!
//! Adapter calls do not touch the store directly. Each `read`, `write` or
//! `delete` yields a [`DeferredOperation`]: a single-use unit of work that a
//! filter chain runs as its innermost step.
//!
//! A deferred operation is split into the seed [`Params`] (handed to the
//! first filter) and a [`Terminal`] (invoked with whatever bag reaches the
//! end of the chain).

use crate::error::CacheError;
use crate::params::Params;
use crate::store::{SharedStore, read_guard, write_guard};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Read,
    Write,
    Delete,
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperationKind::Read => write!(f, "read"),
            OperationKind::Write => write!(f, "write"),
            OperationKind::Delete => write!(f, "delete"),
        }
    }
}

/// Result produced by a terminal step, or substituted by a filter
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<V> {
    /// Read result; `None` means the key is absent
    Value(Option<V>),
    /// Write/delete success indicator
    Flag(bool),
}

impl<V> Outcome<V> {
    fn shape(&self) -> &'static str {
        match self {
            Outcome::Value(_) => "value",
            Outcome::Flag(_) => "flag",
        }
    }

    pub fn into_value(self) -> Result<Option<V>, CacheError> {
        match self {
            Outcome::Value(value) => Ok(value),
            other => Err(CacheError::UnexpectedOutcome {
                expected: "value",
                found: other.shape(),
            }),
        }
    }

    pub fn into_flag(self) -> Result<bool, CacheError> {
        match self {
            Outcome::Flag(flag) => Ok(flag),
            other => Err(CacheError::UnexpectedOutcome {
                expected: "flag",
                found: other.shape(),
            }),
        }
    }
}

/// The innermost link of a filter chain.
///
/// Holds a handle to the adapter's store, never a copy, so the mutation
/// happens when the chain reaches it rather than when it was created.
#[must_use]
#[derive(Debug)]
pub struct Terminal<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    store: SharedStore<V>,
    kind: OperationKind,
}

impl<V> Terminal<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Runs the operation against the store using `params` as it stands
    /// at the end of the chain. Consumes the terminal.
    pub fn invoke(self, params: Params<V>) -> Outcome<V> {
        trace!(kind = %self.kind, key = %params.key, "invoking terminal");
        match self.kind {
            OperationKind::Read => Outcome::Value(read_guard(&self.store).get(&params.key)),
            OperationKind::Write => match params.data {
                Some(data) => {
                    write_guard(&self.store).set(params.key, data);
                    Outcome::Flag(true)
                }
                None => {
                    trace!(key = %params.key, "write reached terminal without data");
                    Outcome::Flag(false)
                }
            },
            OperationKind::Delete => Outcome::Flag(write_guard(&self.store).remove(&params.key)),
        }
    }
}

/// A reified, not yet executed cache operation
#[must_use = "a deferred operation does nothing until run through a FilterChain or called"]
#[derive(Debug)]
pub struct DeferredOperation<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    terminal: Terminal<V>,
    params: Params<V>,
}

impl<V> DeferredOperation<V>
where
    V: Clone + Send + Sync + std::fmt::Debug + 'static,
{
    pub(crate) fn new(store: SharedStore<V>, kind: OperationKind, params: Params<V>) -> Self {
        Self {
            terminal: Terminal { store, kind },
            params,
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.terminal.kind
    }

    /// Parameters the operation was created with
    pub fn params(&self) -> &Params<V> {
        &self.params
    }

    pub fn into_parts(self) -> (Terminal<V>, Params<V>) {
        (self.terminal, self.params)
    }

    /// Invokes the terminal directly with the seed parameters.
    pub fn call(self) -> Outcome<V> {
        let (terminal, params) = self.into_parts();
        terminal.invoke(params)
    }
}
