//! Parameter bag threaded through a filter chain.

use std::collections::HashMap;

/// Opaque conditions supplied alongside an operation.
///
/// Adapters carry them through untouched; only filters and the front-end
/// give them meaning.
pub type Conditions = HashMap<String, serde_json::Value>;

/// The chain's accumulated parameters for one operation.
///
/// Filters may rewrite any field before forwarding. The terminal step reads
/// `key` and `data` from the bag it receives when it is invoked, not from
/// the values the operation was created with.
#[derive(Debug, Clone, PartialEq)]
pub struct Params<V> {
    pub key: String,
    /// Value to store; only set for writes
    pub data: Option<V>,
    pub conditions: Option<Conditions>,
}

impl<V> Params<V> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            data: None,
            conditions: None,
        }
    }

    pub fn with_data(mut self, data: V) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_conditions(mut self, conditions: Option<Conditions>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Looks up a single condition by name.
    pub fn condition(&self, name: &str) -> Option<&serde_json::Value> {
        self.conditions.as_ref().and_then(|c| c.get(name))
    }
}
