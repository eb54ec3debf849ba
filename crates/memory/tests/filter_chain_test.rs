use assert2::{assert, let_assert};
use cache_memory::{
    Adapter, CacheError, Conditions, Filter, FilterChain, MemoryAdapter, Next, OperationKind,
    Outcome, Params,
};
use serde_json::{Value, json};
use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use test_log::test;

/// Prefixes every key with a namespace before it reaches the store
struct Namespace(&'static str);

impl Filter<Value> for Namespace {
    fn apply(
        &self,
        _kind: OperationKind,
        mut params: Params<Value>,
        next: Next<'_, Value>,
    ) -> Result<Outcome<Value>, CacheError> {
        params.key = format!("{}:{}", self.0, params.key);
        next.run(params)
    }
}

/// Counts lookups that miss
#[derive(Clone, Default)]
struct MissCounter {
    misses: Arc<AtomicUsize>,
}

impl Filter<Value> for MissCounter {
    fn apply(
        &self,
        kind: OperationKind,
        params: Params<Value>,
        next: Next<'_, Value>,
    ) -> Result<Outcome<Value>, CacheError> {
        let outcome = next.run(params)?;
        if kind == OperationKind::Read && outcome == Outcome::Value(None) {
            self.misses.fetch_add(1, Ordering::SeqCst);
        }
        Ok(outcome)
    }
}

#[test]
fn test_rewritten_key_reaches_store() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new().with_filter(Namespace("tenant-a"));

    let_assert!(Ok(Outcome::Flag(true)) = chain.run(adapter.write("user:1", json!(1), None)));
    assert!(adapter.cache().contains_key("tenant-a:user:1"));
    assert!(!adapter.cache().contains_key("user:1"));

    // Bypassing the chain looks at the raw key
    let_assert!(Ok(None) = adapter.read("user:1", None).call().into_value());
    let found = chain
        .run(adapter.read("user:1", None))
        .and_then(Outcome::into_value);
    let_assert!(Ok(Some(value)) = found);
    assert!(value == json!(1));

    let_assert!(Ok(Outcome::Flag(true)) = chain.run(adapter.delete("user:1", None)));
    assert!(adapter.is_empty());
}

#[test]
fn test_filter_reads_conditions() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new().with_fn(|kind, params, next| {
        let frozen = params.condition("frozen") == Some(&json!(true));
        if frozen && kind != OperationKind::Read {
            return Ok(Outcome::Flag(false));
        }
        next.run(params)
    });
    let frozen = Conditions::from([("frozen".to_string(), json!(true))]);

    let written = chain.run(adapter.write("key1", json!("v"), Some(frozen.clone())));
    let_assert!(Ok(Outcome::Flag(false)) = written);
    assert!(adapter.is_empty());

    let written = chain.run(adapter.write("key1", json!("v"), None));
    let_assert!(Ok(Outcome::Flag(true)) = written);
    let deleted = chain.run(adapter.delete("key1", Some(frozen.clone())));
    let_assert!(Ok(Outcome::Flag(false)) = deleted);
    let found = chain.run(adapter.read("key1", Some(frozen)));
    let_assert!(Ok(Outcome::Value(Some(_))) = found);
}

#[test]
fn test_filter_can_replace_written_data() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new().with_fn(|kind, mut params, next| {
        if kind == OperationKind::Write {
            params.data = params.data.map(|data| json!({ "wrapped": data }));
        }
        next.run(params)
    });

    chain.run(adapter.write("key1", json!(7), None)).unwrap();
    let_assert!(Ok(Some(value)) = adapter.read("key1", None).call().into_value());
    assert!(value == json!({"wrapped": 7}));
}

#[test]
fn test_filter_dropping_data_fails_write() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new().with_fn(|_, mut params, next| {
        params.data = None;
        next.run(params)
    });

    let written = chain
        .run(adapter.write("key1", json!(7), None))
        .and_then(Outcome::into_flag);
    let_assert!(Ok(false) = written);
    assert!(adapter.is_empty());
}

#[test]
fn test_stateful_filter_observes_outcomes() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let counter = MissCounter::default();
    let chain = FilterChain::<Value>::new()
        .with_filter(Namespace("app"))
        .with_filter(counter.clone());

    chain.run(adapter.read("key1", None)).unwrap();
    chain.run(adapter.write("key1", json!(1), None)).unwrap();
    chain.run(adapter.read("key1", None)).unwrap();
    chain.run(adapter.read("key2", None)).unwrap();

    assert!(counter.misses.load(Ordering::SeqCst) == 2);
}

#[test]
fn test_misused_outcome_is_reported() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new();

    let result = chain
        .run(adapter.read("key1", None))
        .and_then(Outcome::into_flag);
    let_assert!(Err(CacheError::UnexpectedOutcome { expected, found }) = result);
    assert!(expected == "flag");
    assert!(found == "value");
}

#[test]
fn test_boxed_filter_error_propagates() {
    let adapter: MemoryAdapter = MemoryAdapter::new();
    let chain = FilterChain::<Value>::new().with_fn(|kind, params, next| {
        if kind == OperationKind::Delete {
            let refused: Result<(), Box<dyn Error + Send + Sync>> = Err("denied".into());
            refused?;
        }
        next.run(params)
    });

    let written = chain.run(adapter.write("key1", json!(1), None));
    let_assert!(Ok(Outcome::Flag(true)) = written);

    let deleted = chain.run(adapter.delete("key1", None));
    assert!(deleted == Err(CacheError::Filter("denied".to_string())));
    assert!(adapter.len() == 1);
}

#[test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
async fn test_concurrent_writers_share_one_store() {
    let adapter: Arc<MemoryAdapter> = Arc::new(MemoryAdapter::new());
    let chain = Arc::new(FilterChain::<Value>::new().with_filter(Namespace("task")));

    let mut handles = Vec::new();
    for task in 0..8 {
        let adapter = adapter.clone();
        let chain = chain.clone();
        handles.push(tokio::spawn(async move {
            (0..100).all(|i| {
                let key = format!("{task}:{i}");
                chain.run(adapter.write(&key, json!(i), None)) == Ok(Outcome::Flag(true))
            })
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    assert!(adapter.len() == 800);
    let found = chain
        .run(adapter.read("7:99", None))
        .and_then(Outcome::into_value);
    let_assert!(Ok(Some(value)) = found);
    assert!(value == json!(99));
}
