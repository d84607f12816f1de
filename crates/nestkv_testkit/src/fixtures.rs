//! Test fixtures and store helpers.
//!
//! Provides convenience functions for building stores and replaying
//! operation sequences.

use crate::generators::StoreOp;
use nestkv_core::{LayerStack, QueryStrategy, StoreConfig};

/// Applies one operation to `store`, discarding any result.
pub fn apply(store: &mut LayerStack, op: &StoreOp) {
    match op {
        StoreOp::Set { key, value } => {
            let _ = store.set(key, value);
        }
        StoreOp::Unset { key } => {
            let _ = store.unset(key);
        }
        StoreOp::Get { key } => {
            let _ = store.get(key);
        }
        StoreOp::Counts { value } => {
            let _ = store.counts(value);
        }
        StoreOp::Find { value } => {
            let _ = store.find(value);
        }
        StoreOp::Begin => store.begin(),
        StoreOp::Commit => {
            let _ = store.commit();
        }
        StoreOp::Rollback => {
            let _ = store.rollback();
        }
    }
}

/// Applies every operation in order.
pub fn apply_all(store: &mut LayerStack, ops: &[StoreOp]) {
    for op in ops {
        apply(store, op);
    }
}

/// Creates one empty store per query strategy.
pub fn stores_for_each_strategy() -> Vec<LayerStack> {
    QueryStrategy::ALL
        .into_iter()
        .map(|strategy| LayerStack::with_config(StoreConfig::new().query_strategy(strategy)))
        .collect()
}

/// Runs `f` once against a fresh store for every query strategy.
///
/// # Example
///
/// ```rust
/// use nestkv_testkit::with_each_strategy;
///
/// with_each_strategy(|store| {
///     store.set("a", "1");
///     assert_eq!(store.counts("1"), 1);
/// });
/// ```
pub fn with_each_strategy<F>(mut f: F)
where
    F: FnMut(&mut LayerStack),
{
    for mut store in stores_for_each_strategy() {
        f(&mut store);
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// A store holding `a=1`, `b=1`, `c=2` in the base layer.
    pub fn abc_store(config: StoreConfig) -> LayerStack {
        let mut store = LayerStack::with_config(config);
        store.set("a", "1");
        store.set("b", "1");
        store.set("c", "2");
        store
    }

    /// A store with `depth` open transactions, where level `n` sets
    /// `key_0..key_{width}` to `n`.
    pub fn layered_store(config: StoreConfig, depth: usize, width: usize) -> LayerStack {
        let mut store = LayerStack::with_config(config);
        for level in 0..=depth {
            if level > 0 {
                store.begin();
            }
            let value = level.to_string();
            for i in 0..width {
                store.set(&format!("key_{i}"), &value);
            }
        }
        store
    }
}
