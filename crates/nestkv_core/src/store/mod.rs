//! The layered transactional store.
//!
//! A [`LayerStack`] holds one [`Layer`] per open transaction on top of a
//! permanent base layer. Writes always land in the topmost layer. Reads
//! resolve a key by walking layers from newest to oldest; the first layer
//! that mentions the key decides it, and a tombstone there means the key is
//! absent no matter what older layers hold.
//!
//! # Example
//!
//! ```rust
//! use nestkv_core::LayerStack;
//!
//! let mut store = LayerStack::new();
//! store.set("a", "1");
//!
//! store.begin();
//! store.unset("a");
//! assert_eq!(store.get("a"), None);
//!
//! store.rollback().unwrap();
//! assert_eq!(store.get("a"), Some("1"));
//! ```

mod query;
mod transaction;

use crate::config::StoreConfig;
use crate::index::ValueIndex;
use crate::layer::Layer;
use crate::stats::StoreStats;
use crate::types::Depth;
use tracing::debug;

/// An in-memory key-value store with nested transactions.
///
/// The stack always holds at least the base layer. The store-wide
/// [`ValueIndex`] is updated on every mutation so that it always equals the
/// reverse of the resolved view.
#[derive(Debug)]
pub struct LayerStack {
    /// Base layer first, innermost open transaction last. Never empty.
    layers: Vec<Layer>,
    /// Value to keys over resolved values.
    index: ValueIndex,
    /// Store configuration.
    config: StoreConfig,
    /// Operation counters.
    stats: StoreStats,
}

impl LayerStack {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Creates an empty store with the given configuration.
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            layers: vec![Layer::new()],
            index: ValueIndex::new(),
            config,
            stats: StoreStats::new(),
        }
    }

    /// Returns the store configuration.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &StoreStats {
        &self.stats
    }

    /// Writes `value` for `key` into the topmost layer.
    ///
    /// Returns the value `key` resolved to before the write.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.stats.record_set();
        let key = self.config.key_case.normalize(key);
        let old = resolve(&self.layers, &key).map(str::to_owned);

        self.top_mut().put(&key, value);
        self.index.relocate(&key, old.as_deref(), Some(value));
        debug!(key = %key, depth = self.depth().as_usize(), "set");
        old
    }

    /// Writes a tombstone for `key` into the topmost layer.
    ///
    /// Succeeds even if the key is already absent. Returns the value `key`
    /// resolved to before the delete.
    pub fn unset(&mut self, key: &str) -> Option<String> {
        self.stats.record_unset();
        let key = self.config.key_case.normalize(key);
        let old = resolve(&self.layers, &key).map(str::to_owned);

        self.top_mut().tombstone(&key);
        self.index.relocate(&key, old.as_deref(), None);
        debug!(key = %key, depth = self.depth().as_usize(), "unset");
        old
    }

    /// Returns the resolved value of `key`, or `None` if it is absent or deleted.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.stats.record_get();
        let key = self.config.key_case.normalize(key);
        resolve(&self.layers, &key)
    }

    /// Returns the number of open transactions.
    #[must_use]
    pub fn depth(&self) -> Depth {
        Depth::new(self.layers.len() - 1)
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.depth().in_transaction()
    }

    /// Returns every layer, base first.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the number of keys with a resolved value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no key has a resolved value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    fn top_mut(&mut self) -> &mut Layer {
        let top = self.layers.len() - 1;
        &mut self.layers[top]
    }
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `key` against `layers`: the newest layer mentioning it wins.
fn resolve<'a>(layers: &'a [Layer], key: &str) -> Option<&'a str> {
    layers
        .iter()
        .rev()
        .find_map(|layer| layer.entry(key))
        .and_then(|entry| entry.as_value())
}
