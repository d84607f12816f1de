//! Value queries over the resolved view.

use super::{resolve, LayerStack};
use crate::config::QueryStrategy;
use crate::index::ValueIndex;
use std::collections::{btree_map, BTreeMap, BTreeSet};
use tracing::trace;

impl LayerStack {
    /// Returns the number of keys whose resolved value is `value`.
    ///
    /// Always equal to `self.find(value).len()`.
    #[must_use]
    pub fn counts(&self, value: &str) -> usize {
        self.stats.record_query();
        let strategy = self.config.query_strategy;
        let count = match strategy {
            QueryStrategy::ValueIndex => self.index.count(value),
            QueryStrategy::LayerIndex => self.layer_candidates(value).len(),
            QueryStrategy::FullScan => self
                .scan()
                .into_values()
                .filter(|resolved| *resolved == Some(value))
                .count(),
        };
        trace!(%strategy, count, "counts");
        count
    }

    /// Returns the keys whose resolved value is `value`, in ascending order.
    #[must_use]
    pub fn find(&self, value: &str) -> Vec<String> {
        self.stats.record_query();
        let strategy = self.config.query_strategy;
        let keys = match strategy {
            QueryStrategy::ValueIndex => self.index.keys(value),
            QueryStrategy::LayerIndex => self
                .layer_candidates(value)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            QueryStrategy::FullScan => self
                .scan()
                .into_iter()
                .filter(|(_, resolved)| *resolved == Some(value))
                .map(|(key, _)| key.to_owned())
                .collect(),
        };
        trace!(%strategy, found = keys.len(), "find");
        keys
    }

    /// Returns every key with a resolved value, flattened across all layers.
    #[must_use]
    pub fn resolved_view(&self) -> BTreeMap<String, String> {
        self.scan()
            .into_iter()
            .filter_map(|(key, resolved)| Some((key.to_owned(), resolved?.to_owned())))
            .collect()
    }

    /// Returns true if the value index matches a rebuild from the resolved view.
    #[must_use]
    pub fn index_is_consistent(&self) -> bool {
        let view = self.resolved_view();
        let mut rebuilt = ValueIndex::new();
        rebuilt.rebuild(view.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        rebuilt == self.index
    }

    /// Walks layers newest to oldest and keeps the first verdict per key.
    ///
    /// `None` marks a key whose deciding entry is a tombstone.
    fn scan(&self) -> BTreeMap<&str, Option<&str>> {
        let mut verdicts = BTreeMap::new();
        for layer in self.layers.iter().rev() {
            for (key, entry) in layer.iter() {
                if let btree_map::Entry::Vacant(slot) = verdicts.entry(key) {
                    slot.insert(entry.as_value());
                }
            }
        }
        verdicts
    }

    /// Keys any layer records as `value`, kept only if that is still their
    /// resolved value.
    fn layer_candidates(&self, value: &str) -> BTreeSet<&str> {
        self.layers
            .iter()
            .flat_map(|layer| layer.keys_with_value(value))
            .filter(|key| resolve(&self.layers, key) == Some(value))
            .collect()
    }
}
