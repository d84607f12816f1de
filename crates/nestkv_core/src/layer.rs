//! A single transaction's pending delta.

use std::collections::hash_map;
use std::collections::{BTreeSet, HashMap};

/// What a layer records for a key it has touched.
///
/// A key missing from the layer's map is a third state: the layer has no
/// opinion and lookups fall through to the layer below. A [`Entry::Tombstone`]
/// stops that fall-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// The key holds this value.
    Value(String),
    /// The key was deleted at this layer.
    Tombstone,
}

impl Entry {
    /// Returns the value, or `None` for a tombstone.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Tombstone => None,
        }
    }

    /// Returns true if this entry is a tombstone.
    #[must_use]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone)
    }
}

/// Keys touched since a layer was opened, plus a reverse index over them.
///
/// The reverse index only describes this layer's own entries. It cannot say
/// whether a key is visible, since an upper layer may shadow it.
#[derive(Debug, Default, Clone)]
pub struct Layer {
    /// Key to value or tombstone.
    entries: HashMap<String, Entry>,
    /// Value to the keys in `entries` currently holding it.
    values: HashMap<String, BTreeSet<String>>,
    /// Number of tombstones in `entries`.
    tombstones: usize,
}

impl Layer {
    /// Creates an empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `key`, replacing anything this layer held for it.
    ///
    /// Returns the entry that was replaced.
    pub fn put(&mut self, key: &str, value: &str) -> Option<Entry> {
        self.values
            .entry(value.to_owned())
            .or_default()
            .insert(key.to_owned());
        let previous = self
            .entries
            .insert(key.to_owned(), Entry::Value(value.to_owned()));
        self.forget(key, previous.as_ref(), Some(value));
        previous
    }

    /// Records a tombstone for `key`.
    ///
    /// Returns the entry that was replaced.
    pub fn tombstone(&mut self, key: &str) -> Option<Entry> {
        let previous = self.entries.insert(key.to_owned(), Entry::Tombstone);
        self.tombstones += 1;
        self.forget(key, previous.as_ref(), None);
        previous
    }

    /// Records an entry, dispatching to [`Layer::put`] or [`Layer::tombstone`].
    pub fn record(&mut self, key: &str, entry: &Entry) -> Option<Entry> {
        match entry {
            Entry::Value(value) => self.put(key, value),
            Entry::Tombstone => self.tombstone(key),
        }
    }

    /// Drops bookkeeping for the entry `key` held before a write.
    ///
    /// `kept` is the value just written, which must stay indexed.
    fn forget(&mut self, key: &str, previous: Option<&Entry>, kept: Option<&str>) {
        match previous {
            Some(Entry::Value(old)) if Some(old.as_str()) != kept => {
                if let Some(keys) = self.values.get_mut(old) {
                    keys.remove(key);
                    if keys.is_empty() {
                        self.values.remove(old);
                    }
                }
            }
            Some(Entry::Tombstone) => self.tombstones -= 1,
            _ => {}
        }
    }

    /// Returns what this layer records for `key`, if anything.
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Returns true if this layer mentions `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in this layer whose entry is `value`, in ascending order.
    pub fn keys_with_value<'a>(&'a self, value: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.values
            .get(value)
            .into_iter()
            .flat_map(|keys| keys.iter().map(String::as_str))
    }

    /// Iterates over every entry in this layer, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Returns the number of keys this layer mentions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if this layer mentions no key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of tombstones in this layer.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.tombstones
    }

    /// Returns the number of distinct values in this layer.
    #[must_use]
    pub fn distinct_values(&self) -> usize {
        self.values.len()
    }
}

impl IntoIterator for Layer {
    type Item = (String, Entry);
    type IntoIter = hash_map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(layer: &Layer, value: &str) -> Vec<String> {
        layer.keys_with_value(value).map(str::to_owned).collect()
    }

    #[test]
    fn put_records_value() {
        let mut layer = Layer::new();
        assert_eq!(layer.put("a", "1"), None);

        assert_eq!(layer.entry("a"), Some(&Entry::Value("1".into())));
        assert_eq!(keys(&layer, "1"), vec!["a"]);
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn put_overwrites_previous() {
        let mut layer = Layer::new();
        layer.put("a", "1");
        let previous = layer.put("a", "2");

        assert_eq!(previous, Some(Entry::Value("1".into())));
        assert!(keys(&layer, "1").is_empty());
        assert_eq!(keys(&layer, "2"), vec!["a"]);
        assert_eq!(layer.distinct_values(), 1);
    }

    #[test]
    fn put_same_value_keeps_index() {
        let mut layer = Layer::new();
        layer.put("a", "1");
        layer.put("a", "1");

        assert_eq!(keys(&layer, "1"), vec!["a"]);
    }

    #[test]
    fn tombstone_is_not_absence() {
        let mut layer = Layer::new();
        layer.tombstone("a");

        assert!(layer.contains("a"));
        assert!(layer.entry("a").is_some_and(Entry::is_tombstone));
        assert_eq!(layer.tombstone_count(), 1);
        assert!(!layer.contains("b"));
    }

    #[test]
    fn tombstone_removes_from_index() {
        let mut layer = Layer::new();
        layer.put("a", "1");
        layer.put("b", "1");
        layer.tombstone("a");

        assert_eq!(keys(&layer, "1"), vec!["b"]);
        assert_eq!(layer.tombstone_count(), 1);
    }

    #[test]
    fn put_after_tombstone_clears_count() {
        let mut layer = Layer::new();
        layer.tombstone("a");
        layer.tombstone("a");
        assert_eq!(layer.tombstone_count(), 1);

        layer.put("a", "3");
        assert_eq!(layer.tombstone_count(), 0);
        assert_eq!(keys(&layer, "3"), vec!["a"]);
    }

    #[test]
    fn keys_with_value_sorted() {
        let mut layer = Layer::new();
        layer.put("c", "x");
        layer.put("a", "x");
        layer.put("b", "x");

        assert_eq!(keys(&layer, "x"), vec!["a", "b", "c"]);
        assert!(keys(&layer, "y").is_empty());
    }

    #[test]
    fn into_iter_yields_all_entries() {
        let mut layer = Layer::new();
        layer.put("a", "1");
        layer.tombstone("b");

        let mut entries: Vec<_> = layer.into_iter().collect();
        entries.sort_by(|x, y| x.0.cmp(&y.0));
        assert_eq!(
            entries,
            vec![
                ("a".to_string(), Entry::Value("1".into())),
                ("b".to_string(), Entry::Tombstone),
            ]
        );
    }
}
