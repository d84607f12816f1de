//! Store-wide reverse index over resolved values.

use std::collections::{BTreeSet, HashMap};

/// Maps each value to the keys whose resolved value it is.
///
/// Unlike a [`Layer`](crate::Layer)'s local index, this one reflects the
/// merged view across the whole stack. The owning store keeps it exact:
/// a key is listed under `v` iff `get(key) == Some(v)`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValueIndex {
    /// Value to keys mapping.
    entries: HashMap<String, BTreeSet<String>>,
    /// Total key count across all values.
    count: usize,
}

impl ValueIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from `(key, value)` pairs.
    pub fn rebuild<'a, I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.clear();
        for (key, value) in pairs {
            self.insert(value, key);
        }
    }

    /// Lists `key` under `value`. Returns false if it was already there.
    pub fn insert(&mut self, value: &str, key: &str) -> bool {
        let inserted = match self.entries.get_mut(value) {
            Some(keys) => keys.insert(key.to_owned()),
            None => {
                self.entries
                    .insert(value.to_owned(), BTreeSet::from([key.to_owned()]));
                true
            }
        };
        if inserted {
            self.count += 1;
        }
        inserted
    }

    /// Removes `key` from `value`. Returns false if it was not listed.
    pub fn remove(&mut self, value: &str, key: &str) -> bool {
        if let Some(keys) = self.entries.get_mut(value) {
            if keys.remove(key) {
                self.count -= 1;
                if keys.is_empty() {
                    self.entries.remove(value);
                }
                return true;
            }
        }
        false
    }

    /// Moves `key` from its old resolved value to its new one.
    pub fn relocate(&mut self, key: &str, old: Option<&str>, new: Option<&str>) {
        if old == new {
            return;
        }
        if let Some(old) = old {
            self.remove(old, key);
        }
        if let Some(new) = new {
            self.insert(new, key);
        }
    }

    /// Returns the number of keys listed under `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.entries.get(value).map_or(0, BTreeSet::len)
    }

    /// Returns the keys listed under `value`, in ascending order.
    #[must_use]
    pub fn keys(&self, value: &str) -> Vec<String> {
        self.entries
            .get(value)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns true if any key is listed under `value`.
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(value)
    }

    /// Returns the total number of indexed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if no key is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Clears the index.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut index = ValueIndex::new();
        assert!(index.insert("1", "b"));
        assert!(index.insert("1", "a"));

        assert_eq!(index.keys("1"), vec!["a", "b"]);
        assert_eq!(index.count("1"), 2);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn duplicate_insert_not_counted() {
        let mut index = ValueIndex::new();
        index.insert("1", "a");
        assert!(!index.insert("1", "a"));

        assert_eq!(index.len(), 1);
    }

    #[test]
    fn remove_drops_empty_values() {
        let mut index = ValueIndex::new();
        index.insert("1", "a");

        assert!(index.remove("1", "a"));
        assert!(!index.contains("1"));
        assert!(index.is_empty());
        assert!(!index.remove("1", "a"));
    }

    #[test]
    fn relocate_moves_key() {
        let mut index = ValueIndex::new();
        index.relocate("a", None, Some("1"));
        index.relocate("a", Some("1"), Some("2"));

        assert_eq!(index.count("1"), 0);
        assert_eq!(index.keys("2"), vec!["a"]);

        index.relocate("a", Some("2"), None);
        assert!(index.is_empty());
    }

    #[test]
    fn lookup_missing_value() {
        let index = ValueIndex::new();
        assert_eq!(index.count("x"), 0);
        assert!(index.keys("x").is_empty());
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut index = ValueIndex::new();
        index.insert("old", "z");
        index.rebuild([("a", "1"), ("b", "1"), ("c", "2")]);

        assert_eq!(index.len(), 3);
        assert!(!index.contains("old"));
        assert_eq!(index.keys("1"), vec!["a", "b"]);
    }
}
