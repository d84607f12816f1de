//! Store configuration.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// How keys are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyCase {
    /// Keys are used exactly as given.
    #[default]
    Sensitive,
    /// Keys are lowercased before every lookup and write. Values are never touched.
    Insensitive,
}

impl KeyCase {
    /// Normalizes a key according to this policy.
    pub fn normalize<'a>(self, key: &'a str) -> Cow<'a, str> {
        match self {
            Self::Sensitive => Cow::Borrowed(key),
            Self::Insensitive if key.chars().flat_map(char::to_lowercase).eq(key.chars()) => {
                Cow::Borrowed(key)
            }
            Self::Insensitive => Cow::Owned(key.to_lowercase()),
        }
    }
}

/// Algorithm used to answer `counts` and `find`.
///
/// All strategies return identical results; they differ only in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStrategy {
    /// Read the store-wide value index, maintained on every mutation.
    #[default]
    ValueIndex,
    /// Collect candidates from each layer's local index and confirm each
    /// against the resolved value.
    LayerIndex,
    /// Flatten every layer newest to oldest; the first layer mentioning a
    /// key decides it.
    FullScan,
}

impl QueryStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 3] = [Self::ValueIndex, Self::LayerIndex, Self::FullScan];

    /// Returns the kebab-case name of the strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValueIndex => "value-index",
            Self::LayerIndex => "layer-index",
            Self::FullScan => "full-scan",
        }
    }
}

impl fmt::Display for QueryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown query strategy: {s}"))
    }
}

/// Configuration for creating a store.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Key comparison policy.
    pub key_case: KeyCase,

    /// Algorithm for value queries.
    pub query_strategy: QueryStrategy,
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key comparison policy.
    #[must_use]
    pub const fn key_case(mut self, value: KeyCase) -> Self {
        self.key_case = value;
        self
    }

    /// Sets the value query algorithm.
    #[must_use]
    pub const fn query_strategy(mut self, value: QueryStrategy) -> Self {
        self.query_strategy = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.key_case, KeyCase::Sensitive);
        assert_eq!(config.query_strategy, QueryStrategy::ValueIndex);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new()
            .key_case(KeyCase::Insensitive)
            .query_strategy(QueryStrategy::FullScan);

        assert_eq!(config.key_case, KeyCase::Insensitive);
        assert_eq!(config.query_strategy, QueryStrategy::FullScan);
    }

    #[test]
    fn normalize_keys() {
        assert_eq!(KeyCase::Sensitive.normalize("Ab"), "Ab");
        assert_eq!(KeyCase::Insensitive.normalize("Ab"), "ab");
        assert!(matches!(
            KeyCase::Insensitive.normalize("ab"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn parse_strategy() {
        assert_eq!(
            "layer-index".parse::<QueryStrategy>(),
            Ok(QueryStrategy::LayerIndex)
        );
        assert_eq!(
            "FULL-SCAN".parse::<QueryStrategy>(),
            Ok(QueryStrategy::FullScan)
        );
        assert!("btree".parse::<QueryStrategy>().is_err());
    }
}
