//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from small alphabets so that random sequences
//! collide often: the interesting cases are overwrites, shadowing and
//! deletes of keys that older layers still hold.

use proptest::prelude::*;

/// One operation against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    /// Write a value.
    Set {
        /// Key
        key: String,
        /// Value
        value: String,
    },
    /// Delete a key.
    Unset {
        /// Key
        key: String,
    },
    /// Read a key.
    Get {
        /// Key
        key: String,
    },
    /// Count keys holding a value.
    Counts {
        /// Value
        value: String,
    },
    /// List keys holding a value.
    Find {
        /// Value
        value: String,
    },
    /// Open a transaction.
    Begin,
    /// Merge the innermost transaction into its parent.
    Commit,
    /// Discard the innermost transaction.
    Rollback,
}

/// Strategy for generating keys from a small lowercase alphabet.
pub fn key_strategy() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec!["a", "b", "c", "d", "e", "f"]).prop_map(str::to_string)
}

/// Strategy for generating keys that differ only in case.
pub fn mixed_case_key_strategy() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec!["a", "b", "c", "A", "B", "C"]).prop_map(str::to_string)
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = String> + Clone {
    prop::sample::select(vec!["0", "1", "2", "3"]).prop_map(str::to_string)
}

/// Strategy for generating store operations over the given keys.
pub fn store_op_strategy<K>(keys: K) -> impl Strategy<Value = StoreOp>
where
    K: Strategy<Value = String> + Clone + 'static,
{
    prop_oneof![
        4 => (keys.clone(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        2 => keys.clone().prop_map(|key| StoreOp::Unset { key }),
        1 => keys.prop_map(|key| StoreOp::Get { key }),
        1 => value_strategy().prop_map(|value| StoreOp::Counts { value }),
        1 => value_strategy().prop_map(|value| StoreOp::Find { value }),
        2 => Just(StoreOp::Begin),
        1 => Just(StoreOp::Commit),
        1 => Just(StoreOp::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(key_strategy()), min_ops..max_ops)
}

/// Strategy for generating a sequence of operations with mixed-case keys.
pub fn mixed_case_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(mixed_case_key_strategy()), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn keys_are_single_lowercase(key in key_strategy()) {
            prop_assert_eq!(key.len(), 1);
            prop_assert!(key.chars().all(|c| c.is_ascii_lowercase()));
        }

        #[test]
        fn values_are_digits(value in value_strategy()) {
            prop_assert!(value.chars().all(|c| c.is_ascii_digit()));
        }

        #[test]
        fn mixed_case_keys_come_from_both_cases(key in mixed_case_key_strategy()) {
            prop_assert!(["a", "b", "c", "A", "B", "C"].contains(&key.as_str()));
        }

        #[test]
        fn sequence_length_in_range(ops in operation_sequence_strategy(5, 10)) {
            prop_assert!((5..10).contains(&ops.len()));
        }
    }
}
