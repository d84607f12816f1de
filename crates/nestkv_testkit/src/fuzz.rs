//! Fuzz testing harnesses for nestkv.
//!
//! This module provides fuzz targets that can be used with cargo-fuzz
//! or other fuzzing frameworks. Each target turns raw bytes into a
//! sequence of store operations.

use crate::generators::StoreOp;
use crate::model::run_differential;
use nestkv_core::{KeyCase, QueryStrategy, StoreConfig};

const KEYS: [&str; 6] = ["a", "b", "c", "A", "B", "C"];
const VALUES: [&str; 4] = ["0", "1", "2", "3"];

impl StoreOp {
    /// Decodes fuzzer input into operations.
    ///
    /// Each byte selects an operation with its low 3 bits; the remaining
    /// bits pick the key or value. A set consumes the following byte as its
    /// value selector.
    pub fn decode_sequence(data: &[u8]) -> Vec<StoreOp> {
        let mut ops = Vec::with_capacity(data.len());
        let mut bytes = data.iter().copied();

        while let Some(byte) = bytes.next() {
            let operand = usize::from(byte >> 3);
            let key = KEYS[operand % KEYS.len()].to_string();
            let value = VALUES[operand % VALUES.len()].to_string();

            let op = match byte & 0b111 {
                0 => {
                    let Some(next) = bytes.next() else { break };
                    StoreOp::Set {
                        key,
                        value: VALUES[usize::from(next) % VALUES.len()].to_string(),
                    }
                }
                1 => StoreOp::Unset { key },
                2 => StoreOp::Get { key },
                3 => StoreOp::Counts { value },
                4 => StoreOp::Find { value },
                5 => StoreOp::Begin,
                6 => StoreOp::Commit,
                _ => StoreOp::Rollback,
            };
            ops.push(op);
        }
        ops
    }
}

/// Fuzz target for store operations.
///
/// Replays the decoded operations against the store under every query
/// strategy and key policy, and panics on the first divergence from the
/// reference model.
pub fn fuzz_store_operations(data: &[u8]) {
    let ops = StoreOp::decode_sequence(data);
    for key_case in [KeyCase::Sensitive, KeyCase::Insensitive] {
        for strategy in QueryStrategy::ALL {
            let config = StoreConfig::new()
                .key_case(key_case)
                .query_strategy(strategy);
            if let Err(divergence) = run_differential(config, &ops) {
                panic!("{key_case:?}/{strategy}: {divergence}");
            }
        }
    }
}
