//! Benchmark utilities.

#![warn(missing_docs)]

use nestkv_core::{LayerStack, StoreConfig};
use rand::Rng;

/// Generates `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("key_{i:06}")).collect()
}

/// Picks a random value out of `distinct` possibilities.
pub fn random_value<R: Rng>(rng: &mut R, distinct: usize) -> String {
    rng.gen_range(0..distinct.max(1)).to_string()
}

/// Builds a store with `keys` in the base layer and `depth` open
/// transactions, each overwriting a random tenth of the keys and deleting
/// a random twentieth.
pub fn populated_store(
    config: StoreConfig,
    keys: &[String],
    depth: usize,
    distinct: usize,
) -> LayerStack {
    let mut rng = rand::thread_rng();
    let mut store = LayerStack::with_config(config);
    for key in keys {
        store.set(key, &random_value(&mut rng, distinct));
    }
    for _ in 0..depth {
        store.begin();
        for key in keys {
            match rng.gen_range(0..20) {
                0 => {
                    store.unset(key);
                }
                1 | 2 => {
                    store.set(key, &random_value(&mut rng, distinct));
                }
                _ => {}
            }
        }
    }
    store
}
