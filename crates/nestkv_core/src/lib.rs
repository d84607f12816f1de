//! # nestkv Core
//!
//! In-memory key-value store with nested transactions.
//!
//! This crate provides:
//! - [`Layer`]: one transaction's pending delta, with tombstones
//! - [`LayerStack`]: the transactional store (`get`, `set`, `unset`,
//!   `counts`, `find`, `begin`, `commit`, `rollback`)
//! - [`ValueIndex`]: the store-wide reverse index over resolved values
//! - [`StoreConfig`]: key case policy and query strategy
//! - [`StoreStats`]: operation counters
//!
//! The store is single-owner and synchronous. Callers that need to share
//! it across threads must wrap the whole stack in their own lock.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod index;
mod layer;
mod stats;
mod store;
mod types;

pub use config::{KeyCase, QueryStrategy, StoreConfig};
pub use error::{CoreError, CoreResult};
pub use index::ValueIndex;
pub use layer::{Entry, Layer};
pub use stats::{StatsSnapshot, StoreStats};
pub use store::LayerStack;
pub use types::{Depth, NULL};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
