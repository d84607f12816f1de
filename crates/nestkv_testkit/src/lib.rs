//! # nestkv Testkit
//!
//! Test utilities for nestkv.
//!
//! This crate provides:
//! - Store fixtures and replay helpers
//! - Property-based test generators using proptest
//! - A snapshot-per-level reference model for differential testing
//! - Fuzz testing harnesses
//!
//! ## Usage
//!
//! ```rust
//! use nestkv_testkit::prelude::*;
//!
//! let ops = vec![StoreOp::Begin, StoreOp::Commit];
//! run_differential(Default::default(), &ops).unwrap();
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod fuzz;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::fuzz::*;
    pub use crate::generators::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use fuzz::*;
pub use generators::*;
pub use model::*;
