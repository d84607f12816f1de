//! Core type definitions for nestkv.

use std::fmt;

/// Rendering of an absent or deleted key, as shown to users.
pub const NULL: &str = "NULL";

/// Number of transactions currently open on a store.
///
/// Depth 0 means only the base layer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Depth(pub usize);

impl Depth {
    /// Depth of a store with no open transaction.
    pub const BASE: Self = Self(0);

    /// Creates a new depth.
    #[must_use]
    pub const fn new(depth: usize) -> Self {
        Self(depth)
    }

    /// Returns the raw depth value.
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// Returns true if at least one transaction is open.
    #[must_use]
    pub const fn in_transaction(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "depth:{}", self.0)
    }
}
