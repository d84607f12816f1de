//! Store statistics.
//!
//! Counters for every operation on a [`LayerStack`](crate::LayerStack).
//!
//! # Usage
//!
//! ```rust
//! use nestkv_core::LayerStack;
//!
//! let mut store = LayerStack::new();
//! store.set("a", "1");
//! let _ = store.get("a");
//!
//! let stats = store.stats().snapshot();
//! assert_eq!(stats.sets, 1);
//! assert_eq!(stats.gets, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Store statistics.
///
/// Counters are atomic so that read-only operations taking `&self` can
/// record themselves. All values are monotonically increasing until
/// [`StoreStats::reset`].
#[derive(Debug, Default)]
pub struct StoreStats {
    // Operation counters
    /// Total number of `get` calls.
    gets: AtomicU64,
    /// Total number of `set` calls.
    sets: AtomicU64,
    /// Total number of `unset` calls.
    unsets: AtomicU64,
    /// Total number of `counts` and `find` calls.
    queries: AtomicU64,

    // Transaction counters
    /// Total number of transactions started.
    begins: AtomicU64,
    /// Total number of transactions committed.
    commits: AtomicU64,
    /// Total number of transactions rolled back.
    rollbacks: AtomicU64,
    /// Commit or rollback attempts with no open transaction.
    rejected: AtomicU64,
}

impl StoreStats {
    /// Creates a new stats instance.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_get(&self) {
        self.gets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_set(&self) {
        self.sets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_unset(&self) {
        self.unsets.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_query(&self) {
        self.queries.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_begin(&self) {
        self.begins.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of `get` calls.
    pub fn gets(&self) -> u64 {
        self.gets.load(Ordering::Relaxed)
    }

    /// Returns the total number of `set` calls.
    pub fn sets(&self) -> u64 {
        self.sets.load(Ordering::Relaxed)
    }

    /// Returns the total number of `unset` calls.
    pub fn unsets(&self) -> u64 {
        self.unsets.load(Ordering::Relaxed)
    }

    /// Returns the total number of value queries.
    pub fn queries(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions started.
    pub fn begins(&self) -> u64 {
        self.begins.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions committed.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the total number of transactions rolled back.
    pub fn rollbacks(&self) -> u64 {
        self.rollbacks.load(Ordering::Relaxed)
    }

    /// Returns the number of commit or rollback calls made outside a transaction.
    pub fn rejected(&self) -> u64 {
        self.rejected.load(Ordering::Relaxed)
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        for counter in [
            &self.gets,
            &self.sets,
            &self.unsets,
            &self.queries,
            &self.begins,
            &self.commits,
            &self.rollbacks,
            &self.rejected,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Returns a snapshot of all stats.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            gets: self.gets(),
            sets: self.sets(),
            unsets: self.unsets(),
            queries: self.queries(),
            begins: self.begins(),
            commits: self.commits(),
            rollbacks: self.rollbacks(),
            rejected: self.rejected(),
        }
    }
}

/// A point-in-time copy of [`StoreStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of `get` calls.
    pub gets: u64,
    /// Total number of `set` calls.
    pub sets: u64,
    /// Total number of `unset` calls.
    pub unsets: u64,
    /// Total number of value queries.
    pub queries: u64,
    /// Total number of transactions started.
    pub begins: u64,
    /// Total number of transactions committed.
    pub commits: u64,
    /// Total number of transactions rolled back.
    pub rollbacks: u64,
    /// Commit or rollback calls made outside a transaction.
    pub rejected: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let stats = StoreStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn record_operations() {
        let stats = StoreStats::new();

        stats.record_get();
        stats.record_get();
        stats.record_set();
        stats.record_unset();
        stats.record_query();

        let snap = stats.snapshot();
        assert_eq!(snap.gets, 2);
        assert_eq!(snap.sets, 1);
        assert_eq!(snap.unsets, 1);
        assert_eq!(snap.queries, 1);
    }

    #[test]
    fn record_transactions() {
        let stats = StoreStats::new();

        stats.record_begin();
        stats.record_begin();
        stats.record_commit();
        stats.record_rollback();
        stats.record_rejected();

        assert_eq!(stats.begins(), 2);
        assert_eq!(stats.commits(), 1);
        assert_eq!(stats.rollbacks(), 1);
        assert_eq!(stats.rejected(), 1);
    }

    #[test]
    fn reset_clears_counters() {
        let stats = StoreStats::new();
        stats.record_set();
        stats.record_begin();

        stats.reset();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }
}
