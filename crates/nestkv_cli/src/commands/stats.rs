//! End-of-session statistics report.

use clap::ValueEnum;
use nestkv_core::LayerStack;
use serde::Serialize;
use std::io::{self, Write};

/// Output format for the statistics report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatsFormat {
    /// Human-readable lines.
    Text,
    /// A single JSON object.
    Json,
}

/// Store statistics at the end of a session.
#[derive(Debug, Serialize)]
pub struct StatsReport {
    /// Transactions still open.
    pub open_transactions: usize,
    /// Keys with a resolved value.
    pub live_keys: usize,
    /// Tombstones held across all layers.
    pub tombstones: usize,
    /// Query strategy in use.
    pub query_strategy: String,
    /// `get` calls.
    pub gets: u64,
    /// `set` calls.
    pub sets: u64,
    /// `unset` calls.
    pub unsets: u64,
    /// `counts` and `find` calls.
    pub queries: u64,
    /// Transactions started.
    pub begins: u64,
    /// Transactions committed.
    pub commits: u64,
    /// Transactions rolled back.
    pub rollbacks: u64,
    /// Commit or rollback calls with no open transaction.
    pub rejected: u64,
}

impl StatsReport {
    /// Collects a report from `store`.
    pub fn collect(store: &LayerStack) -> Self {
        let snap = store.stats().snapshot();
        Self {
            open_transactions: store.depth().as_usize(),
            live_keys: store.len(),
            tombstones: store.layers().iter().map(|l| l.tombstone_count()).sum(),
            query_strategy: store.config().query_strategy.to_string(),
            gets: snap.gets,
            sets: snap.sets,
            unsets: snap.unsets,
            queries: snap.queries,
            begins: snap.begins,
            commits: snap.commits,
            rollbacks: snap.rollbacks,
            rejected: snap.rejected,
        }
    }

    /// Writes the report in the requested format.
    pub fn write_to<W: Write>(&self, out: &mut W, format: StatsFormat) -> io::Result<()> {
        match format {
            StatsFormat::Json => {
                serde_json::to_writer_pretty(&mut *out, self)?;
                writeln!(out)
            }
            StatsFormat::Text => {
                writeln!(out, "=== nestkv session ===")?;
                writeln!(out, "Open transactions: {}", self.open_transactions)?;
                writeln!(out, "Live keys: {}", self.live_keys)?;
                writeln!(out, "Tombstones: {}", self.tombstones)?;
                writeln!(out, "Query strategy: {}", self.query_strategy)?;
                writeln!(
                    out,
                    "Operations: {} get, {} set, {} unset, {} query",
                    self.gets, self.sets, self.unsets, self.queries
                )?;
                writeln!(
                    out,
                    "Transactions: {} begun, {} committed, {} rolled back, {} rejected",
                    self.begins, self.commits, self.rollbacks, self.rejected
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> LayerStack {
        let mut store = LayerStack::new();
        store.set("a", "1");
        store.unset("b");
        store.begin();
        store.set("c", "2");
        store
    }

    #[test]
    fn collect_counts_state() {
        let report = StatsReport::collect(&sample_store());
        assert_eq!(report.open_transactions, 1);
        assert_eq!(report.live_keys, 2);
        assert_eq!(report.tombstones, 1);
        assert_eq!(report.sets, 2);
        assert_eq!(report.query_strategy, "value-index");
    }

    #[test]
    fn json_output_parses() {
        let report = StatsReport::collect(&sample_store());
        let mut out = Vec::new();
        report.write_to(&mut out, StatsFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["live_keys"], 2);
        assert_eq!(value["begins"], 1);
    }

    #[test]
    fn text_output() {
        let report = StatsReport::collect(&sample_store());
        let mut out = Vec::new();
        report.write_to(&mut out, StatsFormat::Text).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Live keys: 2"));
        assert!(text.contains("1 begun"));
    }
}
