//! Opening, committing and discarding transaction layers.

use super::{resolve, LayerStack};
use crate::error::{CoreError, CoreResult};
use crate::layer::Layer;
use tracing::debug;

impl LayerStack {
    /// Opens a nested transaction by pushing an empty layer.
    pub fn begin(&mut self) {
        self.stats.record_begin();
        self.layers.push(Layer::new());
        debug!(depth = self.depth().as_usize(), "begin");
    }

    /// Discards the innermost transaction.
    ///
    /// Every key the discarded layer mentioned goes back to whatever the
    /// remaining layers resolve it to. Layers below are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] and leaves the store
    /// unchanged if only the base layer exists.
    pub fn rollback(&mut self) -> CoreResult<()> {
        let Some(discarded) = self.pop_transaction() else {
            return Err(CoreError::no_active_transaction());
        };

        let touched = discarded.len();
        for (key, entry) in discarded {
            self.index
                .relocate(&key, entry.as_value(), resolve(&self.layers, &key));
        }

        self.stats.record_rollback();
        debug!(depth = self.depth().as_usize(), touched, "rollback");
        Ok(())
    }

    /// Merges the innermost transaction into its parent.
    ///
    /// Each entry of the committed layer overwrites the parent's entry for
    /// that key. Tombstones are carried over as tombstones, never as removals,
    /// so a deletion keeps hiding older values after the merge. A tombstone
    /// that reaches the base layer stays there for the store's lifetime.
    ///
    /// The resolved view is the same before and after, so the value index is
    /// left alone.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoActiveTransaction`] and leaves the store
    /// unchanged if only the base layer exists.
    pub fn commit(&mut self) -> CoreResult<()> {
        let Some(committed) = self.pop_transaction() else {
            return Err(CoreError::no_active_transaction());
        };

        let merged = committed.len();
        let parent = self.top_mut();
        for (key, entry) in committed {
            parent.record(&key, &entry);
        }

        self.stats.record_commit();
        debug!(depth = self.depth().as_usize(), merged, "commit");
        Ok(())
    }

    /// Pops the topmost layer unless it is the base.
    fn pop_transaction(&mut self) -> Option<Layer> {
        if self.layers.len() == 1 {
            self.stats.record_rejected();
            debug!("no active transaction");
            return None;
        }
        self.layers.pop()
    }
}
