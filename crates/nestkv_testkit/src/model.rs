//! Reference model and differential checking.
//!
//! [`ReferenceModel`] keeps a full copy of the visible map per open
//! transaction. It is slow and obviously correct, which makes it a good
//! oracle for the layered store.

use crate::generators::StoreOp;
use nestkv_core::{KeyCase, LayerStack, StoreConfig};
use std::collections::BTreeMap;

/// A naive store: one complete snapshot per transaction level.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    snapshots: Vec<BTreeMap<String, String>>,
    key_case: KeyCase,
}

impl ReferenceModel {
    /// Creates an empty model.
    pub fn new(key_case: KeyCase) -> Self {
        Self {
            snapshots: vec![BTreeMap::new()],
            key_case,
        }
    }

    fn current(&self) -> &BTreeMap<String, String> {
        self.snapshots.last().expect("model always has a base snapshot")
    }

    fn current_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.snapshots
            .last_mut()
            .expect("model always has a base snapshot")
    }

    /// Writes a value.
    pub fn set(&mut self, key: &str, value: &str) {
        let key = self.key_case.normalize(key).into_owned();
        self.current_mut().insert(key, value.to_string());
    }

    /// Deletes a key.
    pub fn unset(&mut self, key: &str) {
        let key = self.key_case.normalize(key).into_owned();
        self.current_mut().remove(&key);
    }

    /// Reads a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = self.key_case.normalize(key);
        self.current().get(&*key).map(String::as_str)
    }

    /// Keys holding `value`, ascending.
    pub fn find(&self, value: &str) -> Vec<String> {
        self.current()
            .iter()
            .filter(|(_, v)| v.as_str() == value)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Opens a transaction.
    pub fn begin(&mut self) {
        let copy = self.current().clone();
        self.snapshots.push(copy);
    }

    /// Commits the innermost transaction. Returns false outside one.
    pub fn commit(&mut self) -> bool {
        if self.snapshots.len() == 1 {
            return false;
        }
        let top = self.snapshots.pop().expect("checked above");
        *self.current_mut() = top;
        true
    }

    /// Rolls back the innermost transaction. Returns false outside one.
    pub fn rollback(&mut self) -> bool {
        if self.snapshots.len() == 1 {
            return false;
        }
        self.snapshots.pop();
        true
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.snapshots.len() - 1
    }

    /// The full visible map.
    pub fn view(&self) -> &BTreeMap<String, String> {
        self.current()
    }
}

/// Applies `ops` to a fresh store and a fresh model, comparing every result.
///
/// After each operation the store's resolved view, depth and value index
/// are also checked. Returns a description of the first divergence.
pub fn run_differential(config: StoreConfig, ops: &[StoreOp]) -> Result<(), String> {
    let mut model = ReferenceModel::new(config.key_case);
    let mut store = LayerStack::with_config(config);

    for (step, op) in ops.iter().enumerate() {
        let fail = |what: String| Err(format!("step {step} ({op:?}): {what}"));
        match op {
            StoreOp::Set { key, value } => {
                store.set(key, value);
                model.set(key, value);
            }
            StoreOp::Unset { key } => {
                store.unset(key);
                model.unset(key);
            }
            StoreOp::Get { key } => {
                if store.get(key) != model.get(key) {
                    return fail(format!("get {:?} != {:?}", store.get(key), model.get(key)));
                }
            }
            StoreOp::Counts { value } => {
                let expected = model.find(value).len();
                if store.counts(value) != expected {
                    return fail(format!("counts {} != {expected}", store.counts(value)));
                }
            }
            StoreOp::Find { value } => {
                let expected = model.find(value);
                if store.find(value) != expected {
                    return fail(format!("find {:?} != {expected:?}", store.find(value)));
                }
            }
            StoreOp::Begin => {
                store.begin();
                model.begin();
            }
            StoreOp::Commit => {
                if store.commit().is_ok() != model.commit() {
                    return fail("commit outcome differs".into());
                }
            }
            StoreOp::Rollback => {
                if store.rollback().is_ok() != model.rollback() {
                    return fail("rollback outcome differs".into());
                }
            }
        }

        if store.depth().as_usize() != model.depth() {
            return fail(format!("depth {} != {}", store.depth(), model.depth()));
        }
        if &store.resolved_view() != model.view() {
            return fail(format!(
                "view {:?} != {:?}",
                store.resolved_view(),
                model.view()
            ));
        }
        if !store.index_is_consistent() {
            return fail("value index diverged from resolved view".into());
        }
    }
    Ok(())
}
