//! Error types for nestkv core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in nestkv core operations.
///
/// Every read and write on the store is total; the only way an operation
/// can fail is asking to close a transaction when none is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `commit` or `rollback` was called while only the base layer exists.
    #[error("no active transaction")]
    NoActiveTransaction,
}

impl CoreError {
    /// Creates a no active transaction error.
    pub fn no_active_transaction() -> Self {
        Self::NoActiveTransaction
    }
}
