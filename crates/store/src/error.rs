//! Store-layer error model.

use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure talking to a durable store.
///
/// Authorization callers decide per-context whether to degrade (lenient role
/// resolution) or propagate (administrative actions).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A uniqueness or versioning conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced record does not exist.
    #[error("not found")]
    NotFound,
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
