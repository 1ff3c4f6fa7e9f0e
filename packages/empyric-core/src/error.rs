//! Store error types.

use thiserror::Error;

use crate::query::QueryError;

/// Dataset store operation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// File open, permission or write failure
    #[error("I/O error: {0}")]
    Io(String),

    /// Disk full while committing a container
    #[error("Disk full: {0}")]
    DiskFull(String),

    /// Group or dataset path does not resolve
    #[error("Path '{path}' not found")]
    NotFound { path: String },

    /// Table/array schema mismatch during encode or decode
    #[error("Schema error: {0}")]
    Schema(String),

    /// Malformed group path or dataset name
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Container file failed integrity checks
    #[error("Container corrupted: {0}")]
    Corrupted(String),

    /// Container image could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Shared in-memory container lock poisoned
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Predicate parse or evaluation failure
    #[error(transparent)]
    Query(#[from] QueryError),
}

impl StoreError {
    /// Shorthand for a `NotFound` error on the given path.
    pub fn not_found(path: impl Into<String>) -> Self {
        StoreError::NotFound { path: path.into() }
    }
}

impl From<bincode::Error> for StoreError {
    fn from(err: bincode::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
