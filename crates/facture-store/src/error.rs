//! # Store Error Types
//!
//! Error types for persistence and import/export.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  rusqlite::Error / io::Error      serde_json::Error                    │
//! │       │                                 │                               │
//! │       ▼                                 ▼                               │
//! │  StorageError                      CodecError                           │
//! │       │                                 │                               │
//! │       └──────────────┬──────────────────┘                               │
//! │                      ▼                                                  │
//! │                 StoreError ← returned by InvoiceStore operations        │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │                 CliError (in the CLI) ← exit code + message             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A `StoreError` from a mutating operation never means the mutation was
//! lost: the in-memory state is already updated when persistence is tried.

use thiserror::Error;

/// Failures of the durable medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite rejected a statement or could not open the file.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Creating the database directory failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The medium refused the operation (used by test doubles).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failures turning state into text or back.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Input is not a valid export document.
    ///
    /// ## When This Occurs
    /// - Text is not JSON at all (`"not json"`)
    /// - Top level is not an object
    /// - An invoice or client has the wrong shape
    #[error("Malformed data: {0}")]
    Malformed(String),

    /// Serialization failed.
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Errors returned by [`crate::InvoiceStore`] operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl StoreError {
    /// True when the error came from the storage medium.
    pub fn is_storage(&self) -> bool {
        matches!(self, StoreError::Storage(_))
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
pub type CodecResult<T> = Result<T, CodecError>;
pub type StoreResult<T> = Result<T, StoreError>;
