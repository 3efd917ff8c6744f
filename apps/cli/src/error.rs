//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Facture                                │
//! │                                                                         │
//! │  $ facture item add ...                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  CliResult<()>                                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Validation Error? ─── ValidationError ───────────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Store Error? ──────── StoreError ─────────────► CliError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "error [VALIDATION_ERROR] quantity must not be negative"      │
//! │  exit code: 3                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use facture_core::{CoreError, ValidationError};
use facture_store::{StorageError, StoreError};

// =============================================================================
// Exit Codes
// =============================================================================
// Scripts rely on these; never renumber.

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_VALIDATION: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_STORAGE: u8 = 5;
pub const EXIT_IMPORT: u8 = 6;

/// Error returned from commands.
///
/// ## Serialization
/// Serialized for scripts as:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Line item not found: 3f1c..."
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Invoice, item or client not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Bad arguments
    Usage,

    /// Database or file operation failed
    StorageError,

    /// Import document could not be read
    ImportError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// Process exit code for this error.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorCode::NotFound => EXIT_NOT_FOUND,
            ErrorCode::ValidationError => EXIT_VALIDATION,
            ErrorCode::Usage => EXIT_USAGE,
            ErrorCode::StorageError => EXIT_STORAGE,
            ErrorCode::ImportError => EXIT_IMPORT,
            ErrorCode::Internal => EXIT_ERROR,
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Error for commands that need a current invoice.
    pub fn no_current_invoice() -> Self {
        CliError::new(
            ErrorCode::NotFound,
            "No current invoice; run `facture new` or `facture load <id>` first",
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Usage, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.code.exit_code()
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => e.into(),
            other => CliError::validation(other.to_string()),
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Codec(e) => CliError::new(ErrorCode::ImportError, e.to_string()),
            StoreError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        tracing::error!("Storage failed: {}", err);
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::new(ErrorCode::Internal, err.to_string())
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;
