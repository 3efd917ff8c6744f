//! # Error Types
//!
//! Domain-specific error types for facture-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  facture-core errors (this file)                                       │
//! │  ├── CoreError        - Parsing and domain errors                      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  facture-store errors (separate crate)                                 │
//! │  └── StoreError       - Persistence and import/export failures         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - What the user sees (code + message)            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absent-target operations (removing an item that is not there, loading an
//! unknown invoice) are NOT errors anywhere in Facture. They are silent no-ops.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A monetary amount or quantity could not be parsed.
    #[error("Invalid {field}: '{value}' is not a decimal number")]
    InvalidDecimal { field: String, value: String },

    /// Unknown tax category name (hosts parsing user input).
    ///
    /// Persisted and imported documents never produce this: unknown
    /// categories there fall back to `exempt`.
    #[error("Unknown tax category: {0}")]
    UnknownTaxCategory(String),

    /// Unknown invoice status name.
    #[error("Unknown invoice status: {0}")]
    UnknownStatus(String),

    /// Unknown language code.
    #[error("Unknown language: {0} (expected 'ar' or 'fr')")]
    UnknownLanguage(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Hosts validate before calling the store; the store itself never rejects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: String, max: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidDecimal {
            field: "quantity".to_string(),
            value: "two".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid quantity: 'two' is not a decimal number"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "description".to_string(),
        };
        assert_eq!(err.to_string(), "description is required");

        let err = ValidationError::Negative {
            field: "unitPrice".to_string(),
        };
        assert_eq!(err.to_string(), "unitPrice must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
