//! # Error Types
//!
//! Domain-specific error types for thaifood-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  thaifood-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  checkout app errors (separate crate)                                  │
//! │  └── AppError         - I/O, JSON, configuration                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Never Errors
//! Bill computation, category resolution and record normalization coerce
//! bad numbers instead of failing. These errors cover caller-supplied
//! drafts, rule tables and lookups.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A category name that is not part of the closed set.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// A keyword rule that can never be evaluated sensibly.
    ///
    /// ## When This Occurs
    /// - Rule with no keywords (would match every name)
    /// - Rule containing a blank keyword
    #[error("Invalid keyword rule #{index}: {reason}")]
    InvalidRule { index: usize, reason: String },

    /// Menu item lookup by id failed.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Used for early validation of drafts and configuration before business
/// logic runs.
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
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric amount, malformed URL).
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
        let err = CoreError::InvalidRule {
            index: 3,
            reason: "keyword list is empty".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid keyword rule #3: keyword list is empty");
        assert_eq!(
            CoreError::MenuItemNotFound(42).to_string(),
            "Menu item not found: 42"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "item_name".to_string(),
        };
        assert_eq!(err.to_string(), "item_name is required");

        let err = ValidationError::OutOfRange {
            field: "vat_pct".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "vat_pct must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "item_name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
