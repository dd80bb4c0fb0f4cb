//! # Error Types
//!
//! Domain-specific error types for warung-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  warung-core errors (this file)                                 │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  warung-db errors (separate crate)                              │
//! │  └── DbError          - Database operation failures             │
//! │                                                                 │
//! │  apps/server errors                                             │
//! │  └── ApiError         - What HTTP clients see (serialized)      │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → ApiError → client          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (menu id, quantity, etc.)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested line-item quantity was zero or negative.
    ///
    /// Line items are rejected before any menu lookup happens, and
    /// validation stops at the first offending item.
    #[error("quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// A line item referenced a menu id that does not exist.
    #[error("menu id {id} not found")]
    MenuNotFound { id: i64 },

    /// A report date string could not be parsed as a calendar date.
    #[error("invalid date format '{value}', use YYYY-MM-DD")]
    InvalidDateFormat { value: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    /// Value must be zero or positive.
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Invalid format (e.g. malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidQuantity { quantity: -2 };
        assert_eq!(err.to_string(), "quantity must be positive, got -2");

        let err = CoreError::MenuNotFound { id: 42 };
        assert_eq!(err.to_string(), "menu id 42 not found");

        let err = CoreError::InvalidDateFormat {
            value: "01/02/2024".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date format '01/02/2024', use YYYY-MM-DD"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "name" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
