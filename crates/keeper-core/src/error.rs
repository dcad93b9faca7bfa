//! # Error Types
//!
//! Domain-specific error types for keeper-core.
//!
//! ## Error Hierarchy
//! ```text
//! keeper-core errors (this file)
//! ├── CoreError        - General domain errors
//! └── ValidationError  - Input validation failures
//!
//! keeper-vault errors  - VaultError  (storage boundary failures)
//! keeper-db errors     - DbError     (database operation failures)
//! keeper-sync errors   - SyncError   (shape mapping failures)
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, ids)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations or domain logic failures and
/// should be translated to user-friendly messages by the caller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A referenced product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A referenced client cannot be found.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// A referenced transaction cannot be found.
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    /// A domain entity with the given id does not exist in its collection.
    #[error("{kind} entity not found: {id}")]
    EntityNotFound { kind: String, id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when input doesn't meet requirements; used for early
/// validation before any state is touched.
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

    /// Invalid format (e.g., invalid UUID).
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
        let err = CoreError::ProductNotFound("abc".to_string());
        assert_eq!(err.to_string(), "Product not found: abc");

        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
