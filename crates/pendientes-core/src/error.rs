//! # Error Types
//!
//! Domain-specific error types for pendientes-core.
//!
//! Validation failures are detected before any store call and never
//! partially apply; the storage layer has its own error type in
//! pendientes-db, and the service layer there unifies the two.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Persisted status text that no revision of the tracker ever wrote.
    #[error("unrecognized order status: '{0}'")]
    UnknownStatus(String),

    /// Persisted billing-type text that cannot be mapped.
    #[error("unrecognized billing type: '{0}'")]
    UnknownBillingType(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the validators in [`crate::validation`] before business logic
/// or storage runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
