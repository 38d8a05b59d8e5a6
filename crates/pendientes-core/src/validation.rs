//! # Validation Module
//!
//! Field validation run before anything touches the store.
//!
//! The service layer in pendientes-db calls [`validate_fields`] on both
//! create and edit, so a record that violates these rules never reaches a
//! SQL statement; a failed validation leaves the store unchanged.
//!
//! ## Usage
//! ```rust
//! use pendientes_core::validation::{validate_cantidad, validate_empresa};
//!
//! assert!(validate_cantidad(5).is_ok());
//! assert!(validate_cantidad(0).is_err());
//! assert!(validate_empresa("ACME Corp").is_ok());
//! assert!(validate_empresa("   ").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::OrderFields;
use crate::MAX_TEXT_FIELD_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates an order quantity.
///
/// ## Rules
/// - Must be at least 1: a pendiente for zero units is not a commitment.
pub fn validate_cantidad(cantidad: i64) -> ValidationResult<()> {
    if cantidad < 1 {
        return Err(ValidationError::MustBePositive {
            field: "cantidad".to_string(),
        });
    }

    Ok(())
}

/// Validates the client name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_TEXT_FIELD_LEN`] characters
pub fn validate_empresa(empresa: &str) -> ValidationResult<()> {
    validate_name("empresa", empresa)
}

/// Validates the product name. Same rules as [`validate_empresa`].
pub fn validate_producto(producto: &str) -> ValidationResult<()> {
    validate_name("producto", producto)
}

fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_TEXT_FIELD_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_FIELD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Whole-Record Validation
// =============================================================================

/// Validates the caller-supplied fields of an order.
///
/// Applied on creation and on every edit, so the invariants hold for the
/// record's whole lifetime, not just its first write.
pub fn validate_fields(fields: &OrderFields) -> ValidationResult<()> {
    validate_empresa(&fields.empresa)?;
    validate_producto(&fields.producto)?;
    validate_cantidad(fields.cantidad)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
