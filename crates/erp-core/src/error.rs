//! # Error Types
//!
//! Validation error types for erp-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  erp-core errors (this file)                                           │
//! │  ├── ValidationError  - A single field failed a rule                   │
//! │  └── FieldErrors      - Every failing field of one form, keyed         │
//! │                                                                         │
//! │  erp-forms errors (separate crate)                                     │
//! │  └── FormError        - Item editing, config, CLI input failures       │
//! │                                                                         │
//! │  The pricing engine has NO error type: its functions are total.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages read like the form helper texts ("Customer is required")
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// `field` is the human label shown next to the input, so the `Display`
/// output can be used as helper text unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Value exceeds an upper bound that depends on other data.
    ///
    /// ## When This Occurs
    /// - Payment amount larger than the invoice's balance due
    #[error("{field} cannot exceed {limit}")]
    Exceeds { field: String, limit: Decimal },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed {
        field: String,
        allowed: Vec<String>,
    },

    /// Status change refused by the document lifecycle.
    ///
    /// ## When This Occurs
    /// - Confirming an order that is not a draft
    /// - Marking a cancelled invoice as paid
    #[error("{rule} (current status: {from})")]
    InvalidTransition { from: String, rule: &'static str },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Errors
// =============================================================================

/// Every validation failure of a form, keyed by the form field.
///
/// Keys follow the frontend convention: plain field names (`customer`,
/// `due_date`) and `item_{index}_{field}` for line items. Insertion order is
/// kept so errors are reported top to bottom.
#[derive(Debug, Clone, Default, PartialEq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: Vec<(String, ValidationError)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `key`. A key keeps its first error.
    pub fn insert(&mut self, key: impl Into<String>, error: ValidationError) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.errors.push((key, error));
        }
    }

    /// Records the error of `result`, if any.
    pub fn check(&mut self, key: impl Into<String>, result: ValidationResult<()>) {
        if let Err(error) = result {
            self.insert(key, error);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ValidationError> {
        self.errors
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, error)| error)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "Customer".to_string(),
        };
        assert_eq!(err.to_string(), "Customer is required");

        let err = ValidationError::MustBePositive {
            field: "Quantity".to_string(),
        };
        assert_eq!(err.to_string(), "Quantity must be greater than 0");

        let err = ValidationError::Exceeds {
            field: "Payment amount".to_string(),
            limit: Decimal::new(18500, 2),
        };
        assert_eq!(err.to_string(), "Payment amount cannot exceed 185.00");
    }

    #[test]
    fn test_field_errors_keep_first_error_per_key() {
        let mut errors = FieldErrors::new();
        errors.insert(
            "item_0_quantity",
            ValidationError::MustBePositive {
                field: "Quantity".to_string(),
            },
        );
        errors.insert(
            "item_0_quantity",
            ValidationError::Required {
                field: "Quantity".to_string(),
            },
        );

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors.get("item_0_quantity"),
            Some(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(errors.to_string(), "1 field(s) failed validation");
    }

    #[test]
    fn test_empty_field_errors_is_ok() {
        let mut errors = FieldErrors::new();
        errors.check("customer", Ok(()));
        assert!(errors.into_result().is_ok());
    }
}
