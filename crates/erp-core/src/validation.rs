//! # Validation Module
//!
//! Field rules applied by the forms before a document is submitted.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Input normalisation (erp-forms)                              │
//! │  └── Non-numeric text becomes 0 before anything else sees it           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Pricing engine                                               │
//! │  └── NO validation: totals are computed for any numbers                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE, on submit                                       │
//! │  ├── Required fields, positive quantities/prices                       │
//! │  └── Payment amount ≤ balance due                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 4: REST API (model constraints, authoritative totals)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use erp_core::validation::{validate_discount_percent, validate_quantity};
//! use rust_decimal::Decimal;
//!
//! assert!(validate_quantity(Decimal::from(5)).is_ok());
//! assert!(validate_discount_percent(Decimal::from(101)).is_err());
//! ```

use rust_decimal::Decimal;

use crate::error::{ValidationError, ValidationResult};

// =============================================================================
// String Validators
// =============================================================================

/// Fails with `"{field} is required"` when `value` is blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a product reference on a line item.
///
/// ## Rules
/// - Must not be empty ("Product is required")
/// - Must be a UUID, as issued by the inventory API
///
/// ## Example
/// ```rust
/// use erp_core::validation::validate_product_ref;
///
/// assert!(validate_product_ref("0f8fad5b-d9cb-469f-a165-70867728950e").is_ok());
/// assert!(validate_product_ref("").is_err());
/// assert!(validate_product_ref("widget").is_err());
/// ```
pub fn validate_product_ref(product: &str) -> ValidationResult<()> {
    validate_required("Product", product)?;

    uuid::Uuid::parse_str(product.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "Product".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Quantity must be greater than zero.
pub fn validate_quantity(quantity: Decimal) -> ValidationResult<()> {
    validate_positive("Quantity", quantity)
}

/// Unit price must be greater than zero (invoice rule).
pub fn validate_unit_price(unit_price: Decimal) -> ValidationResult<()> {
    validate_positive("Unit price", unit_price)
}

/// Discount percentage must lie in [0, 100].
pub fn validate_discount_percent(discount_percent: Decimal) -> ValidationResult<()> {
    if discount_percent < Decimal::ZERO || discount_percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "Discount %".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Tax, discount and paid amounts are flat and must not be negative.
pub fn validate_non_negative(field: &str, amount: Decimal) -> ValidationResult<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a payment against the invoice it settles.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed the invoice's balance due
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Invoice: total 285, paid 100, balance due 185                         │
/// │                                                                         │
/// │  User enters amount: 200                                               │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_payment_amount(200, 185) ← THIS FUNCTION                     │
/// │       │                                                                 │
/// │       ├── amount <= 0?   → "Payment amount must be greater than 0"     │
/// │       ├── amount > 185?  → "Payment amount cannot exceed 185"          │
/// │       └── OK → submit                                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_payment_amount(amount: Decimal, balance_due: Decimal) -> ValidationResult<()> {
    validate_positive("Payment amount", amount)?;

    if amount > balance_due {
        return Err(ValidationError::Exceeds {
            field: "Payment amount".to_string(),
            limit: balance_due,
        });
    }

    Ok(())
}

fn validate_positive(field: &str, value: Decimal) -> ValidationResult<()> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
