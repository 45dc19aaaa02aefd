//! # erp-core: Pure Business Logic for the ERP Sales Screens
//!
//! This crate holds the arithmetic and rules shared by the sales-order form,
//! the invoice form and the payment form. Everything here is a pure function
//! of its inputs: no I/O, no clock, no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Custom ERP Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │   Sales Order Form ──► Invoice Form ──► Payment Form           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    erp-forms (form controllers)                 │   │
//! │  │    apply(change) ──► recompute totals ──► to_payload()          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ erp-core (THIS CRATE) ★                         │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  pricing  │  │   terms   │  │ validation│  │   │
//! │  │   │ LineItem  │  │ line_total│  │ due dates │  │   rules   │  │   │
//! │  │   │ Invoice   │  │ totals    │  │ overdue   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  REST API (external): receives raw items, recomputes totals itself     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, SalesOrder, Invoice, Payment, payloads)
//! - [`pricing`] - The line-item pricing engine
//! - [`terms`] - Payment terms and due-date arithmetic
//! - [`status`] - Status/priority/method option lists with exhaustive lookups
//! - [`money`] - Currency list and display formatting
//! - [`error`] - Validation error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, the clock is an argument
//! 2. **Decimal Amounts**: `rust_decimal::Decimal`, never floats
//! 3. **No Clamping**: negative totals and balances are valid outputs
//! 4. **Rounding is Display-Only**: the engine never rounds
//!
//! ## Example Usage
//!
//! ```rust
//! use erp_core::pricing::{document_total, line_total};
//! use erp_core::LineItem;
//! use rust_decimal::Decimal;
//!
//! let item = LineItem::new(Decimal::from(3), Decimal::from(100))
//!     .with_discount(Decimal::from(10));
//! assert_eq!(line_total(&item), Decimal::from(270));
//!
//! let total = document_total(&[item], Decimal::from(20), Decimal::from(5));
//! assert_eq!(total, Decimal::from(285));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod status;
pub mod terms;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use erp_core::LineItem` instead of
// `use erp_core::types::LineItem`

pub use error::{FieldErrors, ValidationError};
pub use money::Currency;
pub use pricing::DocumentTotals;
pub use rust_decimal::Decimal;
pub use status::{ColoredOption, OptionValue};
pub use terms::PaymentTerms;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Colour used for any status value the lookup tables do not know.
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

/// Currency used when nothing else is configured.
pub const DEFAULT_CURRENCY_CODE: &str = "PKR";
