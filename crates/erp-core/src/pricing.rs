//! # Pricing Engine
//!
//! Line totals, document totals and balances for sales orders and invoices.
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  for each item:                                                         │
//! │     subtotal   = quantity × unit_price                                  │
//! │     discount   = subtotal × (discount_percent / 100)                    │
//! │     line_total = subtotal − discount                                    │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  items_subtotal = Σ line_total                                          │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  total_amount   = items_subtotal + tax_amount − discount_amount         │
//! │                      │            (flat)       (flat, after tax)        │
//! │                      ▼                                                  │
//! │  balance_due    = total_amount − paid_amount                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Every function is total: out-of-range inputs (negative quantities,
//!   discounts above 100) are used as-is, never rejected.
//! - No clamping: a negative total or balance is returned unchanged.
//! - No rounding: results are exact decimals. Only display formatting rounds.
//! - Arithmetic saturates at the `Decimal` range limits instead of panicking.
//!
//! The forms recompute everything from scratch after each edit; nothing here
//! is incremental or cached.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{LineItem, Payment};

// =============================================================================
// Engine Functions
// =============================================================================

/// Total of one line after its percentage discount.
///
/// ## Example
/// ```rust
/// use erp_core::pricing::line_total;
/// use erp_core::LineItem;
/// use rust_decimal::Decimal;
///
/// // 3 × 100 with 10% off
/// let item = LineItem::new(Decimal::from(3), Decimal::from(100))
///     .with_discount(Decimal::from(10));
/// assert_eq!(line_total(&item), Decimal::from(270));
/// ```
pub fn line_total(item: &LineItem) -> Decimal {
    let subtotal = item.quantity.saturating_mul(item.unit_price);
    let discount = subtotal.saturating_mul(item.discount_percent / Decimal::ONE_HUNDRED);
    subtotal.saturating_sub(discount)
}

/// Sum of all line totals. Zero for an empty list.
pub fn items_subtotal(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .map(line_total)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Items subtotal plus flat tax, minus flat document discount.
///
/// ## Example
/// ```rust
/// use erp_core::pricing::document_total;
/// use rust_decimal::Decimal;
///
/// // No items: tax − discount
/// let total = document_total(&[], Decimal::from(20), Decimal::from(5));
/// assert_eq!(total, Decimal::from(15));
/// ```
pub fn document_total(
    items: &[LineItem],
    tax_amount: Decimal,
    discount_amount: Decimal,
) -> Decimal {
    items_subtotal(items)
        .saturating_add(tax_amount)
        .saturating_sub(discount_amount)
}

/// What is still owed. Negative after an over-payment.
#[inline]
pub fn balance_due(total_amount: Decimal, paid_amount: Decimal) -> Decimal {
    total_amount.saturating_sub(paid_amount)
}

/// Percentage paid, capped at 100, for progress bars.
///
/// Zero when the total is zero. A ratio too large to represent counts as
/// fully paid.
pub fn payment_progress(total_amount: Decimal, paid_amount: Decimal) -> Decimal {
    if total_amount.is_zero() {
        return Decimal::ZERO;
    }
    paid_amount
        .checked_div(total_amount)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::ONE_HUNDRED, |pct| pct.min(Decimal::ONE_HUNDRED))
}

/// Amount an invoice has received: the sum of its completed payments.
///
/// Pending, failed and cancelled payments do not count.
pub fn paid_from_payments(payments: &[Payment]) -> Decimal {
    payments
        .iter()
        .filter(|p| p.status.counts_towards_paid())
        .fold(Decimal::ZERO, |acc, p| acc.saturating_add(p.amount))
}

// =============================================================================
// Document Totals
// =============================================================================

/// Snapshot of every derived figure of one document.
///
/// Sales orders have no payments, so their `paid_amount` is zero and
/// `balance_due` equals `total_amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentTotals {
    #[ts(as = "String")]
    pub items_subtotal: Decimal,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[ts(as = "String")]
    pub total_amount: Decimal,
    #[ts(as = "String")]
    pub paid_amount: Decimal,
    #[ts(as = "String")]
    pub balance_due: Decimal,
}

impl DocumentTotals {
    /// Computes all figures from scratch.
    pub fn compute(
        items: &[LineItem],
        tax_amount: Decimal,
        discount_amount: Decimal,
        paid_amount: Decimal,
    ) -> Self {
        let items_subtotal = items_subtotal(items);
        let total_amount = items_subtotal
            .saturating_add(tax_amount)
            .saturating_sub(discount_amount);

        DocumentTotals {
            items_subtotal,
            tax_amount,
            discount_amount,
            total_amount,
            paid_amount,
            balance_due: balance_due(total_amount, paid_amount),
        }
    }

    /// True when the total would be shown in warning colours.
    pub fn is_total_negative(&self) -> bool {
        self.total_amount.is_sign_negative() && !self.total_amount.is_zero()
    }

    /// True once payments exceed the total.
    pub fn is_overpaid(&self) -> bool {
        self.balance_due < Decimal::ZERO
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
