//! # Quote Rendering
//!
//! Turns a draft document (JSON) into a plain-text price breakdown for the
//! `erp-quote` binary.
//!
//! ## Input Format
//! ```json
//! {
//!   "currency": "USD",
//!   "tax_amount": "20",
//!   "discount_amount": "5",
//!   "items": [
//!     { "quantity": "3", "unit_price": "100", "discount_percent": "10" }
//!   ]
//! }
//! ```

use erp_core::money::format_currency;
use erp_core::{DocumentTotals, LineItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt::Write;

use crate::error::FormResult;

/// A draft document as read by `erp-quote`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteDocument {
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub tax_amount: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    #[serde(default)]
    pub paid_amount: Decimal,
    /// Overrides the configured display currency.
    #[serde(default)]
    pub currency: Option<String>,
}

impl QuoteDocument {
    pub fn from_json(json: &str) -> FormResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            &self.items,
            self.tax_amount,
            self.discount_amount,
            self.paid_amount,
        )
    }

    /// Renders the breakdown in the document's currency, or `default_currency`.
    pub fn render(&self, default_currency: &str) -> String {
        let currency = self.currency.as_deref().unwrap_or(default_currency);
        let money = |amount: Decimal| format_currency(amount, currency);
        let totals = self.totals();
        let mut out = String::new();

        // Writing to a String cannot fail
        for (index, item) in self.items.iter().enumerate() {
            let _ = write!(out, "{:>3}. {} x {}", index + 1, item.quantity, money(item.unit_price));
            if !item.discount_percent.is_zero() {
                let _ = write!(out, " - {}%", item.discount_percent.normalize());
            }
            let _ = writeln!(out, " = {}", money(item.line_total()));
        }

        let _ = writeln!(out, "Subtotal:    {}", money(totals.items_subtotal));
        let _ = writeln!(out, "Tax:         {}", money(totals.tax_amount));
        let _ = writeln!(out, "Discount:    {}", money(totals.discount_amount));
        let _ = writeln!(out, "Total:       {}", money(totals.total_amount));
        if !self.paid_amount.is_zero() {
            let _ = writeln!(out, "Paid:        {}", money(totals.paid_amount));
            let _ = writeln!(out, "Balance due: {}", money(totals.balance_due));
        }

        out
    }
}
