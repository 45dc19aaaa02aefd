//! # Domain Types
//!
//! Sales documents and their line items, as exchanged with the REST API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SalesOrder    │   │    Invoice      │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  order_number   │──►│  sales_order    │◄──│  invoice        │       │
//! │  │  status         │   │  payment_terms  │   │  amount         │       │
//! │  │  priority       │   │  due_date       │   │  method         │       │
//! │  │  items[]        │   │  items[]        │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │           │                     │                                       │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │             ┌─────────────────┐                                         │
//! │             │    LineItem     │  quantity × unit_price − discount %     │
//! │             └─────────────────┘                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Records vs Payloads
//! - Records (`SalesOrder`, `Invoice`, `Payment`) are what the API returns,
//!   including server-assigned numbers and server-computed totals.
//! - Payloads (`*Payload`) are what the forms send. They carry raw items and
//!   adjustments only; the server recomputes every total itself.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationResult;
use crate::pricing::{self, DocumentTotals};
use crate::status::{InvoiceStatus, PaymentMethod, PaymentStatus, Priority, SalesOrderStatus};
use crate::terms::{self, PaymentTerms};

// =============================================================================
// Line Item
// =============================================================================

/// One product row of a sales order or invoice.
///
/// `line_total` is derived, never stored: see [`pricing::line_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Product UUID. Empty while the row is still being filled in.
    #[serde(default)]
    pub product: String,

    #[ts(as = "String")]
    pub quantity: Decimal,

    #[ts(as = "String")]
    pub unit_price: Decimal,

    /// Percentage in [0, 100]; missing means no discount.
    #[serde(default)]
    #[ts(as = "String")]
    pub discount_percent: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl LineItem {
    /// A row without product, discount or notes.
    pub fn new(quantity: Decimal, unit_price: Decimal) -> Self {
        LineItem {
            product: String::new(),
            quantity,
            unit_price,
            discount_percent: Decimal::ZERO,
            notes: None,
        }
    }

    /// The row a form starts with: quantity 1, price 0, no discount.
    pub fn blank() -> Self {
        LineItem::new(Decimal::ONE, Decimal::ZERO)
    }

    pub fn with_discount(mut self, discount_percent: Decimal) -> Self {
        self.discount_percent = discount_percent;
        self
    }

    pub fn with_product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    /// Convenience for [`pricing::line_total`].
    #[inline]
    pub fn line_total(&self) -> Decimal {
        pricing::line_total(self)
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::blank()
    }
}

/// A line item as returned by the API, with product snapshot fields and the
/// server's line total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentItem {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub product_sku: Option<String>,

    #[serde(flatten)]
    pub item: LineItem,

    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub line_total: Option<Decimal>,
}

impl DocumentItem {
    /// The editable part of the row.
    pub fn to_line_item(&self) -> LineItem {
        self.item.clone()
    }
}

// =============================================================================
// Catalog Entry
// =============================================================================

/// The slice of a product that the item picker needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub sku: String,

    /// Price copied into `unit_price` when the product is picked.
    #[ts(as = "String")]
    pub selling_price: Decimal,
}

// =============================================================================
// Sales Order
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesOrder {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub customer: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: SalesOrderStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[serde(default)]
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub internal_notes: Option<String>,
    #[serde(default)]
    pub items: Vec<DocumentItem>,
}

impl SalesOrder {
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(DocumentItem::to_line_item).collect()
    }

    /// Totals recomputed from the items, ignoring the server figures.
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            &self.line_items(),
            self.tax_amount,
            self.discount_amount,
            Decimal::ZERO,
        )
    }
}

// =============================================================================
// Invoice
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub sales_order: Option<i64>,
    pub customer: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[ts(as = "String")]
    pub invoice_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub payment_terms: PaymentTerms,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[serde(default)]
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    #[ts(as = "String")]
    pub paid_amount: Decimal,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub balance_due: Option<Decimal>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub terms_conditions: Option<String>,
    #[serde(default)]
    pub items: Vec<DocumentItem>,
}

impl Invoice {
    pub fn line_items(&self) -> Vec<LineItem> {
        self.items.iter().map(DocumentItem::to_line_item).collect()
    }

    /// Totals recomputed from the items, ignoring the server figures.
    pub fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            &self.line_items(),
            self.tax_amount,
            self.discount_amount,
            self.paid_amount,
        )
    }

    /// Balance the payment form works against: the server's figure when
    /// present, otherwise the recomputed one.
    pub fn outstanding(&self) -> Decimal {
        self.balance_due.unwrap_or_else(|| self.totals().balance_due)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        terms::is_overdue(self.due_date, self.outstanding(), now)
    }

    /// Percentage of the total already paid, for list progress bars.
    pub fn payment_progress(&self) -> Decimal {
        pricing::payment_progress(self.total(), self.paid_amount)
    }

    /// The server's total when present, otherwise the recomputed one.
    fn total(&self) -> Decimal {
        self.total_amount.unwrap_or_else(|| self.totals().total_amount)
    }

    /// Settles the invoice in full: status `paid`, paid amount = total.
    pub fn mark_paid(&mut self) -> ValidationResult<()> {
        self.status = self.status.mark_paid()?;
        let total = self.total();
        self.paid_amount = total;
        self.balance_due = Some(Decimal::ZERO);
        Ok(())
    }

    /// Recomputes the paid amount from the invoice's payments and moves the
    /// status along (see [`terms::invoice_status_after_payments`]).
    pub fn apply_payments(&mut self, payments: &[Payment], now: DateTime<Utc>) {
        let total = self.total();
        self.paid_amount = pricing::paid_from_payments(payments);
        self.balance_due = Some(pricing::balance_due(total, self.paid_amount));
        self.status = terms::invoice_status_after_payments(
            total,
            self.paid_amount,
            self.due_date,
            self.status,
            now,
        );
    }
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub payment_number: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    pub invoice: i64,
    pub customer: String,
    #[ts(as = "String")]
    pub payment_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

// =============================================================================
// Create / Update Payloads
// =============================================================================

/// Body of `POST /sales/orders/` and `PUT /sales/orders/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesOrderPayload {
    pub customer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub order_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_notes: Option<String>,
    pub items: Vec<LineItem>,
}

/// Body of `POST /sales/invoices/` and `PUT /sales/invoices/{id}/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoicePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_order: Option<i64>,
    pub customer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub invoice_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,
    pub payment_terms: PaymentTerms,
    #[ts(as = "String")]
    pub tax_amount: Decimal,
    #[ts(as = "String")]
    pub discount_amount: Decimal,
    #[ts(as = "String")]
    pub paid_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_conditions: Option<String>,
    pub items: Vec<LineItem>,
}

/// Body of `POST /sales/payments/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentPayload {
    pub invoice: i64,
    pub customer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[ts(as = "String")]
    pub payment_date: DateTime<Utc>,
    #[ts(as = "String")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================
