//! # Invoice Form
//!
//! ## Due-Date Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User picks terms        Due date                                       │
//! │  ────────────────        ────────                                       │
//! │  net_15 / 30 / 45 / 60 ► invoice_date + net days (overwrites)          │
//! │  immediate ────────────► left as it was                                │
//! │                                                                         │
//! │  Changing the invoice date alone never moves the due date.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use erp_core::terms::{add_days, derive_due_date};
use erp_core::validation::{validate_non_negative, validate_required};
use erp_core::{
    DocumentTotals, FieldErrors, Invoice, InvoicePayload, LineItem, PaymentTerms, SalesOrder,
    ValidationError,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::items::{ItemChange, ItemList};
use super::{non_blank, DocumentForm};
use crate::config::FormsConfig;
use crate::error::FormResult;

/// Days between invoice date and due date for an invoice raised from an order.
const SALES_ORDER_INVOICE_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub enum InvoiceChange {
    Customer(String),
    Reference(Option<String>),
    InvoiceDate(DateTime<Utc>),
    DueDate(DateTime<Utc>),
    PaymentTerms(PaymentTerms),
    TaxAmount(Decimal),
    DiscountAmount(Decimal),
    PaidAmount(Decimal),
    Notes(Option<String>),
    TermsConditions(Option<String>),
    AddItem,
    RemoveItem(usize),
    Item(usize, ItemChange),
}

/// The invoice being created or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceForm {
    /// Set when editing an existing invoice.
    pub id: Option<i64>,
    pub sales_order: Option<i64>,
    pub customer: String,
    pub reference: Option<String>,
    /// `None` only after the user cleared the picker.
    pub invoice_date: Option<DateTime<Utc>>,
    pub due_date: Option<DateTime<Utc>>,
    pub payment_terms: PaymentTerms,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub paid_amount: Decimal,
    pub notes: Option<String>,
    pub terms_conditions: Option<String>,
    items: ItemList,
}

impl InvoiceForm {
    /// Empty invoice dated `now` with the due date derived from `terms`.
    pub fn new(now: DateTime<Utc>, terms: PaymentTerms) -> Self {
        InvoiceForm {
            id: None,
            sales_order: None,
            customer: String::new(),
            reference: None,
            invoice_date: Some(now),
            due_date: Some(derive_due_date(now, terms)),
            payment_terms: terms,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            notes: None,
            terms_conditions: None,
            items: ItemList::new(),
        }
    }

    /// Empty invoice using the configured default terms.
    pub fn with_config(now: DateTime<Utc>, config: &FormsConfig) -> Self {
        Self::new(now, config.default_payment_terms())
    }

    /// Loads an existing invoice for editing.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        InvoiceForm {
            id: invoice.id,
            sales_order: invoice.sales_order,
            customer: invoice.customer.clone(),
            reference: invoice.reference.clone(),
            invoice_date: Some(invoice.invoice_date),
            due_date: Some(invoice.due_date),
            payment_terms: invoice.payment_terms,
            tax_amount: invoice.tax_amount,
            discount_amount: invoice.discount_amount,
            paid_amount: invoice.paid_amount,
            notes: invoice.notes.clone(),
            terms_conditions: invoice.terms_conditions.clone(),
            items: ItemList::from_items_or_blank(invoice.line_items()),
        }
    }

    /// Starts an invoice from a confirmed sales order.
    ///
    /// Customer, reference, adjustments, notes and items come from the order;
    /// dates restart at `now` with net 30 terms.
    pub fn from_sales_order(order: &SalesOrder, now: DateTime<Utc>) -> Self {
        debug!(order = ?order.order_number, "Creating invoice from sales order");

        InvoiceForm {
            id: None,
            sales_order: order.id,
            customer: order.customer.clone(),
            reference: order.reference.clone(),
            invoice_date: Some(now),
            due_date: Some(add_days(now, SALES_ORDER_INVOICE_DAYS)),
            payment_terms: PaymentTerms::Net30,
            tax_amount: order.tax_amount,
            discount_amount: order.discount_amount,
            paid_amount: Decimal::ZERO,
            notes: order.notes.clone(),
            terms_conditions: None,
            items: ItemList::from_items_or_blank(order.line_items()),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        self.items.as_slice()
    }

    /// Clears a date picker. Only the form can hold a missing date.
    pub fn clear_invoice_date(&mut self) {
        self.invoice_date = None;
    }

    pub fn clear_due_date(&mut self) {
        self.due_date = None;
    }

    /// Submit payload; fails with the validation errors when dates are
    /// missing.
    pub fn to_payload(&self) -> Result<InvoicePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let invoice_date =
            require_date(&mut errors, "invoice_date", "Invoice date", self.invoice_date);
        let due_date = require_date(&mut errors, "due_date", "Due date", self.due_date);

        match (invoice_date, due_date) {
            (Some(invoice_date), Some(due_date)) => Ok(InvoicePayload {
                sales_order: self.sales_order,
                customer: self.customer.trim().to_string(),
                reference: self.reference.clone(),
                invoice_date,
                due_date,
                payment_terms: self.payment_terms,
                tax_amount: self.tax_amount,
                discount_amount: self.discount_amount,
                paid_amount: self.paid_amount,
                notes: self.notes.clone(),
                terms_conditions: self.terms_conditions.clone(),
                items: self.items().to_vec(),
            }),
            _ => Err(errors),
        }
    }

    /// Validates the whole form, then builds the payload.
    pub fn submit(&self) -> FormResult<InvoicePayload> {
        self.validate()?;
        Ok(self.to_payload()?)
    }

    fn change_terms(&mut self, terms: PaymentTerms) {
        self.payment_terms = terms;

        if !terms.is_net() {
            debug!("Immediate terms selected, keeping due date");
            return;
        }

        if let Some(invoice_date) = self.invoice_date {
            let due = derive_due_date(invoice_date, terms);
            debug!(terms = %terms, due_date = %due, "Due date recomputed from terms");
            self.due_date = Some(due);
        }
    }
}

impl DocumentForm for InvoiceForm {
    type Change = InvoiceChange;

    fn apply_in_place(&mut self, change: InvoiceChange) -> FormResult<()> {
        match change {
            InvoiceChange::Customer(customer) => self.customer = customer,
            InvoiceChange::Reference(reference) => self.reference = non_blank(reference),
            InvoiceChange::InvoiceDate(date) => self.invoice_date = Some(date),
            InvoiceChange::DueDate(date) => self.due_date = Some(date),
            InvoiceChange::PaymentTerms(terms) => self.change_terms(terms),
            InvoiceChange::TaxAmount(amount) => self.tax_amount = amount,
            InvoiceChange::DiscountAmount(amount) => self.discount_amount = amount,
            InvoiceChange::PaidAmount(amount) => self.paid_amount = amount,
            InvoiceChange::Notes(notes) => self.notes = non_blank(notes),
            InvoiceChange::TermsConditions(text) => self.terms_conditions = non_blank(text),
            InvoiceChange::AddItem => self.items.add(),
            InvoiceChange::RemoveItem(index) => {
                self.items.remove(index)?;
            }
            InvoiceChange::Item(index, change) => self.items.edit(index, change)?,
        }

        debug!(
            total = %self.totals().total_amount,
            balance = %self.totals().balance_due,
            "Invoice recomputed"
        );
        Ok(())
    }

    fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            self.items(),
            self.tax_amount,
            self.discount_amount,
            self.paid_amount,
        )
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check("customer", validate_required("Customer", &self.customer));
        require_date(&mut errors, "invoice_date", "Invoice date", self.invoice_date);
        require_date(&mut errors, "due_date", "Due date", self.due_date);
        errors.check(
            "tax_amount",
            validate_non_negative("Tax amount", self.tax_amount),
        );
        errors.check(
            "discount_amount",
            validate_non_negative("Discount amount", self.discount_amount),
        );
        errors.check(
            "paid_amount",
            validate_non_negative("Paid amount", self.paid_amount),
        );
        self.items.validate_into(&mut errors, true);

        errors.into_result()
    }
}

fn require_date(
    errors: &mut FieldErrors,
    key: &str,
    field: &str,
    date: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    if date.is_none() {
        errors.insert(
            key,
            ValidationError::Required {
                field: field.to_string(),
            },
        );
    }
    date
}
