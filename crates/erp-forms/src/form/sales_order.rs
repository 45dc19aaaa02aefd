//! Sales order form.

use chrono::{DateTime, Utc};
use erp_core::status::Priority;
use erp_core::validation::{validate_non_negative, validate_required};
use erp_core::{DocumentTotals, FieldErrors, LineItem, SalesOrder, SalesOrderPayload};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::items::{ItemChange, ItemList};
use super::{non_blank, DocumentForm};
use crate::error::FormResult;

#[derive(Debug, Clone, PartialEq)]
pub enum SalesOrderChange {
    Customer(String),
    Reference(Option<String>),
    OrderDate(DateTime<Utc>),
    ExpectedDeliveryDate(Option<DateTime<Utc>>),
    Priority(Priority),
    TaxAmount(Decimal),
    DiscountAmount(Decimal),
    Notes(Option<String>),
    InternalNotes(Option<String>),
    AddItem,
    RemoveItem(usize),
    Item(usize, ItemChange),
}

/// The sales order being created or edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrderForm {
    /// Set when editing an existing order.
    pub id: Option<i64>,
    pub customer: String,
    pub reference: Option<String>,
    pub order_date: DateTime<Utc>,
    pub expected_delivery_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub notes: Option<String>,
    pub internal_notes: Option<String>,
    items: ItemList,
}

impl SalesOrderForm {
    /// Empty order dated `now`, normal priority, one blank row.
    pub fn new(now: DateTime<Utc>) -> Self {
        SalesOrderForm {
            id: None,
            customer: String::new(),
            reference: None,
            order_date: now,
            expected_delivery_date: None,
            priority: Priority::Normal,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            notes: None,
            internal_notes: None,
            items: ItemList::new(),
        }
    }

    /// Loads an existing order for editing.
    pub fn from_order(order: &SalesOrder) -> Self {
        SalesOrderForm {
            id: order.id,
            customer: order.customer.clone(),
            reference: order.reference.clone(),
            order_date: order.order_date,
            expected_delivery_date: order.expected_delivery_date,
            priority: order.priority,
            tax_amount: order.tax_amount,
            discount_amount: order.discount_amount,
            notes: order.notes.clone(),
            internal_notes: order.internal_notes.clone(),
            items: ItemList::from_items_or_blank(order.line_items()),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        self.items.as_slice()
    }

    pub fn to_payload(&self) -> SalesOrderPayload {
        SalesOrderPayload {
            customer: self.customer.trim().to_string(),
            reference: self.reference.clone(),
            order_date: self.order_date,
            expected_delivery_date: self.expected_delivery_date,
            priority: self.priority,
            tax_amount: self.tax_amount,
            discount_amount: self.discount_amount,
            notes: self.notes.clone(),
            internal_notes: self.internal_notes.clone(),
            items: self.items().to_vec(),
        }
    }

    /// Validates the whole form, then builds the payload.
    pub fn submit(&self) -> FormResult<SalesOrderPayload> {
        self.validate()?;
        Ok(self.to_payload())
    }
}

impl DocumentForm for SalesOrderForm {
    type Change = SalesOrderChange;

    fn apply_in_place(&mut self, change: SalesOrderChange) -> FormResult<()> {
        match change {
            SalesOrderChange::Customer(customer) => self.customer = customer,
            SalesOrderChange::Reference(reference) => self.reference = non_blank(reference),
            SalesOrderChange::OrderDate(date) => self.order_date = date,
            SalesOrderChange::ExpectedDeliveryDate(date) => self.expected_delivery_date = date,
            SalesOrderChange::Priority(priority) => self.priority = priority,
            SalesOrderChange::TaxAmount(amount) => self.tax_amount = amount,
            SalesOrderChange::DiscountAmount(amount) => self.discount_amount = amount,
            SalesOrderChange::Notes(notes) => self.notes = non_blank(notes),
            SalesOrderChange::InternalNotes(notes) => self.internal_notes = non_blank(notes),
            SalesOrderChange::AddItem => self.items.add(),
            SalesOrderChange::RemoveItem(index) => {
                self.items.remove(index)?;
            }
            SalesOrderChange::Item(index, change) => self.items.edit(index, change)?,
        }

        debug!(total = %self.totals().total_amount, "Sales order recomputed");
        Ok(())
    }

    fn totals(&self) -> DocumentTotals {
        DocumentTotals::compute(
            self.items(),
            self.tax_amount,
            self.discount_amount,
            Decimal::ZERO,
        )
    }

    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        errors.check("customer", validate_required("Customer", &self.customer));
        errors.check(
            "tax_amount",
            validate_non_negative("Tax amount", self.tax_amount),
        );
        errors.check(
            "discount_amount",
            validate_non_negative("Discount amount", self.discount_amount),
        );
        self.items.validate_into(&mut errors, false);

        errors.into_result()
    }
}
