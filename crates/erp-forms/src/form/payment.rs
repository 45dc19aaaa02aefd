//! # Payment Form
//!
//! Records one payment against one invoice's balance due.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice INV-000007: total 285, paid 100, balance due 185              │
//! │                                                                         │
//! │  [Full Payment (Rs. 185)]  → amount = 185                              │
//! │  [50% Payment (Rs. 92.5)]  → amount = 92.5                             │
//! │                                                                         │
//! │  Remaining balance = balance due − amount                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use erp_core::status::PaymentMethod;
use erp_core::validation::{validate_payment_amount, validate_required};
use erp_core::{FieldErrors, Invoice, PaymentPayload, SalesOrder, ValidationError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::non_blank;
use crate::error::FormResult;
use crate::normalize::coerce_decimal;

const HALF: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentChange {
    Amount(Decimal),
    /// Raw amount text, coerced like every other numeric input.
    AmountText(String),
    PaymentDate(DateTime<Utc>),
    PaymentMethod(PaymentMethod),
    Reference(Option<String>),
    Notes(Option<String>),
    TransactionId(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentForm {
    pub invoice: Option<i64>,
    pub invoice_number: Option<String>,
    pub customer: String,
    /// Balance the amount is checked against.
    pub balance_due: Decimal,
    pub payment_date: DateTime<Utc>,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub transaction_id: Option<String>,
}

impl PaymentForm {
    /// Payment for `invoice`, prefilled with its full outstanding balance.
    pub fn for_invoice(invoice: &Invoice, now: DateTime<Utc>) -> Self {
        let balance_due = invoice.outstanding();
        debug!(invoice = ?invoice.invoice_number, balance = %balance_due, "Payment form opened");

        PaymentForm {
            invoice: invoice.id,
            invoice_number: invoice.invoice_number.clone(),
            customer: invoice.customer.clone(),
            balance_due,
            payment_date: now,
            amount: balance_due,
            payment_method: PaymentMethod::BankTransfer,
            reference: None,
            notes: None,
            transaction_id: None,
        }
    }

    pub fn apply(&mut self, change: PaymentChange) {
        match change {
            PaymentChange::Amount(amount) => self.amount = amount,
            PaymentChange::AmountText(text) => self.amount = coerce_decimal(&text),
            PaymentChange::PaymentDate(date) => self.payment_date = date,
            PaymentChange::PaymentMethod(method) => self.payment_method = method,
            PaymentChange::Reference(reference) => self.reference = non_blank(reference),
            PaymentChange::Notes(notes) => self.notes = non_blank(notes),
            PaymentChange::TransactionId(id) => self.transaction_id = non_blank(id),
        }
    }

    /// Sets the amount to the whole balance due.
    pub fn full_payment(&mut self) {
        self.amount = self.balance_due;
    }

    /// Sets the amount to half the balance due.
    pub fn half_payment(&mut self) {
        self.amount = self.balance_due.saturating_mul(HALF);
    }

    pub fn is_full_payment(&self) -> bool {
        self.amount == self.balance_due
    }

    /// Balance left after this payment; negative when overpaying.
    pub fn remaining_balance(&self) -> Decimal {
        erp_core::pricing::balance_due(self.balance_due, self.amount)
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.invoice.is_none() {
            errors.insert(
                "invoice",
                ValidationError::Required {
                    field: "Invoice".to_string(),
                },
            );
        }
        errors.check("customer", validate_required("Customer", &self.customer));
        errors.check(
            "amount",
            validate_payment_amount(self.amount, self.balance_due),
        );

        errors.into_result()
    }

    pub fn to_payload(&self) -> Result<PaymentPayload, FieldErrors> {
        self.validate()?;

        let mut errors = FieldErrors::new();
        let Some(invoice) = self.invoice else {
            errors.insert(
                "invoice",
                ValidationError::Required {
                    field: "Invoice".to_string(),
                },
            );
            return Err(errors);
        };

        Ok(PaymentPayload {
            invoice,
            customer: self.customer.trim().to_string(),
            reference: self.reference.clone(),
            payment_date: self.payment_date,
            amount: self.amount,
            payment_method: self.payment_method,
            notes: self.notes.clone(),
            transaction_id: self.transaction_id.clone(),
        })
    }

    /// Validates the whole form, then builds the payload.
    pub fn submit(&self) -> FormResult<PaymentPayload> {
        Ok(self.to_payload()?)
    }
}

/// Orders the invoice form may be raised from: confirmed ones only.
pub fn invoiceable_orders(orders: &[SalesOrder]) -> impl Iterator<Item = &SalesOrder> {
    orders.iter().filter(|o| o.status.is_invoice_candidate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;
    use chrono::TimeZone;
    use erp_core::status::SalesOrderStatus;
    use rust_decimal_macros::dec;

    fn invoice() -> Invoice {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "invoice_number": "INV-000007",
            "customer": "5b1d6c1e-8f0a-4c39-9a57-2d7c1f1e9b11",
            "invoice_date": "2024-01-01T00:00:00Z",
            "due_date": "2024-01-31T00:00:00Z",
            "tax_amount": "20",
            "discount_amount": "5",
            "paid_amount": "100",
            "items": [
                {"product": "0f8fad5b-d9cb-469f-a165-70867728950e",
                 "quantity": "3", "unit_price": "100", "discount_percent": "10"}
            ]
        }))
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_prefilled_with_balance() {
        let form = PaymentForm::for_invoice(&invoice(), now());
        assert_eq!(form.balance_due, dec!(185));
        assert_eq!(form.amount, dec!(185));
        assert_eq!(form.payment_method, PaymentMethod::BankTransfer);
        assert!(form.is_full_payment());
        assert_eq!(form.remaining_balance(), Decimal::ZERO);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_shortcuts() {
        let mut form = PaymentForm::for_invoice(&invoice(), now());
        form.half_payment();
        assert_eq!(form.amount, dec!(92.5));
        assert_eq!(form.remaining_balance(), dec!(92.5));

        form.full_payment();
        assert_eq!(form.amount, dec!(185));
    }

    #[test]
    fn test_amount_bounds() {
        let mut form = PaymentForm::for_invoice(&invoice(), now());

        form.apply(PaymentChange::AmountText("200".into()));
        let errors = form.validate().unwrap_err();
        assert!(matches!(
            errors.get("amount"),
            Some(ValidationError::Exceeds { limit, .. }) if *limit == dec!(185)
        ));
        assert_eq!(form.remaining_balance(), dec!(-15));

        form.apply(PaymentChange::AmountText("abc".into()));
        assert!(form.validate().unwrap_err().contains("amount"));
    }

    #[test]
    fn test_payload() {
        let mut form = PaymentForm::for_invoice(&invoice(), now());
        form.apply(PaymentChange::PaymentMethod(PaymentMethod::Cash));
        form.apply(PaymentChange::TransactionId(Some(" ".into())));

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.invoice, 7);
        assert_eq!(payload.amount, dec!(185));
        assert_eq!(payload.payment_method, PaymentMethod::Cash);
        assert_eq!(payload.transaction_id, None);
    }

    #[test]
    fn test_missing_invoice_id() {
        let mut invoice = invoice();
        invoice.id = None;
        let form = PaymentForm::for_invoice(&invoice, now());
        assert!(form.to_payload().unwrap_err().contains("invoice"));
    }

    #[test]
    fn test_only_confirmed_orders_are_invoiceable() {
        let order = |status: SalesOrderStatus| SalesOrder {
            id: Some(1),
            order_number: None,
            reference: None,
            customer: "c".into(),
            customer_name: None,
            order_date: now(),
            expected_delivery_date: None,
            status,
            priority: Default::default(),
            subtotal: None,
            tax_amount: Decimal::ZERO,
            discount_amount: Decimal::ZERO,
            total_amount: None,
            notes: None,
            internal_notes: None,
            items: Vec::new(),
        };
        let orders = vec![
            order(SalesOrderStatus::Draft),
            order(SalesOrderStatus::Confirmed),
            order(SalesOrderStatus::Delivered),
        ];

        let picked: Vec<_> = invoiceable_orders(&orders).collect();
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].status, SalesOrderStatus::Confirmed);
    }

    #[test]
    fn test_submit_reports_field_errors() {
        let mut form = PaymentForm::for_invoice(&invoice(), now());
        assert_eq!(form.submit().unwrap().amount, dec!(185));

        form.apply(PaymentChange::AmountText("0".into()));
        match form.submit() {
            Err(FormError::Invalid(errors)) => {
                assert!(matches!(
                    errors.get("amount"),
                    Some(ValidationError::MustBePositive { .. })
                ));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
