//! End-to-end form scenarios: order → invoice → payment.

use chrono::{DateTime, TimeZone, Utc};
use erp_core::status::{InvoiceStatus, PaymentStatus, SalesOrderStatus};
use erp_core::{Invoice, Payment, PaymentPayload, PaymentTerms, ProductRef, SalesOrder};
use erp_forms::form::invoiceable_orders;
use erp_forms::{
    DocumentForm, FormState, FormsConfig, InvoiceChange, InvoiceForm, ItemChange, PaymentChange,
    PaymentForm, SalesOrderChange, SalesOrderForm,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CUSTOMER: &str = "5b1d6c1e-8f0a-4c39-9a57-2d7c1f1e9b11";

fn jan(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
}

fn widget() -> ProductRef {
    ProductRef {
        id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        name: "Widget".to_string(),
        sku: "WID-1".to_string(),
        selling_price: dec!(100),
    }
}

fn gadget() -> ProductRef {
    ProductRef {
        id: "7c9e6679-7425-40de-944b-e07fc1f90ae7".to_string(),
        name: "Gadget".to_string(),
        sku: "GAD-1".to_string(),
        selling_price: dec!(200),
    }
}

/// Sales order with 3 discounted widgets, tax 20 and discount 5.
fn confirmed_order() -> SalesOrder {
    let form = SalesOrderForm::new(jan(1))
        .with_change(SalesOrderChange::Customer(CUSTOMER.into()))
        .and_then(|f| f.with_change(SalesOrderChange::Item(0, ItemChange::Product(widget()))))
        .and_then(|f| f.with_change(SalesOrderChange::Item(0, ItemChange::quantity_text("3"))))
        .and_then(|f| {
            f.with_change(SalesOrderChange::Item(
                0,
                ItemChange::discount_percent_text("10"),
            ))
        })
        .and_then(|f| f.with_change(SalesOrderChange::TaxAmount(dec!(20))))
        .and_then(|f| f.with_change(SalesOrderChange::DiscountAmount(dec!(5))))
        .unwrap();
    assert_eq!(form.totals().total_amount, dec!(285));

    // Round-trip through the API shape
    let mut json = serde_json::to_value(form.submit().unwrap()).unwrap();
    json["id"] = 42.into();
    json["status"] = "confirmed".into();
    json["items"][0]["line_total"] = "270.00".into();
    serde_json::from_value(json).unwrap()
}

#[test]
fn invoice_from_order_then_paid_in_full() {
    let order = confirmed_order();
    assert_eq!(order.status, SalesOrderStatus::Confirmed);
    assert_eq!(invoiceable_orders(std::slice::from_ref(&order)).count(), 1);

    let form = InvoiceForm::from_sales_order(&order, jan(5));
    assert_eq!(form.sales_order, Some(42));
    assert_eq!(form.customer, CUSTOMER);
    assert_eq!(form.payment_terms, PaymentTerms::Net30);
    assert_eq!(form.due_date, Some(Utc.with_ymd_and_hms(2024, 2, 4, 0, 0, 0).unwrap()));
    assert_eq!(form.totals().total_amount, dec!(285));

    // Saved invoice comes back from the API with its balance
    let mut json = serde_json::to_value(form.submit().unwrap()).unwrap();
    json["id"] = 7.into();
    json["balance_due"] = "285.00".into();
    let invoice = serde_json::from_value(json).unwrap();

    let mut payment = PaymentForm::for_invoice(&invoice, jan(10));
    payment.half_payment();
    assert_eq!(payment.remaining_balance(), dec!(142.5));
    payment.full_payment();
    assert_eq!(payment.remaining_balance(), Decimal::ZERO);

    let payload = payment.submit().unwrap();
    assert_eq!(payload.invoice, 7);
    assert_eq!(payload.amount, dec!(285));
}

#[test]
fn payments_settle_invoice_status() {
    let order = confirmed_order();
    let form = InvoiceForm::from_sales_order(&order, jan(5));
    let mut json = serde_json::to_value(form.submit().unwrap()).unwrap();
    json["id"] = 9.into();
    let mut invoice: Invoice = serde_json::from_value(json).unwrap();

    invoice.status = invoice.status.send().unwrap();
    assert_eq!(invoice.status, InvoiceStatus::Sent);

    // Half now, recorded once processed
    let mut payment = PaymentForm::for_invoice(&invoice, jan(10));
    payment.half_payment();
    let first = recorded(payment.submit().unwrap(), PaymentStatus::Pending);
    let mut payments = vec![first];

    invoice.apply_payments(&payments, jan(11));
    assert_eq!(invoice.status, InvoiceStatus::Sent);
    assert_eq!(invoice.paid_amount, Decimal::ZERO);

    payments[0].status = payments[0].status.process().unwrap();
    invoice.apply_payments(&payments, jan(11));
    assert_eq!(invoice.status, InvoiceStatus::PartiallyPaid);
    assert_eq!(invoice.outstanding(), dec!(142.5));

    // Rest of the balance
    let payment = PaymentForm::for_invoice(&invoice, jan(20));
    assert_eq!(payment.amount, dec!(142.5));
    payments.push(recorded(payment.submit().unwrap(), PaymentStatus::Completed));
    invoice.apply_payments(&payments, jan(20));
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert!(invoice.mark_paid().is_err());
}

fn recorded(payload: PaymentPayload, status: PaymentStatus) -> Payment {
    let mut json = serde_json::to_value(payload).unwrap();
    json["status"] = serde_json::to_value(status).unwrap();
    serde_json::from_value(json).unwrap()
}

#[test]
fn terms_drive_due_date_except_immediate() {
    let state = FormState::new(InvoiceForm::new(jan(1), PaymentTerms::Net30));
    assert_eq!(state.with_form(|f| f.due_date), Some(jan(31)));

    state
        .apply(InvoiceChange::PaymentTerms(PaymentTerms::Immediate))
        .unwrap();
    assert_eq!(state.with_form(|f| f.due_date), Some(jan(31)));

    state.apply(InvoiceChange::DueDate(jan(20))).unwrap();
    state
        .apply(InvoiceChange::PaymentTerms(PaymentTerms::Net15))
        .unwrap();
    assert_eq!(state.with_form(|f| f.due_date), Some(jan(16)));
}

#[test]
fn configured_default_terms_apply_to_new_invoices() {
    let config = FormsConfig::from_toml(
        r#"
        [invoice]
        default_payment_terms = "net_45"
        "#,
    )
    .unwrap();

    let form = InvoiceForm::with_config(jan(1), &config);
    assert_eq!(form.payment_terms, PaymentTerms::Net45);
    assert_eq!(
        form.due_date,
        Some(Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap())
    );
}

#[test]
fn editing_items_recomputes_invoice_totals() {
    let state = FormState::new(InvoiceForm::new(jan(1), PaymentTerms::Net30));
    let edits = [
        InvoiceChange::Customer(CUSTOMER.into()),
        InvoiceChange::Item(0, ItemChange::Product(widget())),
        InvoiceChange::Item(0, ItemChange::Quantity(dec!(2))),
        InvoiceChange::Item(0, ItemChange::UnitPrice(dec!(50))),
        InvoiceChange::AddItem,
        InvoiceChange::Item(1, ItemChange::Product(gadget())),
        InvoiceChange::Item(1, ItemChange::DiscountPercent(dec!(25))),
    ];
    for edit in edits {
        state.apply(edit).unwrap();
    }

    let totals = state.totals();
    assert_eq!(totals.items_subtotal, dec!(250));
    assert_eq!(totals.total_amount, dec!(250));
    assert!(state.validate().is_ok());

    // Overpayment is reported, not clamped
    state.apply(InvoiceChange::PaidAmount(dec!(300))).unwrap();
    assert_eq!(state.totals().balance_due, dec!(-50));
    assert!(state.totals().is_overpaid());
}

#[test]
fn removing_last_item_is_refused() {
    let state = FormState::new(InvoiceForm::new(jan(1), PaymentTerms::Net30));
    state.apply(InvoiceChange::AddItem).unwrap();
    state.apply(InvoiceChange::RemoveItem(0)).unwrap();
    assert!(state.apply(InvoiceChange::RemoveItem(0)).is_err());
    assert_eq!(state.with_form(|f| f.items().len()), 1);
}

#[test]
fn payment_rejects_amount_above_balance() {
    let order = confirmed_order();
    let form = InvoiceForm::from_sales_order(&order, jan(5))
        .with_change(InvoiceChange::PaidAmount(dec!(100)))
        .unwrap();

    let mut json = serde_json::to_value(form.to_payload().unwrap()).unwrap();
    json["id"] = 8.into();
    let invoice = serde_json::from_value(json).unwrap();

    let mut payment = PaymentForm::for_invoice(&invoice, jan(10));
    assert_eq!(payment.amount, dec!(185));

    payment.apply(PaymentChange::AmountText("185.01".into()));
    assert!(payment.validate().unwrap_err().contains("amount"));

    payment.apply(PaymentChange::AmountText("0".into()));
    assert!(payment.validate().unwrap_err().contains("amount"));
}
