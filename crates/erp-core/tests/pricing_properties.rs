//! Property and scenario tests for the pricing engine.

use chrono::{TimeZone, Utc};
use erp_core::pricing::{balance_due, document_total, items_subtotal, line_total};
use erp_core::terms::{derive_due_date, PaymentTerms};
use erp_core::{DocumentTotals, LineItem};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Amounts with up to two decimal places, like the API's DecimalField.
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000, 0u32..=2).prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn line_item() -> impl Strategy<Value = LineItem> {
    (amount(), amount(), percent()).prop_map(|(quantity, unit_price, discount)| {
        LineItem::new(quantity, unit_price).with_discount(discount)
    })
}

proptest! {
    #[test]
    fn no_discount_means_quantity_times_price(quantity in amount(), unit_price in amount()) {
        let item = LineItem::new(quantity, unit_price);
        prop_assert_eq!(line_total(&item), quantity * unit_price);
    }

    #[test]
    fn line_total_matches_algebraic_identity(item in line_item()) {
        let gross = item.quantity * item.unit_price;
        let expected = gross - gross * item.discount_percent / Decimal::ONE_HUNDRED;
        prop_assert_eq!(line_total(&item), expected);
    }

    #[test]
    fn empty_document_total_is_tax_minus_discount(tax in amount(), discount in amount()) {
        prop_assert_eq!(document_total(&[], tax, discount), tax - discount);
    }

    #[test]
    fn document_total_without_adjustments_is_sum_of_lines(
        items in prop::collection::vec(line_item(), 0..12)
    ) {
        let sum: Decimal = items.iter().map(line_total).sum();
        prop_assert_eq!(document_total(&items, Decimal::ZERO, Decimal::ZERO), sum);
        prop_assert_eq!(items_subtotal(&items), sum);
    }

    #[test]
    fn balance_due_identities(total in amount(), overpay in 1i64..1_000_000) {
        let x = Decimal::new(overpay, 2);
        prop_assert_eq!(balance_due(total, Decimal::ZERO), total);
        prop_assert_eq!(balance_due(total, total), Decimal::ZERO);
        prop_assert_eq!(balance_due(total, total + x), -x);
    }

    #[test]
    fn item_order_does_not_change_totals(
        items in prop::collection::vec(line_item(), 1..8),
        tax in amount(),
        discount in amount(),
    ) {
        let mut reversed = items.clone();
        reversed.reverse();
        prop_assert_eq!(
            DocumentTotals::compute(&items, tax, discount, Decimal::ZERO),
            DocumentTotals::compute(&reversed, tax, discount, Decimal::ZERO)
        );
    }
}

#[test]
fn scenario_single_discounted_item_with_tax_and_discount() {
    let item = LineItem::new(dec!(3), dec!(100)).with_discount(dec!(10));
    assert_eq!(line_total(&item), dec!(270));
    assert_eq!(document_total(&[item], dec!(20), dec!(5)), dec!(285));
}

#[test]
fn scenario_two_items_without_adjustments() {
    let items = [
        LineItem::new(dec!(2), dec!(50)),
        LineItem::new(dec!(1), dec!(200)).with_discount(dec!(25)),
    ];
    assert_eq!(line_total(&items[0]), dec!(100));
    assert_eq!(line_total(&items[1]), dec!(150));
    assert_eq!(document_total(&items, dec!(0), dec!(0)), dec!(250));
}

#[test]
fn scenario_invoice_paid_in_two_instalments() {
    let total = dec!(285);
    let mut paid = dec!(100);
    assert_eq!(balance_due(total, paid), dec!(185));

    paid += dec!(185);
    assert_eq!(balance_due(total, paid), dec!(0));
}

#[test]
fn scenario_net_30_due_date() {
    let invoice_date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    assert_eq!(
        derive_due_date(invoice_date, PaymentTerms::Net30),
        Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()
    );
}
