//! # Line Item Editing
//!
//! The item table shared by the sales-order and invoice forms.
//!
//! ## Item Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI Action              Operation                   Item List Change    │
//! │  ─────────              ─────────                   ────────────────    │
//! │                                                                         │
//! │  Click "Add Item" ─────► add()  ──────────────────► push(blank row)    │
//! │                                                                         │
//! │  Pick product ─────────► edit(i, Product(p)) ─────► product + price    │
//! │                                                                         │
//! │  Type quantity ────────► edit(i, Quantity(q)) ────► items[i].qty = q   │
//! │                                                                         │
//! │  Click delete ─────────► remove(i) ───────────────► refused on last row│
//! │                                                                         │
//! │  NOTE: totals are never stored here; they are recomputed on read.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use erp_core::validation::{
    validate_discount_percent, validate_product_ref, validate_quantity, validate_unit_price,
};
use erp_core::{FieldErrors, LineItem, ProductRef};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, FormResult};
use crate::normalize::coerce_decimal;

use super::non_blank;

/// One edit to one row.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemChange {
    /// Picks a catalog product; the row takes over its selling price.
    Product(ProductRef),
    /// Clears the product reference without touching the price.
    ClearProduct,
    Quantity(Decimal),
    UnitPrice(Decimal),
    DiscountPercent(Decimal),
    Notes(Option<String>),
}

impl ItemChange {
    /// Builds a numeric change from raw input text, coercing junk to zero.
    pub fn quantity_text(text: &str) -> Self {
        ItemChange::Quantity(coerce_decimal(text))
    }

    pub fn unit_price_text(text: &str) -> Self {
        ItemChange::UnitPrice(coerce_decimal(text))
    }

    pub fn discount_percent_text(text: &str) -> Self {
        ItemChange::DiscountPercent(coerce_decimal(text))
    }
}

/// Ordered, never-empty list of line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct ItemList {
    items: Vec<LineItem>,
}

impl ItemList {
    /// A list holding one blank row.
    pub fn new() -> Self {
        ItemList {
            items: vec![LineItem::blank()],
        }
    }

    /// Wraps existing rows; an empty input is refused.
    pub fn from_items(items: Vec<LineItem>) -> FormResult<Self> {
        if items.is_empty() {
            return Err(FormError::LastItem);
        }
        Ok(ItemList { items })
    }

    /// Wraps existing rows, falling back to one blank row when empty.
    pub fn from_items_or_blank(items: Vec<LineItem>) -> Self {
        Self::from_items(items).unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; kept for symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    /// Appends a blank row.
    pub fn add(&mut self) {
        self.items.push(LineItem::blank());
        debug!(items = self.items.len(), "Line item added");
    }

    /// Removes row `index`, refusing to remove the last remaining row.
    pub fn remove(&mut self, index: usize) -> FormResult<LineItem> {
        self.check_index(index)?;
        if self.items.len() == 1 {
            return Err(FormError::LastItem);
        }
        let removed = self.items.remove(index);
        debug!(index, items = self.items.len(), "Line item removed");
        Ok(removed)
    }

    /// Applies one change to row `index`.
    pub fn edit(&mut self, index: usize, change: ItemChange) -> FormResult<()> {
        self.check_index(index)?;
        let item = &mut self.items[index];

        match change {
            ItemChange::Product(product) => {
                debug!(
                    index,
                    product = %product.id,
                    price = %product.selling_price,
                    "Product selected"
                );
                item.product = product.id;
                item.unit_price = product.selling_price;
            }
            ItemChange::ClearProduct => item.product.clear(),
            ItemChange::Quantity(quantity) => item.quantity = quantity,
            ItemChange::UnitPrice(unit_price) => item.unit_price = unit_price,
            ItemChange::DiscountPercent(discount) => item.discount_percent = discount,
            ItemChange::Notes(notes) => item.notes = non_blank(notes),
        }

        Ok(())
    }

    /// Records row errors under `item_{index}_{field}` keys.
    ///
    /// `require_price` is the invoice rule; sales orders accept free rows.
    pub fn validate_into(&self, errors: &mut FieldErrors, require_price: bool) {
        for (index, item) in self.items.iter().enumerate() {
            errors.check(
                format!("item_{index}_product"),
                validate_product_ref(&item.product),
            );
            errors.check(
                format!("item_{index}_quantity"),
                validate_quantity(item.quantity),
            );
            if require_price {
                errors.check(
                    format!("item_{index}_unit_price"),
                    validate_unit_price(item.unit_price),
                );
            }
            errors.check(
                format!("item_{index}_discount_percent"),
                validate_discount_percent(item.discount_percent),
            );
        }
    }

    fn check_index(&self, index: usize) -> FormResult<()> {
        if index >= self.items.len() {
            return Err(FormError::ItemOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        Ok(())
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<Vec<LineItem>> for ItemList {
    type Error = FormError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        ItemList::from_items(items)
    }
}

impl From<ItemList> for Vec<LineItem> {
    fn from(list: ItemList) -> Self {
        list.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget() -> ProductRef {
        ProductRef {
            id: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
            name: "Widget".to_string(),
            sku: "WID-1".to_string(),
            selling_price: dec!(49.99),
        }
    }

    #[test]
    fn test_new_list_has_one_blank_row() {
        let list = ItemList::new();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(&LineItem::blank()));
    }

    #[test]
    fn test_cannot_remove_last_row() {
        let mut list = ItemList::new();
        assert!(matches!(list.remove(0), Err(FormError::LastItem)));

        list.add();
        assert!(list.remove(1).is_ok());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut list = ItemList::new();
        let err = list.edit(5, ItemChange::Quantity(dec!(2))).unwrap_err();
        assert!(matches!(err, FormError::ItemOutOfRange { index: 5, len: 1 }));
    }

    #[test]
    fn test_selecting_product_fills_price() {
        let mut list = ItemList::new();
        list.edit(0, ItemChange::Product(widget())).unwrap();

        let row = list.get(0).unwrap();
        assert_eq!(row.product, widget().id);
        assert_eq!(row.unit_price, dec!(49.99));

        // Manual override afterwards sticks
        list.edit(0, ItemChange::unit_price_text("45")).unwrap();
        assert_eq!(list.get(0).unwrap().unit_price, dec!(45));
    }

    #[test]
    fn test_text_changes_are_coerced() {
        let mut list = ItemList::new();
        list.edit(0, ItemChange::quantity_text("")).unwrap();
        list.edit(0, ItemChange::discount_percent_text("12.5%")).unwrap();

        let row = list.get(0).unwrap();
        assert_eq!(row.quantity, Decimal::ZERO);
        assert_eq!(row.discount_percent, dec!(12.5));
    }

    #[test]
    fn test_validation_keys() {
        let list = ItemList::new();
        let mut errors = FieldErrors::new();
        list.validate_into(&mut errors, true);

        assert!(errors.contains("item_0_product"));
        assert!(errors.contains("item_0_unit_price"));
        assert!(!errors.contains("item_0_quantity"));

        let mut order_errors = FieldErrors::new();
        list.validate_into(&mut order_errors, false);
        assert!(!order_errors.contains("item_0_unit_price"));
    }

    #[test]
    fn test_deserializing_empty_list_fails() {
        let result: Result<ItemList, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }
}
