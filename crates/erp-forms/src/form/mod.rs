//! # Form Controllers
//!
//! Each form owns one document snapshot and changes only through
//! [`DocumentForm::apply`]:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        apply(change)                                    │
//! │                                                                         │
//! │   current ──clone──► next ──edit──► Ok?  ──yes──► current = next       │
//! │                                      │                                  │
//! │                                      └──no───► current untouched,      │
//! │                                                error returned           │
//! │                                                                         │
//! │   totals() always reads the whole current snapshot.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod invoice;
mod items;
mod payment;
mod sales_order;

pub use invoice::{InvoiceChange, InvoiceForm};
pub use items::{ItemChange, ItemList};
pub use payment::{invoiceable_orders, PaymentChange, PaymentForm};
pub use sales_order::{SalesOrderChange, SalesOrderForm};

use erp_core::{DocumentTotals, FieldErrors};

use crate::error::FormResult;

/// A form holding one editable document.
pub trait DocumentForm: Clone {
    /// One field-level edit.
    type Change;

    /// Edits a scratch copy; the result replaces `self` only on success.
    fn apply(&mut self, change: Self::Change) -> FormResult<()> {
        let mut next = self.clone();
        next.apply_in_place(change)?;
        *self = next;
        Ok(())
    }

    /// Consuming variant of [`apply`](Self::apply).
    fn with_change(mut self, change: Self::Change) -> FormResult<Self> {
        self.apply(change)?;
        Ok(self)
    }

    /// Performs the edit on `self`. May leave `self` half-edited on error,
    /// which is why callers go through [`apply`](Self::apply).
    fn apply_in_place(&mut self, change: Self::Change) -> FormResult<()>;

    fn totals(&self) -> DocumentTotals;

    /// Submit-time checks, every failing field at once.
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// `None` for blank text, trimmed text otherwise.
pub(crate) fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
