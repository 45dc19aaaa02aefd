//! # Payment Terms & Due Dates
//!
//! Calendar arithmetic for invoice due dates and overdue checks.
//!
//! ## Due Date Derivation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoice_date + net_days (calendar days, weekends included)            │
//! │                                                                         │
//! │  immediate ──►  +0      net_15 ──► +15      net_30 ──► +30             │
//! │  net_45    ──► +45      net_60 ──► +60                                 │
//! │                                                                         │
//! │  2024-01-01T00:00:00Z + net_30 = 2024-01-31T00:00:00Z                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The invoice form only calls [`derive_due_date`] for net-day terms.
//! Choosing `immediate` keeps whatever due date the user already has.
//!
//! Nothing here reads the clock; callers pass `now`.

use chrono::{DateTime, Months, NaiveDate, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::status::{parse_option, InvoiceStatus, OptionValue};

// =============================================================================
// Payment Terms
// =============================================================================

/// When an invoice must be paid, relative to its invoice date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    Immediate,
    #[serde(rename = "net_15")]
    Net15,
    #[serde(rename = "net_30")]
    Net30,
    #[serde(rename = "net_45")]
    Net45,
    #[serde(rename = "net_60")]
    Net60,
}

impl PaymentTerms {
    /// Calendar days between invoice date and due date.
    pub const fn net_days(&self) -> u32 {
        match self {
            PaymentTerms::Immediate => 0,
            PaymentTerms::Net15 => 15,
            PaymentTerms::Net30 => 30,
            PaymentTerms::Net45 => 45,
            PaymentTerms::Net60 => 60,
        }
    }

    /// True for every variant except [`PaymentTerms::Immediate`].
    pub const fn is_net(&self) -> bool {
        !matches!(self, PaymentTerms::Immediate)
    }
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::Net30
    }
}

impl OptionValue for PaymentTerms {
    const ALL: &'static [Self] = &[
        PaymentTerms::Immediate,
        PaymentTerms::Net15,
        PaymentTerms::Net30,
        PaymentTerms::Net45,
        PaymentTerms::Net60,
    ];
    const FIELD: &'static str = "payment_terms";

    fn value(&self) -> &'static str {
        match self {
            PaymentTerms::Immediate => "immediate",
            PaymentTerms::Net15 => "net_15",
            PaymentTerms::Net30 => "net_30",
            PaymentTerms::Net45 => "net_45",
            PaymentTerms::Net60 => "net_60",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentTerms::Immediate => "Immediate",
            PaymentTerms::Net15 => "Net 15",
            PaymentTerms::Net30 => "Net 30",
            PaymentTerms::Net45 => "Net 45",
            PaymentTerms::Net60 => "Net 60",
        }
    }
}

impl fmt::Display for PaymentTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for PaymentTerms {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s.trim())
    }
}

// =============================================================================
// Date Arithmetic
// =============================================================================

/// Adds `days` calendar days. Saturates at the representable range.
pub fn add_days(date: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    TimeDelta::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

/// Adds `months` calendar months, clamping to the last day of the month
/// (Jan 31 + 1 month = Feb 29 in a leap year).
pub fn add_months(date: DateTime<Utc>, months: i32) -> DateTime<Utc> {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(if months < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Due date for an invoice dated `invoice_date` under `terms`.
///
/// ## Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use erp_core::terms::{derive_due_date, PaymentTerms};
///
/// let invoice_date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
/// let due = derive_due_date(invoice_date, PaymentTerms::Net30);
/// assert_eq!(due, Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap());
/// ```
pub fn derive_due_date(invoice_date: DateTime<Utc>, terms: PaymentTerms) -> DateTime<Utc> {
    add_days(invoice_date, i64::from(terms.net_days()))
}

// =============================================================================
// Overdue Checks
// =============================================================================

/// An invoice is overdue once its due date has passed while money is still owed.
pub fn is_overdue(due_date: DateTime<Utc>, balance_due: Decimal, now: DateTime<Utc>) -> bool {
    due_date < now && balance_due > Decimal::ZERO
}

/// Status an invoice moves to after its paid amount is recalculated.
///
/// ## Cascade
/// ```text
/// paid >= total              → paid
/// paid > 0                   → partially_paid
/// past due with money owed   → overdue
/// otherwise                  → current status unchanged
/// ```
pub fn invoice_status_after_payments(
    total_amount: Decimal,
    paid_amount: Decimal,
    due_date: DateTime<Utc>,
    current: InvoiceStatus,
    now: DateTime<Utc>,
) -> InvoiceStatus {
    if paid_amount >= total_amount {
        InvoiceStatus::Paid
    } else if paid_amount > Decimal::ZERO {
        InvoiceStatus::PartiallyPaid
    } else if is_overdue(due_date, total_amount.saturating_sub(paid_amount), now) {
        InvoiceStatus::Overdue
    } else {
        current
    }
}

/// Day-granular check used for highlighting dates in lists.
pub fn is_past_due_day(due_date: DateTime<Utc>, today: NaiveDate) -> bool {
    due_date.date_naive() < today
}

/// Whole days from `now` until `due_date`, truncated toward zero.
/// Negative once the due date has passed.
pub fn days_until_due(due_date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (due_date - now).num_days()
}

// =============================================================================
// Unit Tests
// =============================================================================
