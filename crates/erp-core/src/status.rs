//! # Option Lists
//!
//! Statuses, priorities and payment methods as explicit enums.
//!
//! ## Lookup Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Wire value → Display                                 │
//! │                                                                         │
//! │  Typed value (InvoiceStatus::Paid)                                      │
//! │      │                                                                  │
//! │      └──► .label() / .color()      exhaustive match, no fallback needed │
//! │                                                                         │
//! │  Raw API string ("paid", "archived", "")                                │
//! │      │                                                                  │
//! │      ├──► label_for::<T>()  → known label, else the raw value          │
//! │      ├──► color_for::<T>()  → known colour, else NEUTRAL_COLOR         │
//! │      └──► "x".parse::<T>()  → strict: ValidationError::NotAllowed      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::NEUTRAL_COLOR;

// =============================================================================
// Traits
// =============================================================================

/// A closed list of options with a wire value and a display label.
pub trait OptionValue: Sized + Copy + 'static {
    /// Every variant, in display order.
    const ALL: &'static [Self];

    /// Name of the field the option belongs to (used in errors).
    const FIELD: &'static str;

    /// Value used on the wire (`snake_case`).
    fn value(&self) -> &'static str;

    /// Human label.
    fn label(&self) -> &'static str;

    /// Finds the variant whose wire value is `value`.
    fn lookup(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|o| o.value() == value)
    }
}

/// An option that is rendered as a coloured chip.
pub trait ColoredOption: OptionValue {
    /// Hex colour of the chip.
    fn color(&self) -> &'static str;
}

/// Label for a raw wire value; unknown values are shown as-is.
pub fn label_for<T: OptionValue>(value: &str) -> &str {
    T::lookup(value).map_or(value, |o| o.label())
}

/// Colour for a raw wire value; unknown values get [`NEUTRAL_COLOR`].
pub fn color_for<T: ColoredOption>(value: &str) -> &'static str {
    T::lookup(value).map_or(NEUTRAL_COLOR, |o| o.color())
}

/// Strict parse of a wire value.
pub fn parse_option<T: OptionValue>(value: &str) -> ValidationResult<T> {
    T::lookup(value).ok_or_else(|| ValidationError::NotAllowed {
        field: T::FIELD.to_string(),
        allowed: T::ALL.iter().map(|o| o.value().to_string()).collect(),
    })
}

// =============================================================================
// Sales Order Status
// =============================================================================

/// Lifecycle of a sales order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SalesOrderStatus {
    Draft,
    Confirmed,
    PartiallyDelivered,
    Delivered,
    Cancelled,
}

impl SalesOrderStatus {
    /// Only confirmed orders are offered when picking an order to invoice.
    pub fn is_invoice_candidate(&self) -> bool {
        matches!(self, SalesOrderStatus::Confirmed)
    }

    /// Only drafts can be confirmed.
    pub fn can_confirm(&self) -> bool {
        matches!(self, SalesOrderStatus::Draft)
    }

    /// Refused once delivered or already cancelled.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, SalesOrderStatus::Delivered | SalesOrderStatus::Cancelled)
    }

    pub fn confirm(self) -> ValidationResult<Self> {
        transition(
            self,
            self.can_confirm(),
            SalesOrderStatus::Confirmed,
            "Only draft orders can be confirmed",
        )
    }

    pub fn cancel(self) -> ValidationResult<Self> {
        transition(
            self,
            self.can_cancel(),
            SalesOrderStatus::Cancelled,
            "Cannot cancel delivered or already cancelled orders",
        )
    }
}

impl Default for SalesOrderStatus {
    fn default() -> Self {
        SalesOrderStatus::Draft
    }
}

impl OptionValue for SalesOrderStatus {
    const ALL: &'static [Self] = &[
        SalesOrderStatus::Draft,
        SalesOrderStatus::Confirmed,
        SalesOrderStatus::PartiallyDelivered,
        SalesOrderStatus::Delivered,
        SalesOrderStatus::Cancelled,
    ];
    const FIELD: &'static str = "status";

    fn value(&self) -> &'static str {
        match self {
            SalesOrderStatus::Draft => "draft",
            SalesOrderStatus::Confirmed => "confirmed",
            SalesOrderStatus::PartiallyDelivered => "partially_delivered",
            SalesOrderStatus::Delivered => "delivered",
            SalesOrderStatus::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SalesOrderStatus::Draft => "Draft",
            SalesOrderStatus::Confirmed => "Confirmed",
            SalesOrderStatus::PartiallyDelivered => "Partially Delivered",
            SalesOrderStatus::Delivered => "Delivered",
            SalesOrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl ColoredOption for SalesOrderStatus {
    fn color(&self) -> &'static str {
        match self {
            SalesOrderStatus::Draft => "#9e9e9e",
            SalesOrderStatus::Confirmed => "#2196f3",
            SalesOrderStatus::PartiallyDelivered => "#ff9800",
            SalesOrderStatus::Delivered => "#4caf50",
            SalesOrderStatus::Cancelled => "#f44336",
        }
    }
}

// =============================================================================
// Priority
// =============================================================================

/// Sales order priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Normal,
    High,
    Urgent,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl OptionValue for Priority {
    const ALL: &'static [Self] = &[
        Priority::Low,
        Priority::Normal,
        Priority::High,
        Priority::Urgent,
    ];
    const FIELD: &'static str = "priority";

    fn value(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Normal => "Normal",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl ColoredOption for Priority {
    fn color(&self) -> &'static str {
        match self {
            Priority::Low => "#4caf50",
            Priority::Normal => "#2196f3",
            Priority::High => "#ff9800",
            Priority::Urgent => "#f44336",
        }
    }
}

// =============================================================================
// Invoice Status
// =============================================================================

/// Lifecycle of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    PartiallyPaid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    /// Only drafts can be sent.
    pub fn can_send(&self) -> bool {
        matches!(self, InvoiceStatus::Draft)
    }

    pub fn can_mark_paid(&self) -> bool {
        !matches!(self, InvoiceStatus::Paid | InvoiceStatus::Cancelled)
    }

    pub fn send(self) -> ValidationResult<Self> {
        transition(
            self,
            self.can_send(),
            InvoiceStatus::Sent,
            "Only draft invoices can be sent",
        )
    }

    /// See [`Invoice::mark_paid`](crate::Invoice::mark_paid), which also
    /// settles the paid amount.
    pub fn mark_paid(self) -> ValidationResult<Self> {
        transition(
            self,
            self.can_mark_paid(),
            InvoiceStatus::Paid,
            "Cannot mark paid/cancelled invoices as paid",
        )
    }
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl OptionValue for InvoiceStatus {
    const ALL: &'static [Self] = &[
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Paid,
        InvoiceStatus::PartiallyPaid,
        InvoiceStatus::Overdue,
        InvoiceStatus::Cancelled,
    ];
    const FIELD: &'static str = "status";

    fn value(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::PartiallyPaid => "partially_paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "Draft",
            InvoiceStatus::Sent => "Sent",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::PartiallyPaid => "Partially Paid",
            InvoiceStatus::Overdue => "Overdue",
            InvoiceStatus::Cancelled => "Cancelled",
        }
    }
}

impl ColoredOption for InvoiceStatus {
    fn color(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "#9e9e9e",
            InvoiceStatus::Sent => "#2196f3",
            InvoiceStatus::Paid => "#4caf50",
            InvoiceStatus::PartiallyPaid => "#ff9800",
            InvoiceStatus::Overdue => "#f44336",
            InvoiceStatus::Cancelled => "#9e9e9e",
        }
    }
}

// =============================================================================
// Payment Method / Status
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    BankTransfer,
    CreditCard,
    Check,
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl OptionValue for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::Cash,
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
        PaymentMethod::Check,
        PaymentMethod::Other,
    ];
    const FIELD: &'static str = "payment_method";

    fn value(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Check => "check",
            PaymentMethod::Other => "other",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Check => "Check",
            PaymentMethod::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    /// Only pending payments can be processed.
    pub fn can_process(&self) -> bool {
        matches!(self, PaymentStatus::Pending)
    }

    pub fn process(self) -> ValidationResult<Self> {
        transition(
            self,
            self.can_process(),
            PaymentStatus::Completed,
            "Only pending payments can be processed",
        )
    }

    /// Completed payments are the only ones counted towards an invoice.
    pub fn counts_towards_paid(&self) -> bool {
        matches!(self, PaymentStatus::Completed)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl OptionValue for PaymentStatus {
    const ALL: &'static [Self] = &[
        PaymentStatus::Pending,
        PaymentStatus::Completed,
        PaymentStatus::Failed,
        PaymentStatus::Cancelled,
    ];
    const FIELD: &'static str = "status";

    fn value(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Cancelled => "cancelled",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Completed => "Completed",
            PaymentStatus::Failed => "Failed",
            PaymentStatus::Cancelled => "Cancelled",
        }
    }
}

impl ColoredOption for PaymentStatus {
    fn color(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "#ff9800",
            PaymentStatus::Completed => "#4caf50",
            PaymentStatus::Failed => "#f44336",
            PaymentStatus::Cancelled => "#9e9e9e",
        }
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

fn transition<T: OptionValue>(
    from: T,
    allowed: bool,
    to: T,
    rule: &'static str,
) -> ValidationResult<T> {
    if !allowed {
        return Err(ValidationError::InvalidTransition {
            from: from.value().to_string(),
            rule,
        });
    }
    Ok(to)
}

// =============================================================================
// Display / FromStr
// =============================================================================

impl fmt::Display for SalesOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for SalesOrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s)
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s)
    }
}

impl FromStr for InvoiceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s)
    }
}

impl FromStr for PaymentMethod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s)
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_option(s)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values_map_to_colors() {
        assert_eq!(color_for::<InvoiceStatus>("paid"), "#4caf50");
        assert_eq!(color_for::<InvoiceStatus>("overdue"), "#f44336");
        assert_eq!(color_for::<SalesOrderStatus>("partially_delivered"), "#ff9800");
        assert_eq!(color_for::<Priority>("urgent"), "#f44336");
        assert_eq!(color_for::<PaymentStatus>("pending"), "#ff9800");
    }

    #[test]
    fn test_unknown_values_fall_back_to_neutral() {
        assert_eq!(color_for::<InvoiceStatus>("archived"), NEUTRAL_COLOR);
        assert_eq!(color_for::<Priority>(""), NEUTRAL_COLOR);
        assert_eq!(label_for::<InvoiceStatus>("archived"), "archived");
        assert_eq!(label_for::<InvoiceStatus>("partially_paid"), "Partially Paid");
    }

    #[test]
    fn test_every_variant_round_trips_through_its_wire_value() {
        for status in InvoiceStatus::ALL {
            assert_eq!(status.value().parse::<InvoiceStatus>(), Ok(*status));
        }
        for method in PaymentMethod::ALL {
            assert_eq!(method.value().parse::<PaymentMethod>(), Ok(*method));
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        let err = "shipped".parse::<SalesOrderStatus>().unwrap_err();
        match err {
            ValidationError::NotAllowed { field, allowed } => {
                assert_eq!(field, "status");
                assert_eq!(allowed.len(), 5);
                assert!(allowed.contains(&"partially_delivered".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serde_uses_wire_values() {
        let json = serde_json::to_string(&SalesOrderStatus::PartiallyDelivered).unwrap();
        assert_eq!(json, "\"partially_delivered\"");
        let method: PaymentMethod = serde_json::from_str("\"bank_transfer\"").unwrap();
        assert_eq!(method, PaymentMethod::BankTransfer);
    }

    #[test]
    fn test_only_confirmed_orders_are_invoice_candidates() {
        assert!(SalesOrderStatus::Confirmed.is_invoice_candidate());
        assert!(!SalesOrderStatus::Draft.is_invoice_candidate());
        assert!(!SalesOrderStatus::Delivered.is_invoice_candidate());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Priority::default(), Priority::Normal);
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Draft);
    }

    #[test]
    fn test_order_lifecycle() {
        assert_eq!(SalesOrderStatus::Draft.confirm().unwrap(), SalesOrderStatus::Confirmed);
        assert!(!SalesOrderStatus::Confirmed.can_confirm());

        let err = SalesOrderStatus::Confirmed.confirm().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Only draft orders can be confirmed (current status: confirmed)"
        );

        assert!(SalesOrderStatus::Draft.can_cancel());
        assert!(SalesOrderStatus::PartiallyDelivered.can_cancel());
        assert!(!SalesOrderStatus::Delivered.can_cancel());
        assert!(!SalesOrderStatus::Cancelled.can_cancel());
        assert_eq!(
            SalesOrderStatus::Confirmed.cancel().unwrap(),
            SalesOrderStatus::Cancelled
        );
    }

    #[test]
    fn test_invoice_lifecycle() {
        assert_eq!(InvoiceStatus::Draft.send().unwrap(), InvoiceStatus::Sent);
        assert!(InvoiceStatus::Sent.send().is_err());

        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Sent,
            InvoiceStatus::PartiallyPaid,
            InvoiceStatus::Overdue,
        ] {
            assert_eq!(status.mark_paid().unwrap(), InvoiceStatus::Paid);
        }
        assert!(!InvoiceStatus::Paid.can_mark_paid());
        match InvoiceStatus::Cancelled.mark_paid() {
            Err(ValidationError::InvalidTransition { from, .. }) => assert_eq!(from, "cancelled"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_only_pending_payments_process() {
        assert_eq!(PaymentStatus::Pending.process().unwrap(), PaymentStatus::Completed);
        for status in [
            PaymentStatus::Completed,
            PaymentStatus::Failed,
            PaymentStatus::Cancelled,
        ] {
            assert!(!status.can_process());
            assert!(status.process().is_err());
        }
        assert!(PaymentStatus::Completed.counts_towards_paid());
        assert!(!PaymentStatus::Pending.counts_towards_paid());
    }
}
