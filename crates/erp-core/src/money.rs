//! # Money Module
//!
//! Currency list and display formatting for decimal amounts.
//!
//! ## Why Decimal, Not Float?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  The API stores DecimalField(max_digits=12, decimal_places=2).          │
//! │  If the form adds floats, the displayed total can drift from the       │
//! │  total the server computes for the same items.                          │
//! │                                                                         │
//! │  OUR SOLUTION: rust_decimal::Decimal (base 10, 28 digits)              │
//! │    0.1 + 0.2 = 0.3 exactly                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens ONLY in [`format_amount`] / [`format_currency`]. Values
//! handed to the pricing engine and sent to the API are never rounded.
//!
//! ## Usage
//! ```rust
//! use erp_core::money::format_currency;
//! use rust_decimal::Decimal;
//!
//! let total = Decimal::new(123450, 2); // 1234.50
//! assert_eq!(format_currency(total, "USD"), "$ 1,234.5");
//! assert_eq!(format_currency(total, "XYZ"), "XYZ 1,234.5");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

/// Maximum fraction digits shown on screen.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Currency
// =============================================================================

/// Currencies offered in the tenant settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Pkr,
    Usd,
    Eur,
    Gbp,
    Inr,
    Aed,
    Sar,
}

impl Currency {
    pub const ALL: [Currency; 7] = [
        Currency::Pkr,
        Currency::Usd,
        Currency::Eur,
        Currency::Gbp,
        Currency::Inr,
        Currency::Aed,
        Currency::Sar,
    ];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Pkr => "PKR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Inr => "INR",
            Currency::Aed => "AED",
            Currency::Sar => "SAR",
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Currency::Pkr => "Pakistani Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Gbp => "British Pound",
            Currency::Inr => "Indian Rupee",
            Currency::Aed => "UAE Dirham",
            Currency::Sar => "Saudi Riyal",
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Pkr => "Rs.",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Inr => "₹",
            Currency::Aed => "د.إ",
            Currency::Sar => "ر.س",
        }
    }

    /// Looks up a currency by its code (exact match, as stored by the API).
    pub fn from_code(code: &str) -> Option<Currency> {
        Currency::ALL.iter().copied().find(|c| c.code() == code)
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Pkr
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Returns the display symbol for `code`, or the code itself when the
/// currency is not in [`Currency::ALL`].
pub fn currency_symbol(code: &str) -> &str {
    Currency::from_code(code).map_or(code, |c| c.symbol())
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount with thousands separators and 0-2 fraction digits.
///
/// ```text
/// 1234.5    → "1,234.5"
/// 1000000   → "1,000,000"
/// 10.005    → "10.01"   (half away from zero)
/// -285      → "-285"
/// ```
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let digits = rounded.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + whole.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount for display as `"{symbol} {amount}"`.
///
/// This is a presentation helper; it never feeds back into computation.
pub fn format_currency(amount: Decimal, currency_code: &str) -> String {
    format!("{} {}", currency_symbol(currency_code), format_amount(amount))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_lookup() {
        assert_eq!(Currency::from_code("USD"), Some(Currency::Usd));
        assert_eq!(Currency::from_code("usd"), None);
        assert_eq!(Currency::default(), Currency::Pkr);
        assert_eq!(Currency::Gbp.name(), "British Pound");
    }

    #[test]
    fn test_symbol_falls_back_to_code() {
        assert_eq!(currency_symbol("PKR"), "Rs.");
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("JPY"), "JPY");
    }

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(1234.5)), "1,234.5");
        assert_eq!(format_amount(dec!(1000000)), "1,000,000");
        assert_eq!(format_amount(dec!(123456.78)), "123,456.78");
    }

    #[test]
    fn test_format_amount_rounding_is_display_only() {
        let amount = dec!(10.005);
        assert_eq!(format_amount(amount), "10.01");
        assert_eq!(format_amount(dec!(2.50)), "2.5");
        assert_eq!(format_amount(dec!(-0.001)), "0");
        // The value itself is untouched
        assert_eq!(amount, dec!(10.005));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(285), "PKR"), "Rs. 285");
        assert_eq!(format_currency(dec!(-1234.5), "USD"), "$ -1,234.5");
        assert_eq!(format_currency(dec!(5), "JPY"), "JPY 5");
    }
}
