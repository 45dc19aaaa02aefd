//! # Input Normalisation
//!
//! Numeric inputs arrive as text and may be half-typed ("", "-", "12.",
//! "3abc"). The pricing engine only ever sees decimals, so every numeric field
//! goes through [`coerce_decimal`] first:
//!
//! ```text
//! "12.50"  → 12.50        "  7 "  → 7
//! "3abc"   → 3            ".5"    → 0.5
//! ""       → 0            "abc"   → 0
//! "-"      → 0            "1e3"   → 1000
//! "2E-1"   → 0.2          "1e"    → 1
//! ```
//!
//! The leading numeric prefix is kept and anything unparseable becomes zero.
//! Values outside the `Decimal` range also become zero.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Exponents longer than this are out of range for `Decimal` anyway.
const MAX_EXPONENT_DIGITS: usize = 4;

/// Parses the leading decimal number of `input`, or returns zero.
pub fn coerce_decimal(input: &str) -> Decimal {
    let Some(prefix) = numeric_prefix(input.trim_start()) else {
        return Decimal::ZERO;
    };
    let parsed = if prefix.scientific {
        Decimal::from_scientific(&prefix.canonical)
    } else {
        Decimal::from_str(&prefix.canonical)
    };
    parsed.unwrap_or(Decimal::ZERO)
}

struct NumericPrefix {
    canonical: String,
    scientific: bool,
}

/// Longest prefix shaped like `[+-]?digits[.digits][(e|E)[+-]digits]`,
/// rewritten as `-?digits[.digits][e-?digits]` with a leading zero when the
/// integer part is missing. An `e` with no digits after it is not part of
/// the number.
fn numeric_prefix(input: &str) -> Option<NumericPrefix> {
    let bytes = input.as_bytes();
    let digits_from = |start: usize| {
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        end
    };

    let mut pos = 0;
    let negative = match bytes.first() {
        Some(b'-') => {
            pos = 1;
            true
        }
        Some(b'+') => {
            pos = 1;
            false
        }
        _ => false,
    };

    let whole_start = pos;
    pos = digits_from(pos);
    let whole = &input[whole_start..pos];

    let mut fraction = "";
    if bytes.get(pos) == Some(&b'.') {
        let fraction_end = digits_from(pos + 1);
        fraction = &input[pos + 1..fraction_end];
        pos = fraction_end;
    }

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }

    let mut exponent = None;
    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        let mut exp_pos = pos + 1;
        let exp_negative = match bytes.get(exp_pos) {
            Some(b'-') => {
                exp_pos += 1;
                true
            }
            Some(b'+') => {
                exp_pos += 1;
                false
            }
            _ => false,
        };
        let exp_end = digits_from(exp_pos);
        let digits = input[exp_pos..exp_end].trim_start_matches('0');
        if exp_end > exp_pos {
            exponent = Some((exp_negative, digits));
        }
    }

    let mut canonical = String::with_capacity(input.len() + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(if whole.is_empty() { "0" } else { whole });
    if !fraction.is_empty() {
        canonical.push('.');
        canonical.push_str(fraction);
    }

    let scientific = match exponent {
        Some((_, digits)) if digits.len() > MAX_EXPONENT_DIGITS => return None,
        Some((exp_negative, digits)) => {
            canonical.push('e');
            if exp_negative {
                canonical.push('-');
            }
            canonical.push_str(if digits.is_empty() { "0" } else { digits });
            true
        }
        None => false,
    };

    Some(NumericPrefix {
        canonical,
        scientific,
    })
}
