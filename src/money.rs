//! Money Conversion Module
//!
//! Unified conversion between the integer-cents representation persisted in
//! the database and the client-facing decimal/string representation. All
//! monetary conversions MUST go through this module.
//!
//! ## Internal Representation
//! - Amounts are stored as integer minor currency units (cents)
//! - Write boundary: decimal dollars x 100, rounded to the nearest cent
//! - Read boundary: cents / 100 for edit forms, locale formatting for display

use rust_decimal::prelude::*;
use std::str::FromStr;
use thiserror::Error;

/// Money conversion errors
#[derive(Debug, Error, PartialEq)]
pub enum MoneyError {
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Amount too large")]
    Overflow,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

// ============================================================================
// Parse: Client -> Decimal
// ============================================================================

/// Parse a client-submitted amount string into a Decimal.
///
/// Strict format rules, no silent coercion:
/// - Rejects empty strings
/// - Rejects `.5` (must be `0.5`) and `5.` (must be `5.0` or `5`)
/// - Rejects scientific notation and explicit `+` prefix
///
/// Sign is preserved: non-positive values are rejected later by [`to_cents`]
/// so the caller can report "greater than zero" separately from "not a number".
pub fn parse_amount(amount_str: &str) -> Result<Decimal, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    if amount_str.starts_with('+') {
        return Err(MoneyError::InvalidFormat("+ prefix not allowed".into()));
    }

    if amount_str.contains('e') || amount_str.contains('E') {
        return Err(MoneyError::InvalidFormat(
            "scientific notation not allowed".into(),
        ));
    }

    let digits = amount_str.strip_prefix('-').unwrap_or(amount_str);
    if digits.starts_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing leading zero (e.g., use 0.5 instead of .5)".into(),
        ));
    }
    if digits.ends_with('.') {
        return Err(MoneyError::InvalidFormat(
            "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
        ));
    }

    Decimal::from_str(amount_str)
        .map_err(|e| MoneyError::InvalidFormat(e.to_string()))
}

// ============================================================================
// Cents boundary
// ============================================================================

/// Convert a decimal dollar amount to integer cents.
///
/// Rounds to the nearest cent, halves away from zero, so `"12.345"` persists
/// as 1235. Rejects non-positive amounts and values that do not fit the
/// 32-bit integer column.
pub fn to_cents(amount: Decimal) -> Result<i64, MoneyError> {
    if amount.is_sign_negative() || amount.is_zero() {
        return Err(MoneyError::InvalidAmount);
    }

    let cents = (amount * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let cents = cents.to_i64().ok_or(MoneyError::Overflow)?;

    // Rounding 0.004 and below collapses to zero cents
    if cents == 0 {
        return Err(MoneyError::InvalidAmount);
    }
    if cents > i32::MAX as i64 {
        return Err(MoneyError::Overflow);
    }
    Ok(cents)
}

/// Convert integer cents back to a decimal dollar amount (scale 2).
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

// ============================================================================
// Format: cents -> display string
// ============================================================================

/// Format integer cents as an en-US currency string, e.g. `$1,234.56`.
pub fn format_currency(cents: i64) -> String {
    let negative = cents < 0;
    let abs = cents.unsigned_abs();
    let dollars = abs / 100;
    let rem = abs % 100;

    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-${}.{:02}", grouped, rem)
    } else {
        format!("${}.{:02}", grouped, rem)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qa_parse_amount_variations() {
        assert_eq!(parse_amount("1.23").unwrap(), Decimal::new(123, 2));
        assert_eq!(parse_amount("  250 ").unwrap(), Decimal::from(250));
        assert_eq!(parse_amount("001.20").unwrap(), Decimal::from_str("1.20").unwrap());
        // Sign preserved; the cents boundary rejects it later
        assert_eq!(parse_amount("-5").unwrap(), Decimal::from(-5));
    }

    #[test]
    fn qa_parse_amount_invalid_formats() {
        let cases = vec![
            "",        // empty
            "abc",     // not a number
            "1.2.3",   // multiple dots
            "+1.23",   // explicit plus rejected
            "1e2",     // scientific notation rejected
            ".5",      // missing leading zero rejected (STRICT)
            "5.",      // missing fractional part rejected (STRICT)
            "-.5",     // strict rules apply behind the sign too
            "1, 000",  // separators are display-only
        ];
        for case in cases {
            assert!(
                parse_amount(case).is_err(),
                "Should reject invalid format: {:?}",
                case
            );
        }
    }

    #[test]
    fn qa_to_cents_rounding() {
        // Nearest cent, halves away from zero
        assert_eq!(to_cents(Decimal::from_str("12.345").unwrap()).unwrap(), 1235);
        assert_eq!(to_cents(Decimal::from_str("12.344").unwrap()).unwrap(), 1234);
        assert_eq!(to_cents(Decimal::from_str("0.005").unwrap()).unwrap(), 1);
        assert_eq!(to_cents(Decimal::from_str("99.99").unwrap()).unwrap(), 9999);
        assert_eq!(to_cents(Decimal::from(250)).unwrap(), 25000);
    }

    #[test]
    fn qa_to_cents_rejects_non_positive() {
        assert_eq!(to_cents(Decimal::ZERO), Err(MoneyError::InvalidAmount));
        assert_eq!(
            to_cents(Decimal::from_str("-1.50").unwrap()),
            Err(MoneyError::InvalidAmount)
        );
        // Rounds to zero cents
        assert_eq!(
            to_cents(Decimal::from_str("0.004").unwrap()),
            Err(MoneyError::InvalidAmount)
        );
    }

    #[test]
    fn qa_to_cents_overflow() {
        // i32 column limit: 2147483647 cents
        assert_eq!(
            to_cents(Decimal::from_str("21474836.47").unwrap()).unwrap(),
            i32::MAX as i64
        );
        assert_eq!(
            to_cents(Decimal::from_str("21474836.48").unwrap()),
            Err(MoneyError::Overflow)
        );
    }

    #[test]
    fn qa_roundtrip_consistency() {
        // For two-decimal inputs A > 0: from_cents(to_cents(A)) == A
        let values = vec!["0.01", "1.50", "666.66", "8945.00", "21474836.47"];
        for val_str in values {
            let amount = Decimal::from_str(val_str).unwrap();
            let cents = to_cents(amount).unwrap();
            assert_eq!(
                from_cents(cents),
                amount.round_dp(2),
                "Roundtrip failed for {}",
                val_str
            );
        }
    }

    #[test]
    fn qa_format_currency_grouping() {
        assert_eq!(format_currency(0), "$0.00");
        assert_eq!(format_currency(1), "$0.01");
        assert_eq!(format_currency(9999), "$99.99");
        assert_eq!(format_currency(123_456), "$1,234.56");
        assert_eq!(format_currency(100_000_000), "$1,000,000.00");
        assert_eq!(format_currency(-12_350), "-$123.50");
    }
}
