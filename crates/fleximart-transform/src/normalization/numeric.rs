//! Numeric normalization utilities.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Parses a string as an exact decimal, returning None for invalid or empty strings.
///
/// Accepts plain (`19.99`) and scientific (`1.5e2`) notation.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Parses a decimal that must be zero or greater.
pub fn parse_non_negative_decimal(value: &str) -> Option<Decimal> {
    parse_decimal(value).filter(|v| !v.is_sign_negative() || v.is_zero())
}

/// Parses a decimal that must be strictly greater than zero.
pub fn parse_positive_decimal(value: &str) -> Option<Decimal> {
    parse_decimal(value).filter(|v| *v > Decimal::ZERO)
}

/// Coerce a stock count to a non-negative integer.
///
/// Missing, unparseable and negative values become 0; fractional values are
/// truncated toward zero.
pub fn coerce_stock_quantity(value: Option<&str>) -> i64 {
    value
        .and_then(parse_decimal)
        .and_then(|v| v.trunc().to_i64())
        .map_or(0, |v| v.max(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_scientific() {
        assert_eq!(parse_decimal("19.99"), Some(Decimal::new(1999, 2)));
        assert_eq!(parse_decimal(" 5 "), Some(Decimal::from(5)));
        assert_eq!(parse_decimal("1.5e2"), Some(Decimal::from(150)));
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal(""), None);
    }

    #[test]
    fn sign_filters() {
        assert_eq!(parse_non_negative_decimal("0"), Some(Decimal::ZERO));
        assert_eq!(parse_non_negative_decimal("-1"), None);
        assert_eq!(parse_positive_decimal("0"), None);
        assert_eq!(parse_positive_decimal("-3.5"), None);
        assert_eq!(parse_positive_decimal("0.01"), Some(Decimal::new(1, 2)));
    }

    #[test]
    fn stock_quantity_coercion() {
        assert_eq!(coerce_stock_quantity(Some("12")), 12);
        assert_eq!(coerce_stock_quantity(Some("7.9")), 7);
        assert_eq!(coerce_stock_quantity(Some("-4")), 0);
        assert_eq!(coerce_stock_quantity(Some("lots")), 0);
        assert_eq!(coerce_stock_quantity(None), 0);
    }
}
