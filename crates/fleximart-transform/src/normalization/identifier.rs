//! Identifier and phone normalization.
//!
//! Both work on the digit sequence of the raw text, so `"C007"`,
//! `"Cust-007"` and `"007"` all normalize to the same integer `7`.

fn digits(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Normalize a raw identifier to a positive integer.
///
/// Every non-digit character is stripped. Returns `None` (unrepresentable)
/// when no digits remain, when the digits overflow `i64`, or when they are
/// all zeros. The same function is used for customer, product and
/// transaction identifiers so cross-table references agree.
pub fn normalize_identifier(raw: &str) -> Option<i64> {
    let digits = digits(raw);
    if digits.is_empty() {
        return None;
    }
    match digits.parse::<i64>() {
        Ok(value) if value > 0 => Some(value),
        _ => None,
    }
}

/// Normalize a phone number to `+CC-NNNN...`.
///
/// Ten digits are treated as a domestic number with country code 91. More
/// than ten digits use the first two as the country code. Anything shorter
/// yields `None`.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let digits = digits(raw);
    match digits.len() {
        10 => Some(format!("+91-{digits}")),
        len if len > 10 => Some(format!("+{}-{}", &digits[..2], &digits[2..])),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefixes_and_separators() {
        assert_eq!(normalize_identifier("C001"), Some(1));
        assert_eq!(normalize_identifier("P-100"), Some(100));
        assert_eq!(normalize_identifier(" 42 "), Some(42));
        assert_eq!(normalize_identifier("T1"), Some(1));
    }

    #[test]
    fn digitless_and_zero_ids_are_unrepresentable() {
        assert_eq!(normalize_identifier(""), None);
        assert_eq!(normalize_identifier("CUST"), None);
        assert_eq!(normalize_identifier("C000"), None);
        assert_eq!(normalize_identifier("99999999999999999999999"), None);
    }

    #[test]
    fn phone_formats() {
        assert_eq!(
            normalize_phone("98765 43210"),
            Some("+91-9876543210".to_string())
        );
        assert_eq!(
            normalize_phone("1198765432109"),
            Some("+11-98765432109".to_string())
        );
        assert_eq!(
            normalize_phone("+91 98765-43210"),
            Some("+91-9876543210".to_string())
        );
        assert_eq!(normalize_phone("12345"), None);
        assert_eq!(normalize_phone("n/a"), None);
    }
}
