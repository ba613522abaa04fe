//! Monetary value parsing for comma-grouped invoice figures.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an amount with optional comma grouping (Indian "1,23,456.78" or
/// Western "123,456.78") into a [`Decimal`].
///
/// Extraction is best-effort: malformed input resolves to zero rather than
/// aborting the pipeline for one bad number.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount_indian_grouping() {
        assert_eq!(parse_amount("1,23,456.78"), Decimal::from_str("123456.78").unwrap());
    }

    #[test]
    fn test_parse_amount_western_grouping() {
        assert_eq!(parse_amount("12,345.50"), Decimal::from_str("12345.50").unwrap());
    }

    #[test]
    fn test_parse_amount_idempotent_on_clean_input() {
        let parsed = parse_amount("12345.50");
        assert_eq!(parse_amount(&parsed.to_string()), parsed);
    }

    #[test]
    fn test_parse_amount_currency_prefix() {
        assert_eq!(parse_amount("\u{20b9} 1,000.00"), Decimal::from_str("1000.00").unwrap());
    }

    #[test]
    fn test_parse_amount_malformed_is_zero() {
        assert_eq!(parse_amount("abc"), Decimal::ZERO);
        assert_eq!(parse_amount(""), Decimal::ZERO);
    }
}
