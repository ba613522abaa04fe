//! Multi-format date parsing for invoice header fields.

use chrono::NaiveDate;

use crate::models::record::DateValue;

/// Date formats attempted in order. First successful parse wins.
pub const DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d", // 2024-01-15
    "%d-%b-%Y", // 15-Jan-2024
    "%d-%b-%y", // 15-Jan-24
    "%d/%m/%Y", // 15/01/2024
    "%d-%m-%Y", // 15-01-2024
];

/// Parse a date using the known format list.
///
/// When every format fails the trimmed original string is kept as
/// [`DateValue::Raw`]; callers must treat the invoice date as "date or
/// unparsed literal", never assume success.
pub fn parse_date(s: &str) -> DateValue {
    let trimmed = s.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return DateValue::Parsed(date);
        }
    }

    DateValue::Raw(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn jan_15() -> DateValue {
        DateValue::Parsed(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
    }

    #[test]
    fn test_parse_date_equivalent_formats() {
        assert_eq!(parse_date("2024-01-15"), jan_15());
        assert_eq!(parse_date("15-Jan-24"), jan_15());
        assert_eq!(parse_date("15-Jan-2024"), jan_15());
        assert_eq!(parse_date("15/01/2024"), jan_15());
        assert_eq!(parse_date("15-01-2024"), jan_15());
    }

    #[test]
    fn test_parse_date_trims_input() {
        assert_eq!(parse_date("  2024-01-15  "), jan_15());
    }

    #[test]
    fn test_parse_date_failure_keeps_literal() {
        assert_eq!(
            parse_date(" end of March "),
            DateValue::Raw("end of March".to_string())
        );
    }
}
