//! Reusable extraction primitives shared by the per-company extractors.

pub mod amounts;
pub mod dates;
pub mod gstin;
pub mod patterns;

pub use amounts::parse_amount;
pub use dates::parse_date;
pub use gstin::{extract_labeled, is_valid_gstin, scan_all};

/// A single fallback rule: a pure function from text to an optional value.
pub type FieldRule<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Evaluate an ordered fallback chain.
///
/// Rules are tried in order; the first that yields a value wins. A chain
/// with no successful rule resolves to the empty string, so a missed field
/// never blocks extraction of the others.
pub fn first_match(text: &str, rules: &[FieldRule<'_>]) -> String {
    rules.iter().find_map(|rule| rule(text)).unwrap_or_default()
}

/// Lift an empty-on-failure extractor result into the `Option` a
/// [`FieldRule`] returns.
pub fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_match_respects_order() {
        let specific = |_: &str| Some("specific".to_string());
        let fallback = |_: &str| Some("fallback".to_string());
        assert_eq!(first_match("", &[&specific, &fallback]), "specific");
    }

    #[test]
    fn test_first_match_falls_through() {
        let miss = |_: &str| -> Option<String> { None };
        let hit = |t: &str| t.contains("x").then(|| "hit".to_string());
        assert_eq!(first_match("has x", &[&miss, &hit]), "hit");
    }

    #[test]
    fn test_first_match_empty_on_total_failure() {
        let miss = |_: &str| -> Option<String> { None };
        assert_eq!(first_match("anything", &[&miss, &miss]), "");
    }
}
