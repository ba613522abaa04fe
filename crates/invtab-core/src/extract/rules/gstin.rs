//! GSTIN (GST registration number) extraction and structural validation.

use regex::Regex;

use super::patterns::{GSTIN_SCAN, GSTIN_SHAPE};

/// Known label spellings, tried in order. Longer variants come first so a
/// more specific label is not shadowed by its prefix.
pub const DEFAULT_LABELS: [&str; 5] = [
    "GSTIN Number",
    "GSTIN No",
    "GSTIN",
    "GST Reg No",
    "GST No",
];

/// Structural check for the fixed 15-character GSTIN shape.
///
/// Anything differing in length or character class at any position is
/// rejected, even when it follows a matching label.
pub fn is_valid_gstin(candidate: &str) -> bool {
    GSTIN_SHAPE.is_match(candidate)
}

/// Extract the first structurally valid GSTIN following one of the given
/// labels (case-insensitive, optionally separated by a colon).
///
/// Labels are tried in order; an empty slice falls back to
/// [`DEFAULT_LABELS`]. Returns the empty string on total failure.
pub fn extract_labeled(text: &str, labels: &[&str]) -> String {
    let labels = if labels.is_empty() {
        &DEFAULT_LABELS[..]
    } else {
        labels
    };

    for label in labels {
        let pattern = format!(r"(?i:{})\s*:?\s*([0-9A-Z]{{15}})", regex::escape(label));
        let re = Regex::new(&pattern).unwrap();

        for caps in re.captures_iter(text) {
            let candidate = &caps[1];
            if is_valid_gstin(candidate) {
                return candidate.to_string();
            }
        }
    }

    String::new()
}

/// All structurally valid GSTINs anywhere in the text, deduplicated, in
/// first-occurrence order.
///
/// Used as the fallback source when label-based extraction fails: by
/// convention the first unique id on a page is the vendor's, the second the
/// buyer's.
pub fn scan_all(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for m in GSTIN_SCAN.find_iter(text) {
        let id = m.as_str();
        if is_valid_gstin(id) && !found.iter().any(|f| f == id) {
            found.push(id.to_string());
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const VENDOR: &str = "27AAPCN4821F1Z5";
    const BUYER: &str = "29AABCD1234E1Z8";

    #[test]
    fn test_valid_gstin_shape() {
        assert!(is_valid_gstin(VENDOR));
        assert!(is_valid_gstin(BUYER));
    }

    #[test]
    fn test_invalid_gstin_shapes() {
        assert!(!is_valid_gstin("27AAPCN4821F1Z")); // 14 chars
        assert!(!is_valid_gstin("27AAPCN4821F1Z55")); // 16 chars
        assert!(!is_valid_gstin("A7AAPCN4821F1Z5")); // letter in state code
        assert!(!is_valid_gstin("27AAPC14821F1Z5")); // digit in PAN letters
        assert!(!is_valid_gstin("27aapcn4821f1z5")); // lowercase
    }

    #[test]
    fn test_extract_labeled_default_labels() {
        let text = format!("Vendor details\nGSTIN: {VENDOR}\nMumbai");
        assert_eq!(extract_labeled(&text, &[]), VENDOR);
    }

    #[test]
    fn test_extract_labeled_custom_label_order() {
        let text = format!("GST No {BUYER} but Party GSTIN {VENDOR}");
        assert_eq!(extract_labeled(&text, &["Party GSTIN", "GST No"]), VENDOR);
    }

    #[test]
    fn test_extract_labeled_rejects_malformed_after_label() {
        // Label present but the token after it fails the shape.
        let text = "GSTIN: 27AAPCN4821F1ZZZ";
        assert_eq!(extract_labeled(text, &[]), "");
    }

    #[test]
    fn test_extract_labeled_empty_on_failure() {
        assert_eq!(extract_labeled("no ids here", &[]), "");
    }

    #[test]
    fn test_scan_all_dedup_and_order() {
        let text = format!("{VENDOR} then {BUYER} then {VENDOR} again");
        assert_eq!(scan_all(&text), vec![VENDOR.to_string(), BUYER.to_string()]);
    }

    #[test]
    fn test_scan_all_ignores_malformed() {
        // All-digit token of the right length and a truncated id.
        assert!(scan_all("ref 123456789012345 and 27AAPCN4821F1Z").is_empty());
    }
}
