//! Common regex patterns for GST invoice extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // GSTIN: 2 digits, 5 uppercase letters, 4 digits, 1 uppercase letter,
    // 1 alphanumeric, 1 uppercase letter, 1 alphanumeric.
    pub static ref GSTIN_SHAPE: Regex = Regex::new(
        r"^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z][A-Z][0-9A-Z]$"
    ).unwrap();

    pub static ref GSTIN_SCAN: Regex = Regex::new(
        r"\b[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z][0-9A-Z][A-Z][0-9A-Z]\b"
    ).unwrap();

    // Labeled header fields
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"(?im)invoice\s*(?:no\.?|number|#)\s*:?\s*([A-Za-z0-9/\-]+)"
    ).unwrap();

    pub static ref INVOICE_DATE: Regex = Regex::new(
        r"(?im)(?:invoice\s+date|date\s+of\s+invoice|dated?)\s*:?\s*([0-9]{1,4}[-/][A-Za-z0-9]{1,3}[-/][0-9]{2,4})"
    ).unwrap();

    pub static ref PLACE_OF_SUPPLY: Regex = Regex::new(
        r"(?im)place\s+of\s+supply\s*:?\s*([A-Za-z][A-Za-z ]*?)\s*(?:\(\d{2}\))?\s*$"
    ).unwrap();

    pub static ref BILLED_TO: Regex = Regex::new(
        r"(?i)bill(?:ed)?\s+to\s*:?"
    ).unwrap();

    // Buyer name: first non-empty text after the "Billed To" marker, same
    // line or next.
    pub static ref BILLED_TO_NAME: Regex = Regex::new(
        r"(?i)bill(?:ed)?\s+to\s*:?\s*(\S[^\n]*)"
    ).unwrap();

    // Vendor-specific invoice number series, used as standalone fallbacks
    // when the labeled pattern misses.
    pub static ref NIMBUS_INVOICE_STANDALONE: Regex = Regex::new(
        r"\b(NIM/\d{4}/\d{1,5})\b"
    ).unwrap();

    pub static ref MERIDIAN_INVOICE_STANDALONE: Regex = Regex::new(
        r"\b(MIS-\d{2,4}-\d{1,5})\b"
    ).unwrap();

    pub static ref STELLAR_INVOICE_STANDALONE: Regex = Regex::new(
        r"\b(SFS/\d{2,4}/\d{1,5})\b"
    ).unwrap();

    // Line-item table anchors
    pub static ref NIMBUS_TABLE_START: Regex = Regex::new(
        r"(?im)^\s*s\.?\s*no\.?\b.*\bdescription\b"
    ).unwrap();

    pub static ref MERIDIAN_TABLE_START: Regex = Regex::new(
        r"(?im)^\s*sl\.?\s*(?:no\.?)?\b.*\b(?:description|particulars)\b"
    ).unwrap();

    pub static ref STELLAR_TABLE_START: Regex = Regex::new(
        r"(?im)^\s*sr\.?\s*no\.?\b.*\b(?:description|particulars)\b"
    ).unwrap();

    pub static ref TABLE_END: Regex = Regex::new(
        r"(?im)^\s*(?:grand\s+total|total\s+invoice\s+value|sub\s*-?\s*total)\b"
    ).unwrap();

    // Table rows, applied to the whitespace-flattened table body.
    //
    // Nimbus: serial, description, SAC, qty, rate, taxable value,
    // tax %, CGST amount, SGST amount, total.
    pub static ref NIMBUS_ROW: Regex = Regex::new(
        r"(\d{1,3})\s+(.+?)\s+(\d{6})\s+(\d+(?:\.\d+)?)\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})\s+(\d{1,2}(?:\.\d+)?)\s*%?\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})"
    ).unwrap();

    // Meridian: serial, description, HSN, qty, unit rate, taxable value,
    // IGST %, IGST amount, total.
    pub static ref MERIDIAN_ROW: Regex = Regex::new(
        r"(\d{1,3})\s+(.+?)\s+(\d{4,8})\s+(\d+(?:\.\d+)?)\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})\s+(\d{1,2}(?:\.\d+)?)\s*%\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})"
    ).unwrap();

    // Stellar: serial, description, SAC, qty, rate, taxable value.
    // Tax columns are absent from this layout.
    pub static ref STELLAR_ROW: Regex = Regex::new(
        r"(\d{1,3})\s+(.+?)\s+(\d{6})\s+(\d+(?:\.\d+)?)\s+([\d,]+\.\d{2})\s+([\d,]+\.\d{2})"
    ).unwrap();

    // Tax summary block: two (rate, amount) pairs for CGST and SGST.
    pub static ref CGST_SGST_SUMMARY: Regex = Regex::new(
        r"(?i)CGST\s*@?\s*(\d{1,2}(?:\.\d+)?)\s*%\s*:?\s*([\d,]+\.\d{2})\s*,?\s*SGST\s*@?\s*(\d{1,2}(?:\.\d+)?)\s*%\s*:?\s*([\d,]+\.\d{2})"
    ).unwrap();

    // Stellar annexure fields. The colon is mandatory so prose mentions of
    // "site" or "services" elsewhere on the page cannot match.
    pub static ref SITE_NAME: Regex = Regex::new(
        r"(?im)\bsite(?:\s+name)?\s*:\s*(\S[^\n]*)"
    ).unwrap();

    pub static ref SERVICE_TYPE: Regex = Regex::new(
        r"(?im)\bservice\s+(?:type|category)\s*:\s*(\S[^\n]*)"
    ).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gstin_scan_matches_embedded_id() {
        let text = "Vendor GSTIN: 27AAPCN4821F1Z5 issued at Mumbai";
        let m = GSTIN_SCAN.find(text).unwrap();
        assert_eq!(m.as_str(), "27AAPCN4821F1Z5");
    }

    #[test]
    fn test_invoice_number_label_variants() {
        for text in ["Invoice No: NIM/2024/042", "INVOICE NUMBER NIM/2024/042", "Invoice # NIM/2024/042"] {
            let caps = INVOICE_NUMBER.captures(text).unwrap();
            assert_eq!(&caps[1], "NIM/2024/042");
        }
    }

    #[test]
    fn test_place_of_supply_strips_state_code() {
        let caps = PLACE_OF_SUPPLY.captures("Place of Supply: Maharashtra (27)").unwrap();
        assert_eq!(&caps[1], "Maharashtra");
    }

    #[test]
    fn test_cgst_sgst_summary_capture() {
        let text = "CGST @ 9% : 90.00  SGST @ 9% : 90.00";
        let caps = CGST_SGST_SUMMARY.captures(text).unwrap();
        assert_eq!(&caps[1], "9");
        assert_eq!(&caps[2], "90.00");
        assert_eq!(&caps[3], "9");
        assert_eq!(&caps[4], "90.00");
    }
}
