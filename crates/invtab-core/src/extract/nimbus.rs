//! Extraction rules for Nimbus Infotech invoices.
//!
//! Intra-state IT-services layout: header block and "Billed To" section on
//! the first page, SAC-coded line items with a provisional per-row tax
//! percentage, and a CGST/SGST summary block after the items carrying the
//! authoritative rates.

use rust_decimal::Decimal;
use tracing::debug;

use super::reconcile;
use super::rules::{self, patterns};
use super::{CompanyExtractor, Extraction, split_billed_to, table_region};
use crate::models::record::{Company, HeaderFields, LineRecord, NimbusRow};
use crate::text;

/// Extractor for the Nimbus Infotech layout.
pub struct NimbusExtractor;

impl NimbusExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_header(&self, first_page: &str) -> HeaderFields {
        let (vendor_block, buyer_block) = split_billed_to(first_page);

        let vendor_gstin = rules::first_match(first_page, &[
            // Labeled id in the letterhead block above "Billed To".
            &|_| rules::non_empty(rules::extract_labeled(vendor_block, &[])),
            // First unique id anywhere on the page.
            &|page| rules::scan_all(page).into_iter().next(),
        ]);

        let buyer_gstin = rules::first_match(first_page, &[
            // Labeled id inside the "Billed To" sub-section.
            &|_| rules::non_empty(rules::extract_labeled(buyer_block, &[])),
            // Second unique id on the page; the first is the vendor's.
            &|page| rules::scan_all(page).into_iter().nth(1),
        ]);

        let invoice_number = rules::first_match(first_page, &[
            &|page| {
                patterns::INVOICE_NUMBER
                    .captures(page)
                    .map(|caps| caps[1].to_string())
            },
            &|page| {
                patterns::NIMBUS_INVOICE_STANDALONE
                    .captures(page)
                    .map(|caps| caps[1].to_string())
            },
        ]);

        let invoice_date = patterns::INVOICE_DATE
            .captures(first_page)
            .map(|caps| rules::parse_date(&caps[1]))
            .unwrap_or_default();

        let buyer_name = patterns::BILLED_TO_NAME
            .captures(first_page)
            .map(|caps| text::normalize(&caps[1]))
            .unwrap_or_default();

        let place_of_supply = patterns::PLACE_OF_SUPPLY
            .captures(first_page)
            .map(|caps| text::normalize(&caps[1]))
            .unwrap_or_default();

        HeaderFields {
            vendor_name: Company::Nimbus.display_name().to_string(),
            vendor_gstin,
            buyer_name,
            buyer_gstin,
            invoice_number,
            invoice_date,
            place_of_supply,
            ..HeaderFields::default()
        }
    }

    fn extract_rows(&self, pages: &[String], header: &HeaderFields) -> Vec<NimbusRow> {
        let mut rows = Vec::new();

        for page in pages {
            let Some(body) =
                table_region(page, &patterns::NIMBUS_TABLE_START, &patterns::TABLE_END)
            else {
                continue;
            };

            // Fold wrapped descriptions before the row pattern runs.
            let body = text::flatten(body);

            for caps in patterns::NIMBUS_ROW.captures_iter(&body) {
                let pct = rules::parse_amount(&caps[7]);

                rows.push(NimbusRow {
                    invoice_number: header.invoice_number.clone(),
                    invoice_date: header.invoice_date.clone(),
                    vendor_gstin: header.vendor_gstin.clone(),
                    buyer_name: header.buyer_name.clone(),
                    buyer_gstin: header.buyer_gstin.clone(),
                    place_of_supply: header.place_of_supply.clone(),
                    description: caps[2].trim().to_string(),
                    sac_code: caps[3].to_string(),
                    quantity: rules::parse_amount(&caps[4]),
                    rate: rules::parse_amount(&caps[5]),
                    taxable_value: rules::parse_amount(&caps[6]),
                    cgst_pct: pct,
                    cgst_amount: rules::parse_amount(&caps[8]),
                    sgst_pct: pct,
                    sgst_amount: rules::parse_amount(&caps[9]),
                    // Intra-state layout: IGST is structurally absent.
                    igst_pct: Decimal::ZERO,
                    igst_amount: Decimal::ZERO,
                    total: rules::parse_amount(&caps[10]),
                });
            }
        }

        rows
    }
}

impl Default for NimbusExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyExtractor for NimbusExtractor {
    fn company(&self) -> Company {
        Company::Nimbus
    }

    fn extract(&self, pages: &[String]) -> Extraction {
        let pages: Vec<String> = pages.iter().map(|p| text::unescape_entities(p)).collect();
        let full_text = pages.join("\n");
        let first_page = pages.first().map(String::as_str).unwrap_or_default();

        let mut warnings = Vec::new();
        let header = self.extract_header(first_page);
        let provisional = self.extract_rows(&pages, &header);

        // Look-ahead correction: a summary block after the items overrides
        // the provisional per-row percentages.
        let rows = match reconcile::find_summary(&full_text, &mut warnings) {
            Some(summary) => reconcile::apply(provisional, &summary),
            None => provisional,
        };

        debug!(rows = rows.len(), "nimbus extraction complete");

        Extraction {
            header,
            rows: rows.into_iter().map(LineRecord::Nimbus).collect(),
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_page() -> String {
        "NIMBUS INFOTECH PVT. LTD.\n\
         GSTIN: 27AAPCN4821F1Z5\n\
         Tax Invoice\n\
         Invoice No: NIM/2024/042\n\
         Invoice Date: 15-Jan-24\n\
         Place of Supply: Maharashtra (27)\n\
         Billed To:\n\
         Vertex Retail Ltd\n\
         GSTIN: 27AABCV9310Q1Z3\n\
         S.No Description SAC Code Qty Rate Taxable Value Tax % CGST SGST Total\n\
         1 Annual support retainer 998313 1 1,000.00 1,000.00 9% 90.00 90.00 1,180.00\n\
         Grand Total 1,180.00\n\
         CGST @ 9% : 90.00 SGST @ 9% : 90.00\n"
            .to_string()
    }

    #[test]
    fn test_extract_header_fields() {
        let extraction = NimbusExtractor::new().extract(&[sample_page()]);
        let header = extraction.header;

        assert_eq!(header.vendor_name, "Nimbus Infotech Pvt. Ltd.");
        assert_eq!(header.vendor_gstin, "27AAPCN4821F1Z5");
        assert_eq!(header.buyer_name, "Vertex Retail Ltd");
        assert_eq!(header.buyer_gstin, "27AABCV9310Q1Z3");
        assert_eq!(header.invoice_number, "NIM/2024/042");
        assert_eq!(header.invoice_date.display(), "2024-01-15");
        assert_eq!(header.place_of_supply, "Maharashtra");
    }

    #[test]
    fn test_extract_single_row_with_taxes() {
        let extraction = NimbusExtractor::new().extract(&[sample_page()]);
        assert_eq!(extraction.rows.len(), 1);

        let LineRecord::Nimbus(row) = &extraction.rows[0] else {
            panic!("expected a nimbus record");
        };
        assert_eq!(row.description, "Annual support retainer");
        assert_eq!(row.sac_code, "998313");
        assert_eq!(row.taxable_value, dec("1000.00"));
        assert_eq!(row.cgst_amount, dec("90.00"));
        assert_eq!(row.sgst_amount, dec("90.00"));
        assert_eq!(row.total, dec("1180.00"));
        assert_eq!(row.igst_amount, Decimal::ZERO);
    }

    #[test]
    fn test_summary_overrides_provisional_rate() {
        // Per-row percentage says 9%, the summary block says 6%.
        let page = sample_page().replace(
            "CGST @ 9% : 90.00 SGST @ 9% : 90.00",
            "CGST @ 6% : 60.00 SGST @ 6% : 60.00",
        );

        let extraction = NimbusExtractor::new().extract(&[page]);
        let LineRecord::Nimbus(row) = &extraction.rows[0] else {
            panic!("expected a nimbus record");
        };
        assert_eq!(row.cgst_pct, dec("6"));
        assert_eq!(row.cgst_amount, dec("60.00"));
        assert_eq!(row.sgst_amount, dec("60.00"));
        assert_eq!(row.total, dec("1120.00"));
    }

    #[test]
    fn test_missing_fields_yield_empty_values() {
        let extraction =
            NimbusExtractor::new().extract(&["Nimbus Infotech\nno structure at all".to_string()]);

        assert_eq!(extraction.header.vendor_gstin, "");
        assert_eq!(extraction.header.buyer_name, "");
        assert!(extraction.header.invoice_date.is_empty());
        assert!(extraction.rows.is_empty());
    }

    #[test]
    fn test_buyer_gstin_falls_back_to_second_scan() {
        // No labeled id in the billed-to block; two bare ids on the page.
        let page = "Nimbus Infotech Pvt. Ltd. 27AAPCN4821F1Z5\n\
                    Billed To: Vertex Retail Ltd\n\
                    Regn 27AABCV9310Q1Z3 follows unlabeled\n"
            .to_string();

        let extraction = NimbusExtractor::new().extract(&[page]);
        assert_eq!(extraction.header.buyer_gstin, "27AABCV9310Q1Z3");
    }
}
