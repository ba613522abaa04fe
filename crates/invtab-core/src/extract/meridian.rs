//! Extraction rules for Meridian Industrial invoices.
//!
//! Inter-state goods layout: HSN-coded line items with the IGST rate and
//! amount stated per row, so no reconciliation pass is needed.

use tracing::debug;

use super::rules::{self, patterns};
use super::{CompanyExtractor, Extraction, split_billed_to, table_region};
use crate::models::record::{Company, HeaderFields, LineRecord, MeridianRow};
use crate::text;

/// Extractor for the Meridian Industrial layout.
pub struct MeridianExtractor;

impl MeridianExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_header(&self, first_page: &str) -> HeaderFields {
        let (vendor_block, buyer_block) = split_billed_to(first_page);

        let vendor_gstin = rules::first_match(first_page, &[
            &|_| rules::non_empty(rules::extract_labeled(vendor_block, &[])),
            &|page| rules::scan_all(page).into_iter().next(),
        ]);

        let buyer_gstin = rules::first_match(first_page, &[
            &|_| rules::non_empty(rules::extract_labeled(buyer_block, &[])),
            &|page| rules::scan_all(page).into_iter().nth(1),
        ]);

        let invoice_number = rules::first_match(first_page, &[
            &|page| {
                patterns::INVOICE_NUMBER
                    .captures(page)
                    .map(|caps| caps[1].to_string())
            },
            &|page| {
                patterns::MERIDIAN_INVOICE_STANDALONE
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
            vendor_name: Company::Meridian.display_name().to_string(),
            vendor_gstin,
            buyer_name,
            buyer_gstin,
            invoice_number,
            invoice_date,
            place_of_supply,
            ..HeaderFields::default()
        }
    }

    fn extract_rows(&self, pages: &[String], header: &HeaderFields) -> Vec<MeridianRow> {
        let mut rows = Vec::new();

        for page in pages {
            let Some(body) =
                table_region(page, &patterns::MERIDIAN_TABLE_START, &patterns::TABLE_END)
            else {
                continue;
            };

            let body = text::flatten(body);

            for caps in patterns::MERIDIAN_ROW.captures_iter(&body) {
                rows.push(MeridianRow {
                    invoice_number: header.invoice_number.clone(),
                    invoice_date: header.invoice_date.clone(),
                    vendor_gstin: header.vendor_gstin.clone(),
                    buyer_name: header.buyer_name.clone(),
                    buyer_gstin: header.buyer_gstin.clone(),
                    description: caps[2].trim().to_string(),
                    hsn_code: caps[3].to_string(),
                    quantity: rules::parse_amount(&caps[4]),
                    unit_rate: rules::parse_amount(&caps[5]),
                    taxable_value: rules::parse_amount(&caps[6]),
                    igst_pct: rules::parse_amount(&caps[7]),
                    igst_amount: rules::parse_amount(&caps[8]),
                    total_amount: rules::parse_amount(&caps[9]),
                });
            }
        }

        rows
    }
}

impl Default for MeridianExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyExtractor for MeridianExtractor {
    fn company(&self) -> Company {
        Company::Meridian
    }

    fn extract(&self, pages: &[String]) -> Extraction {
        let pages: Vec<String> = pages.iter().map(|p| text::unescape_entities(p)).collect();
        let first_page = pages.first().map(String::as_str).unwrap_or_default();

        let header = self.extract_header(first_page);
        let rows = self.extract_rows(&pages, &header);

        debug!(rows = rows.len(), "meridian extraction complete");

        Extraction {
            header,
            rows: rows.into_iter().map(LineRecord::Meridian).collect(),
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_page() -> String {
        "MERIDIAN INDUSTRIAL SUPPLIES\n\
         GST No: 24AAHCM8765L1Z2\n\
         TAX INVOICE\n\
         Invoice No: MIS-24-0107\n\
         Dated: 04/02/2024\n\
         Bill To: Apex Fabricators Pvt Ltd\n\
         GSTIN: 27AABCA5544R1Z9\n\
         Sl. Particulars HSN Qty Rate Taxable Value IGST Amount Total\n\
         1 MS angle 50x50x6 72161000 120 58.00 6,960.00 18 % 1,252.80 8,212.80\n\
         2 GI sheet 0.8mm 72104900 40 610.00 24,400.00 18 % 4,392.00 28,792.00\n\
         Grand Total 37,004.80\n"
            .to_string()
    }

    #[test]
    fn test_extract_header_fields() {
        let extraction = MeridianExtractor::new().extract(&[sample_page()]);
        let header = extraction.header;

        assert_eq!(header.vendor_name, "Meridian Industrial Supplies");
        assert_eq!(header.vendor_gstin, "24AAHCM8765L1Z2");
        assert_eq!(header.buyer_name, "Apex Fabricators Pvt Ltd");
        assert_eq!(header.buyer_gstin, "27AABCA5544R1Z9");
        assert_eq!(header.invoice_number, "MIS-24-0107");
        assert_eq!(header.invoice_date.display(), "2024-02-04");
    }

    #[test]
    fn test_extract_rows_with_per_row_igst() {
        let extraction = MeridianExtractor::new().extract(&[sample_page()]);
        assert_eq!(extraction.rows.len(), 2);

        let LineRecord::Meridian(row) = &extraction.rows[0] else {
            panic!("expected a meridian record");
        };
        assert_eq!(row.description, "MS angle 50x50x6");
        assert_eq!(row.hsn_code, "72161000");
        assert_eq!(row.quantity, dec("120"));
        assert_eq!(row.igst_pct, dec("18"));
        assert_eq!(row.igst_amount, dec("1252.80"));
        assert_eq!(row.total_amount, dec("8212.80"));
    }

    #[test]
    fn test_rows_preserve_discovery_order() {
        let extraction = MeridianExtractor::new().extract(&[sample_page()]);

        let descriptions: Vec<&str> = extraction
            .rows
            .iter()
            .map(|r| match r {
                LineRecord::Meridian(row) => row.description.as_str(),
                _ => panic!("expected meridian records"),
            })
            .collect();

        assert_eq!(descriptions, vec!["MS angle 50x50x6", "GI sheet 0.8mm"]);
    }

    #[test]
    fn test_no_table_yields_no_rows() {
        let extraction = MeridianExtractor::new()
            .extract(&["Meridian Industrial Supplies\nstatement of account".to_string()]);
        assert!(extraction.rows.is_empty());
    }
}
