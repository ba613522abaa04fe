//! Extraction rules for Stellar Facility invoices.
//!
//! Intra-state facility-services layout. Line items carry no tax columns:
//! a provisional CGST/SGST rate is assumed per row and a summary block on a
//! later page supplies the authoritative rates. An annexure page carries a
//! site/service summary table whose values attach to every row; a keyword
//! classifier over the row's own description can override the annexure
//! service type with a more specific category.

use rust_decimal::Decimal;
use tracing::debug;

use super::reconcile;
use super::rules::{self, patterns};
use super::{CompanyExtractor, Extraction, split_billed_to, table_region};
use crate::models::record::{Company, HeaderFields, LineRecord, StellarRow};
use crate::text;

/// Service categories recognized in row descriptions, tried in order.
const SERVICE_CATEGORIES: [&str; 5] = [
    "Security",
    "Housekeeping",
    "Pantry",
    "Maintenance",
    "Gardening",
];

/// Extractor for the Stellar Facility layout.
pub struct StellarExtractor {
    provisional_cgst: Decimal,
    provisional_sgst: Decimal,
}

impl StellarExtractor {
    pub fn new() -> Self {
        Self {
            provisional_cgst: Decimal::new(9, 0),
            provisional_sgst: Decimal::new(9, 0),
        }
    }

    /// Override the provisional rates assumed before reconciliation.
    pub fn with_provisional_rates(mut self, cgst: Decimal, sgst: Decimal) -> Self {
        self.provisional_cgst = cgst;
        self.provisional_sgst = sgst;
        self
    }

    fn extract_header(&self, first_page: &str, pages: &[String]) -> HeaderFields {
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
                patterns::STELLAR_INVOICE_STANDALONE
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

        // Annexure summary table: site and service classifiers live on a
        // non-item page, typically the last.
        let (site_name, service_type) = self.extract_annexure(pages);

        HeaderFields {
            vendor_name: Company::Stellar.display_name().to_string(),
            vendor_gstin,
            buyer_name,
            buyer_gstin,
            invoice_number,
            invoice_date,
            site_name,
            service_type,
            ..HeaderFields::default()
        }
    }

    fn extract_annexure(&self, pages: &[String]) -> (String, String) {
        let mut site_name = String::new();
        let mut service_type = String::new();

        for page in pages {
            if site_name.is_empty() {
                if let Some(caps) = patterns::SITE_NAME.captures(page) {
                    site_name = text::normalize(&caps[1]);
                }
            }
            if service_type.is_empty() {
                if let Some(caps) = patterns::SERVICE_TYPE.captures(page) {
                    service_type = text::normalize(&caps[1]);
                }
            }
        }

        (site_name, service_type)
    }

    fn extract_rows(&self, pages: &[String], header: &HeaderFields) -> Vec<StellarRow> {
        let hundred = Decimal::new(100, 0);
        let mut rows = Vec::new();

        for page in pages {
            let Some(body) =
                table_region(page, &patterns::STELLAR_TABLE_START, &patterns::TABLE_END)
            else {
                continue;
            };

            let body = text::flatten(body);

            for caps in patterns::STELLAR_ROW.captures_iter(&body) {
                let description = caps[2].trim().to_string();
                let taxable_value = rules::parse_amount(&caps[6]);

                // Provisional taxes; the reconciliation pass may rewrite.
                let cgst = (taxable_value * self.provisional_cgst / hundred).round_dp(2);
                let sgst = (taxable_value * self.provisional_sgst / hundred).round_dp(2);

                let service_type = classify_service(&description)
                    .map(str::to_string)
                    .unwrap_or_else(|| header.service_type.clone());

                rows.push(StellarRow {
                    invoice_number: header.invoice_number.clone(),
                    invoice_date: header.invoice_date.clone(),
                    site_name: header.site_name.clone(),
                    service_type,
                    vendor_gstin: header.vendor_gstin.clone(),
                    buyer_name: header.buyer_name.clone(),
                    buyer_gstin: header.buyer_gstin.clone(),
                    description,
                    sac_code: caps[3].to_string(),
                    quantity: rules::parse_amount(&caps[4]),
                    rate: rules::parse_amount(&caps[5]),
                    taxable_value,
                    cgst_pct: self.provisional_cgst,
                    cgst_amount: cgst,
                    sgst_pct: self.provisional_sgst,
                    sgst_amount: sgst,
                    total: taxable_value + cgst + sgst,
                });
            }
        }

        rows
    }
}

impl Default for StellarExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Match a row description against the fixed ordered category list.
///
/// The first category whose phrase occurs in the description wins; rows
/// with no category keep the annexure-derived service type.
fn classify_service(description: &str) -> Option<&'static str> {
    let lower = description.to_lowercase();
    SERVICE_CATEGORIES
        .iter()
        .find(|category| lower.contains(&category.to_lowercase()))
        .copied()
}

impl CompanyExtractor for StellarExtractor {
    fn company(&self) -> Company {
        Company::Stellar
    }

    fn extract(&self, pages: &[String]) -> Extraction {
        let pages: Vec<String> = pages.iter().map(|p| text::unescape_entities(p)).collect();
        let full_text = pages.join("\n");
        let first_page = pages.first().map(String::as_str).unwrap_or_default();

        let mut warnings = Vec::new();
        let header = self.extract_header(first_page, &pages);
        let provisional = self.extract_rows(&pages, &header);

        // Look-ahead correction: the summary block on a later page carries
        // the authoritative rates for every row of this document.
        let rows = match reconcile::find_summary(&full_text, &mut warnings) {
            Some(summary) => reconcile::apply(provisional, &summary),
            None => provisional,
        };

        debug!(rows = rows.len(), "stellar extraction complete");

        Extraction {
            header,
            rows: rows.into_iter().map(LineRecord::Stellar).collect(),
            warnings,
        }
    }
}
