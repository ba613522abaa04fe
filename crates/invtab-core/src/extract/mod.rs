//! Per-company invoice extraction.
//!
//! The three extractors share one calling convention (pages in, header
//! bundle plus line records out) but carry distinct rule sets. The
//! commonality is the [`CompanyExtractor`] trait, not shared behavior.

pub mod classifier;
mod meridian;
mod nimbus;
pub mod reconcile;
pub mod rules;
mod stellar;

pub use meridian::MeridianExtractor;
pub use nimbus::NimbusExtractor;
pub use stellar::StellarExtractor;

use regex::Regex;

use crate::models::config::ExtractionConfig;
use crate::models::record::{Company, HeaderFields, LineRecord};

/// Header bundle plus line records produced from one document.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Per-document header field bundle.
    pub header: HeaderFields,
    /// Line-item records in discovery order.
    pub rows: Vec<LineRecord>,
    /// Non-fatal diagnostics accumulated during extraction.
    pub warnings: Vec<String>,
}

/// One per-company extractor: a pure function from page texts to an
/// [`Extraction`]. Failure-tolerant throughout: a missed pattern yields an
/// empty or defaulted value, never an error.
pub trait CompanyExtractor {
    /// The company whose layout this extractor understands.
    fn company(&self) -> Company;

    /// Extract header fields and line records from the ordered page texts.
    fn extract(&self, pages: &[String]) -> Extraction;
}

/// Select the extractor for a classified company.
pub fn extractor_for(
    company: Company,
    config: &ExtractionConfig,
) -> Box<dyn CompanyExtractor> {
    match company {
        Company::Nimbus => Box::new(NimbusExtractor::new()),
        Company::Meridian => Box::new(MeridianExtractor::new()),
        Company::Stellar => Box::new(
            StellarExtractor::new().with_provisional_rates(
                config.provisional_cgst_rate,
                config.provisional_sgst_rate,
            ),
        ),
    }
}

/// Split a page at the "Billed To" marker: vendor block before it, buyer
/// block after it. Pages without the marker are all vendor block.
pub(crate) fn split_billed_to(page: &str) -> (&str, &str) {
    match rules::patterns::BILLED_TO.find(page) {
        Some(marker) => (&page[..marker.start()], &page[marker.end()..]),
        None => (page, ""),
    }
}

/// Locate the line-item table body on a page: the text strictly between the
/// column-header line and the terminating marker, or to end of page when no
/// terminator follows the header.
pub(crate) fn table_region<'a>(page: &'a str, start: &Regex, end: &Regex) -> Option<&'a str> {
    let header = start.find(page)?;

    // Skip the remainder of the column-header line.
    let after = &page[header.end()..];
    let body = match after.find('\n') {
        Some(eol) => &after[eol + 1..],
        None => "",
    };

    match end.find(body) {
        Some(terminator) => Some(&body[..terminator.start()]),
        None => Some(body),
    }
}
