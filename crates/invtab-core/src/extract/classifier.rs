//! Company classification from whole-document text.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::Company;

lazy_static! {
    // One signature per vendor, unique to its letterhead/boilerplate.
    // Signatures are disjoint, so order only matters defensively.
    static ref SIGNATURES: [(Company, Regex); 3] = [
        (
            Company::Nimbus,
            Regex::new(r"(?i)nimbus\s+infotech").unwrap(),
        ),
        (
            Company::Meridian,
            Regex::new(r"(?i)meridian\s+(?:industrial|indl\.?)").unwrap(),
        ),
        (
            Company::Stellar,
            Regex::new(r"(?i)stellar\s+facility").unwrap(),
        ),
    ];
}

/// Classify a document by testing the fixed ordered signature set against
/// its full concatenated text. Returns the first matching company, or
/// `None` when no signature matches.
pub fn classify(full_text: &str) -> Option<Company> {
    SIGNATURES
        .iter()
        .find(|(_, signature)| signature.is_match(full_text))
        .map(|(company, _)| *company)
}
