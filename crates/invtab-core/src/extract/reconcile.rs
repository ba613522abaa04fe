//! Tax-rate reconciliation.
//!
//! Some layouts defer the exact tax percentages to a summary block printed
//! after the line items. Extraction therefore runs in two phases: the
//! extractor first produces a provisional row batch, then, when a summary
//! block is found, [`apply`] produces a corrected batch with the summary's
//! rates, recomputed tax amounts, and recomputed totals. The correction is
//! scoped to the one document that carried the summary and runs before the
//! document's rows reach the aggregator.

use rust_decimal::Decimal;
use tracing::warn;

use super::rules::amounts::parse_amount;
use super::rules::patterns::CGST_SGST_SUMMARY;
use crate::models::record::{NimbusRow, StellarRow};

/// Tax rates and amounts recovered from a summary block.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxSummary {
    pub cgst_pct: Decimal,
    pub cgst_amount: Decimal,
    pub sgst_pct: Decimal,
    pub sgst_amount: Decimal,
}

/// All tax summary blocks in the text, in document order.
pub fn find_summaries(text: &str) -> Vec<TaxSummary> {
    CGST_SGST_SUMMARY
        .captures_iter(text)
        .map(|caps| TaxSummary {
            cgst_pct: parse_amount(&caps[1]),
            cgst_amount: parse_amount(&caps[2]),
            sgst_pct: parse_amount(&caps[3]),
            sgst_amount: parse_amount(&caps[4]),
        })
        .collect()
}

/// The summary block to reconcile against, if any.
///
/// Invoices with several HSN/SAC codes can print more than one summary
/// row; the first match is applied and the ambiguity is surfaced.
pub fn find_summary(text: &str, warnings: &mut Vec<String>) -> Option<TaxSummary> {
    let mut summaries = find_summaries(text);

    if summaries.len() > 1 {
        warn!(
            count = summaries.len(),
            "multiple tax summary rows found; applying the first"
        );
        warnings.push(format!(
            "multiple tax summary rows found ({}); applied the first",
            summaries.len()
        ));
    }

    if summaries.is_empty() {
        None
    } else {
        Some(summaries.remove(0))
    }
}

/// A row whose tax fields can be rewritten from a [`TaxSummary`].
pub trait TaxAdjust: Sized {
    /// The pre-tax subtotal the percentages apply to.
    fn taxable_value(&self) -> Decimal;

    /// A copy of the row with the given tax fields and recomputed total.
    fn with_taxes(
        self,
        cgst_pct: Decimal,
        cgst_amount: Decimal,
        sgst_pct: Decimal,
        sgst_amount: Decimal,
        total: Decimal,
    ) -> Self;
}

impl TaxAdjust for NimbusRow {
    fn taxable_value(&self) -> Decimal {
        self.taxable_value
    }

    fn with_taxes(
        mut self,
        cgst_pct: Decimal,
        cgst_amount: Decimal,
        sgst_pct: Decimal,
        sgst_amount: Decimal,
        total: Decimal,
    ) -> Self {
        self.cgst_pct = cgst_pct;
        self.cgst_amount = cgst_amount;
        self.sgst_pct = sgst_pct;
        self.sgst_amount = sgst_amount;
        self.total = total;
        self
    }
}

impl TaxAdjust for StellarRow {
    fn taxable_value(&self) -> Decimal {
        self.taxable_value
    }

    fn with_taxes(
        mut self,
        cgst_pct: Decimal,
        cgst_amount: Decimal,
        sgst_pct: Decimal,
        sgst_amount: Decimal,
        total: Decimal,
    ) -> Self {
        self.cgst_pct = cgst_pct;
        self.cgst_amount = cgst_amount;
        self.sgst_pct = sgst_pct;
        self.sgst_amount = sgst_amount;
        self.total = total;
        self
    }
}

/// Rewrite a provisional row batch against a summary block.
///
/// For every row: both percentages are overwritten, each tax amount is
/// recomputed as `taxable × pct / 100` (2 dp), and the total becomes
/// `taxable + cgst + sgst`. Idempotent: a second pass with the same summary
/// reproduces the same batch.
pub fn apply<R: TaxAdjust>(rows: Vec<R>, summary: &TaxSummary) -> Vec<R> {
    let hundred = Decimal::new(100, 0);

    rows.into_iter()
        .map(|row| {
            let taxable = row.taxable_value();
            let cgst = (taxable * summary.cgst_pct / hundred).round_dp(2);
            let sgst = (taxable * summary.sgst_pct / hundred).round_dp(2);
            let total = taxable + cgst + sgst;
            row.with_taxes(summary.cgst_pct, cgst, summary.sgst_pct, sgst, total)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn provisional_row(taxable: &str) -> StellarRow {
        StellarRow {
            taxable_value: dec(taxable),
            cgst_pct: dec("9"),
            sgst_pct: dec("9"),
            ..StellarRow::default()
        }
    }

    #[test]
    fn test_find_summaries() {
        let text = "Taxable 1,000.00 CGST @ 6% : 60.00 SGST @ 6% : 60.00";
        let summaries = find_summaries(text);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].cgst_pct, dec("6"));
        assert_eq!(summaries[0].sgst_amount, dec("60.00"));
    }

    #[test]
    fn test_find_summary_warns_on_multiple() {
        let text = "CGST @ 6% : 60.00 SGST @ 6% : 60.00\nCGST @ 9% : 90.00 SGST @ 9% : 90.00";
        let mut warnings = Vec::new();
        let summary = find_summary(text, &mut warnings).unwrap();
        assert_eq!(summary.cgst_pct, dec("6"));
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_find_summary_absent() {
        let mut warnings = Vec::new();
        assert!(find_summary("no summary here", &mut warnings).is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_apply_overrides_provisional_rates() {
        let summary = TaxSummary {
            cgst_pct: dec("6"),
            cgst_amount: dec("60.00"),
            sgst_pct: dec("6"),
            sgst_amount: dec("60.00"),
        };

        let corrected = apply(vec![provisional_row("1000.00")], &summary);
        assert_eq!(corrected[0].cgst_pct, dec("6"));
        assert_eq!(corrected[0].cgst_amount, dec("60.00"));
        assert_eq!(corrected[0].sgst_amount, dec("60.00"));
        assert_eq!(corrected[0].total, dec("1120.00"));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let summary = TaxSummary {
            cgst_pct: dec("9"),
            cgst_amount: dec("90.00"),
            sgst_pct: dec("9"),
            sgst_amount: dec("90.00"),
        };

        let once = apply(vec![provisional_row("1000.00")], &summary);
        let twice = apply(once.clone(), &summary);

        assert_eq!(once[0].cgst_amount, twice[0].cgst_amount);
        assert_eq!(once[0].sgst_amount, twice[0].sgst_amount);
        assert_eq!(once[0].total, twice[0].total);
    }
}
