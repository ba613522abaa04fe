//! Per-company aggregation of line records across documents.

use std::collections::HashMap;

use tracing::info;

use crate::models::record::{Company, LineRecord};

/// Accumulates each company's records in processing order.
///
/// Append-only: record order within a company equals the order documents
/// were processed, then the order rows were discovered within each
/// document.
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: HashMap<Company, Vec<LineRecord>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's records.
    ///
    /// Documents with no company identity are skipped; recognized documents
    /// with zero records are skipped and logged.
    pub fn push(&mut self, document: &str, company: Option<Company>, rows: Vec<LineRecord>) {
        let Some(company) = company else {
            return;
        };

        if rows.is_empty() {
            info!(document, company = company.display_name(), "recognized, no items");
            return;
        }

        self.groups.entry(company).or_default().extend(rows);
    }

    /// Records accumulated for one company so far.
    pub fn records(&self, company: Company) -> &[LineRecord] {
        self.groups.get(&company).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total record count across all companies.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True when no company produced any records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty per-company groups, in fixed company order.
    pub fn into_groups(mut self) -> Vec<(Company, Vec<LineRecord>)> {
        Company::ALL
            .iter()
            .filter_map(|company| {
                self.groups
                    .remove(company)
                    .filter(|rows| !rows.is_empty())
                    .map(|rows| (*company, rows))
            })
            .collect()
    }
}
