//! Per-document orchestration: classify, extract, reconcile.
//!
//! One document is an atomic unit of work: it either yields zero or more
//! records or is skipped; nothing here halts the batch.

use tracing::{debug, warn};

use crate::document::Document;
use crate::extract::{classifier, extractor_for};
use crate::models::config::InvtabConfig;
use crate::models::record::{Company, HeaderFields, LineRecord};

/// Outcome of processing a single document.
#[derive(Debug)]
pub struct DocumentReport {
    /// Source document name.
    pub document: String,
    /// Classified company, or `None` when no signature matched.
    pub company: Option<Company>,
    /// Extracted header field bundle.
    pub header: HeaderFields,
    /// Line records, reconciled and ready for aggregation.
    pub rows: Vec<LineRecord>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
}

/// The synchronous per-document pipeline.
pub struct Pipeline {
    config: InvtabConfig,
}

impl Pipeline {
    pub fn new(config: InvtabConfig) -> Self {
        Self { config }
    }

    /// Classify the document and run the matching extractor.
    ///
    /// An unrecognized document short-circuits with a warning and zero
    /// records. Content never raises: every field miss resolves to an
    /// empty or defaulted value inside the extractor.
    pub fn process_document(&self, document: &Document) -> DocumentReport {
        let full_text = document.full_text();

        let Some(company) = classifier::classify(&full_text) else {
            warn!(document = %document.name, "no company signature matched");
            return DocumentReport {
                document: document.name.clone(),
                company: None,
                header: HeaderFields::default(),
                rows: Vec::new(),
                warnings: vec!["no company signature matched".to_string()],
            };
        };

        debug!(
            document = %document.name,
            company = company.display_name(),
            "classified"
        );

        let extractor = extractor_for(company, &self.config.extraction);
        let extraction = extractor.extract(&document.pages);

        let mut warnings = extraction.warnings;
        if extraction.rows.is_empty() {
            warn!(
                document = %document.name,
                company = company.display_name(),
                "no line items extracted"
            );
            warnings.push("no line items extracted".to_string());
        }

        DocumentReport {
            document: document.name.clone(),
            company: Some(company),
            header: extraction.header,
            rows: extraction.rows,
            warnings,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(InvtabConfig::default())
    }
}
