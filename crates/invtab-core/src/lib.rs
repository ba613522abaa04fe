//! Core library for GST invoice tabulation.
//!
//! This crate provides:
//! - Page-dump JSON ingestion (one ordered list of page texts per document)
//! - Company classification against known vendor signatures
//! - Per-company field extraction with ordered fallback rule chains
//! - Tax-rate reconciliation from summary blocks
//! - Per-company aggregation for spreadsheet export

pub mod aggregate;
pub mod document;
pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod text;

pub use aggregate::Aggregator;
pub use document::Document;
pub use error::{DocumentError, InvtabError, Result};
pub use extract::{CompanyExtractor, Extraction, classifier, extractor_for};
pub use models::record::{Cell, Company, DateValue, HeaderFields, LineRecord};
pub use models::InvtabConfig;
pub use pipeline::{DocumentReport, Pipeline};
