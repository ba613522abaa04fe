//! Input adapter for page-dump JSON produced by the upstream text
//! extraction tool.
//!
//! The upstream tool emits one JSON file per source document:
//! `{"file_name": "...", "total_pages": N, "pages": [{"page_number": 1,
//! "text": "..."}], "metadata": {...}}`. Only the page texts and the file
//! name are consumed here; metadata is tolerated and ignored.

use std::path::Path;

use serde::Deserialize;

use crate::error::DocumentError;

/// One document: an ordered list of page texts plus a display name.
#[derive(Debug, Clone)]
pub struct Document {
    /// Source file name, used in diagnostics.
    pub name: String,
    /// Ordered page texts, one per page.
    pub pages: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PageDump {
    #[serde(default)]
    file_name: Option<String>,
    pages: Vec<PageEntry>,
}

#[derive(Debug, Deserialize)]
struct PageEntry {
    #[serde(default)]
    text: String,
}

impl Document {
    /// Build a document directly from page texts.
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Parse a page dump from a JSON string.
    pub fn from_json_str(fallback_name: &str, json: &str) -> Result<Self, DocumentError> {
        let dump: PageDump = serde_json::from_str(json)?;

        if dump.pages.is_empty() {
            return Err(DocumentError::NoPages);
        }

        Ok(Self {
            name: dump.file_name.unwrap_or_else(|| fallback_name.to_string()),
            pages: dump.pages.into_iter().map(|p| p.text).collect(),
        })
    }

    /// Read and parse a page-dump file.
    ///
    /// Any failure here is the one hard per-document failure: the caller
    /// skips the document with a warning and continues the batch.
    pub fn from_json_file(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
            path: path.display().to_string(),
            source,
        })?;

        let fallback = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");

        Self::from_json_str(fallback, &content)
    }

    /// Full concatenated document text, used for classification.
    pub fn full_text(&self) -> String {
        self.pages.join("\n")
    }
}
