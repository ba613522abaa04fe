//! Error types for the invtab-core library.

use thiserror::Error;

/// Main error type for the invtab library.
#[derive(Error, Debug)]
pub enum InvtabError {
    /// Document input error.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while loading a page-dump document.
///
/// These are the only hard per-document failures: the affected document is
/// skipped with a warning and the batch continues.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// Failed to read the page-dump file.
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    /// The page dump is not valid JSON or misses required fields.
    #[error("malformed page dump: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The page dump contains no pages.
    #[error("page dump has no pages")]
    NoPages,
}

/// Result type for the invtab library.
pub type Result<T> = std::result::Result<T, InvtabError>;
