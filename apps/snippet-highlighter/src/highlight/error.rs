//! Highlight error types
//!
//! Only environment and input problems are errors. Data-quality results
//! (no page match, nothing to highlight) are [`HighlightOutcome`](super::HighlightOutcome)
//! values instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlightError {
    /// Neither the highlighted nor the imported document exists
    #[error("Source document not found: {0}")]
    NotFound(String),

    /// Identifier is empty, absolute or escapes the document directories
    #[error("Invalid document identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Page {page} out of range, document has {page_count} pages")]
    PageOutOfRange { page: usize, page_count: usize },

    /// The PDF could not be parsed, searched or serialized
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking worker panicked or was cancelled
    #[error("Task join error: {0}")]
    Join(String),
}

impl HighlightError {
    /// Errors tied to one document, which a batch can skip over
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_) | Self::InvalidIdentifier(_) | Self::PageOutOfRange { .. } | Self::Pdf(_)
        )
    }
}

impl From<mupdf::Error> for HighlightError {
    fn from(e: mupdf::Error) -> Self {
        HighlightError::Pdf(e.to_string())
    }
}

impl From<lopdf::Error> for HighlightError {
    fn from(e: lopdf::Error) -> Self {
        HighlightError::Pdf(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HighlightError>;
