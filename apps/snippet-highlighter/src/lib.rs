//! Snippet Highlighter Library
//!
//! Locates a text snippet returned by a retrieval system in its source PDF
//! and marks it with highlight annotations. The snippet may be re-wrapped or
//! slightly altered compared to the PDF text, and the page it came from is
//! only approximately known.
//!
//! # Modules
//!
//! - `snippet`: splits a snippet into ordered segments
//! - `matching`: similarity ratio, window search and page locator
//! - `highlight`: span selection, highlighting and the end-to-end pipeline
//! - `pdf`: capability interface over PDFs (MuPDF + lopdf, or in memory)
//! - `source`: document identifier to file path resolution
//! - `service`: async front with timeouts and per-path serialization
//!
//! The HTTP server binary is in main.rs.

pub mod config;
pub mod error;
pub mod highlight;
pub mod matching;
pub mod pdf;
pub mod routes;
pub mod service;
pub mod snippet;
pub mod source;
pub mod state;

pub use highlight::{
    find_and_highlight, highlight_document, HighlightError, HighlightOutcome, HighlightReport,
};
pub use matching::MatchConfig;
pub use pdf::{MemoryDocument, PdfHighlighter, PdfSurface};
pub use service::{HighlightRequest, HighlightService};
pub use snippet::{segment, Segment, Segmenter};
pub use source::SourceResolver;
