//! Snippet Highlighting
//!
//! Ties the segmenter, the locator and a [`PdfSurface`](crate::pdf::PdfSurface)
//! together:
//!
//! 1. segment the snippet and rebuild the full snippet from the segments
//! 2. locate the best window on the pages around the target page
//! 3. pick the span of segments contained in that window
//! 4. highlight the span exactly, or the closest page window as fallback
//! 5. save, only if something was highlighted
//!
//! Misses at any step are reported as [`HighlightOutcome`] values and
//! logged; only I/O, PDF and lookup failures are [`HighlightError`]s.

mod applier;
mod error;
mod pipeline;
mod span;
mod types;

pub use applier::{apply, apply_highlight, highlight_text};
pub use error::{HighlightError, Result};
pub use pipeline::{find_and_highlight, highlight_document};
pub use span::determine_span;
pub use types::{AppliedHighlight, HighlightMethod, HighlightOutcome, HighlightReport, HighlightSpan};
