//! Capability interface over a loaded PDF

use super::Rect;
use crate::highlight::Result;

/// The PDF operations the highlighter depends on
///
/// Page indices are 0-based. Implementations report an out-of-range index
/// as [`HighlightError::PageOutOfRange`](crate::highlight::HighlightError::PageOutOfRange).
pub trait PdfSurface {
    /// Number of pages
    fn page_count(&self) -> usize;

    /// Plain text content of a page
    fn page_text(&self, page: usize) -> Result<String>;

    /// Rectangles where `needle` visually appears on a page
    ///
    /// Empty when the text does not render as one searchable run. A single
    /// hit that wraps across lines yields one rectangle per line.
    fn search_for(&self, page: usize, needle: &str) -> Result<Vec<Rect>>;

    /// Add a highlight annotation covering `rect`
    fn add_highlight(&mut self, page: usize, rect: &Rect) -> Result<()>;
}
