//! PDF Access
//!
//! The highlighter only talks to PDFs through [`PdfSurface`]:
//!
//! - [`PdfHighlighter`]: real files, MuPDF for text and search, lopdf for
//!   annotations and saving
//! - [`MemoryDocument`]: page texts in memory, for tests and benchmarks

mod annotate;
mod highlighter;
mod memory;
mod persist;
mod surface;
mod types;

pub use highlighter::{PdfHighlighter, MAX_SEARCH_HITS};
pub use memory::MemoryDocument;
pub use surface::PdfSurface;
pub use types::Rect;
