//! File-backed PDF surface
//!
//! MuPDF extracts text and finds rectangles; the same bytes are loaded into a
//! lopdf object model that receives the highlight annotations and is written
//! back out.

use std::path::{Path, PathBuf};

use lopdf::ObjectId;
use mupdf::{Document, TextPageOptions};
use tracing::debug;

use super::annotate::{add_highlight_annotation, count_highlights};
use super::persist::write_document;
use super::{PdfSurface, Rect};
use crate::highlight::{HighlightError, Result};

/// Upper bound on search hits per needle and page
pub const MAX_SEARCH_HITS: u32 = 256;

/// A loaded PDF that can be searched, annotated and saved
pub struct PdfHighlighter {
    source: PathBuf,
    text: Document,
    annotations: lopdf::Document,
    page_ids: Vec<ObjectId>,
    page_count: usize,
    added: usize,
}

impl PdfHighlighter {
    /// Load a PDF fully into memory
    ///
    /// The file is not kept open, so saving over it later is safe.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let source = path.as_ref().to_path_buf();
        let data = std::fs::read(&source)?;

        let text = Document::from_bytes(&data, "application/pdf")?;
        let page_count = text.page_count()? as usize;
        let annotations = lopdf::Document::load_mem(&data)?;
        let page_ids: Vec<ObjectId> = annotations.get_pages().into_values().collect();

        if page_ids.len() != page_count {
            debug!(
                mupdf = page_count,
                lopdf = page_ids.len(),
                "Page count differs between parsers"
            );
        }

        Ok(Self {
            source,
            text,
            annotations,
            page_ids,
            page_count,
            added: 0,
        })
    }

    /// Path the document was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Highlights added since loading
    pub fn added_highlights(&self) -> usize {
        self.added
    }

    /// Highlight annotations currently on a page, including pre-existing ones
    pub fn highlight_count(&self, page: usize) -> Result<usize> {
        count_highlights(&self.annotations, self.page_id(page)?)
    }

    /// Write the document to `output`, see [`write_document`]
    pub fn save(&mut self, output: &Path) -> Result<()> {
        write_document(&mut self.annotations, &self.source, output)?;
        debug!(path = %output.display(), highlights = self.added, "Saved highlighted PDF");
        Ok(())
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page < self.page_count {
            Ok(())
        } else {
            Err(HighlightError::PageOutOfRange {
                page,
                page_count: self.page_count,
            })
        }
    }

    fn page_id(&self, page: usize) -> Result<ObjectId> {
        self.page_ids
            .get(page)
            .copied()
            .ok_or(HighlightError::PageOutOfRange {
                page,
                page_count: self.page_ids.len(),
            })
    }
}

impl PdfSurface for PdfHighlighter {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_text(&self, page: usize) -> Result<String> {
        self.check_page(page)?;
        let page = self.text.load_page(page as i32)?;
        Ok(page.to_text_page(TextPageOptions::empty())?.to_text()?)
    }

    fn search_for(&self, page: usize, needle: &str) -> Result<Vec<Rect>> {
        self.check_page(page)?;
        let needle = needle.trim();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let quads = self.text.load_page(page as i32)?.search(needle, MAX_SEARCH_HITS)?;
        Ok(quads
            .into_iter()
            .map(|q| {
                let x = q.ul.x.min(q.ll.x);
                let y = q.ul.y.min(q.ur.y);
                let width = q.ur.x.max(q.lr.x) - x;
                let height = q.ll.y.max(q.lr.y) - y;
                Rect::new(x, y, width, height)
            })
            .filter(|r| !r.is_empty())
            .collect())
    }

    fn add_highlight(&mut self, page: usize, rect: &Rect) -> Result<()> {
        let page_id = self.page_id(page)?;
        add_highlight_annotation(&mut self.annotations, page_id, rect)?;
        self.added += 1;
        Ok(())
    }
}
