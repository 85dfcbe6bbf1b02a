//! In-memory PDF surface

use std::cell::Cell;

use super::{PdfSurface, Rect};
use crate::highlight::{HighlightError, Result};

/// Height of the synthetic rectangles returned by [`MemoryDocument::search_for`]
const LINE_HEIGHT: f32 = 12.0;

/// Page texts held in memory, with recorded highlights
///
/// Search is case-insensitive and treats any whitespace run as a single
/// space. Every occurrence yields one synthetic rectangle whose `x` is the
/// occurrence's char offset in the normalized page text and whose `width`
/// is the needle's char length.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    pages: Vec<String>,
    reads: Vec<Cell<usize>>,
    highlights: Vec<(usize, Rect)>,
}

impl MemoryDocument {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        let reads = pages.iter().map(|_| Cell::new(0)).collect();
        Self {
            pages,
            reads,
            highlights: Vec::new(),
        }
    }

    /// How many times the text of `page` was extracted
    pub fn text_reads(&self, page: usize) -> usize {
        self.reads.get(page).map_or(0, Cell::get)
    }

    /// Highlights added so far, as `(page, rect)`
    pub fn highlights(&self) -> &[(usize, Rect)] {
        &self.highlights
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page < self.pages.len() {
            Ok(())
        } else {
            Err(HighlightError::PageOutOfRange {
                page,
                page_count: self.pages.len(),
            })
        }
    }
}

fn normalize(text: &str) -> Vec<char> {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
        .chars()
        .collect()
}

impl PdfSurface for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> Result<String> {
        self.check_page(page)?;
        let reads = &self.reads[page];
        reads.set(reads.get() + 1);
        Ok(self.pages[page].clone())
    }

    fn search_for(&self, page: usize, needle: &str) -> Result<Vec<Rect>> {
        self.check_page(page)?;

        let haystack = normalize(&self.pages[page]);
        let needle = normalize(needle);
        if needle.is_empty() || needle.len() > haystack.len() {
            return Ok(Vec::new());
        }

        let mut rects = Vec::new();
        let mut start = 0;
        while start + needle.len() <= haystack.len() {
            if haystack[start..start + needle.len()] == needle[..] {
                rects.push(Rect::new(
                    start as f32,
                    0.0,
                    needle.len() as f32,
                    LINE_HEIGHT,
                ));
                start += needle.len();
            } else {
                start += 1;
            }
        }

        Ok(rects)
    }

    fn add_highlight(&mut self, page: usize, rect: &Rect) -> Result<()> {
        self.check_page(page)?;
        self.highlights.push((page, *rect));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_is_case_and_whitespace_insensitive() {
        let doc = MemoryDocument::new(["The  Quarterly\nreport shows growth. the quarterly report"]);

        let rects = doc.search_for(0, "the quarterly report").unwrap();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].x, 0.0);
        assert_eq!(rects[0].width, 20.0);
    }

    #[test]
    fn test_search_missing_text() {
        let doc = MemoryDocument::new(["short page"]);
        assert!(doc.search_for(0, "not on the page at all").unwrap().is_empty());
        assert!(doc.search_for(0, "   ").unwrap().is_empty());
    }

    #[test]
    fn test_text_reads_are_counted() {
        let doc = MemoryDocument::new(["one", "two"]);
        doc.page_text(1).unwrap();
        doc.page_text(1).unwrap();

        assert_eq!(doc.text_reads(0), 0);
        assert_eq!(doc.text_reads(1), 2);
    }

    #[test]
    fn test_page_out_of_range() {
        let mut doc = MemoryDocument::new(["only page"]);

        assert!(matches!(
            doc.page_text(3),
            Err(HighlightError::PageOutOfRange { page: 3, page_count: 1 })
        ));
        assert!(doc.add_highlight(1, &Rect::new(0.0, 0.0, 1.0, 1.0)).is_err());
        assert!(doc.highlights().is_empty());
    }
}
