//! Locate-and-highlight pipeline
//!
//! ```text
//! snippet ─► segment ─► join ─► locate (pages around target) ─► span ─► apply ─► save
//! ```

use std::path::Path;

use tracing::{debug, info, warn};

use super::{
    apply, AppliedHighlight, HighlightMethod, HighlightOutcome, HighlightReport, Result,
};
use crate::matching::{candidate_indices, locate, MatchConfig, PageCandidate};
use crate::pdf::{PdfHighlighter, PdfSurface};
use crate::snippet::{segment, Segmenter};
use crate::source::SourceResolver;

/// Lazily extract the text of the candidate pages
///
/// A page whose text cannot be extracted is logged and skipped.
fn candidate_pages<S>(surface: &S, indices: Vec<usize>) -> impl Iterator<Item = PageCandidate> + '_
where
    S: PdfSurface + ?Sized,
{
    indices
        .into_iter()
        .filter_map(move |index| match surface.page_text(index) {
            Ok(text) => Some(PageCandidate::new(index, text)),
            Err(e) => {
                warn!(page = index, error = %e, "Skipping page, text extraction failed");
                None
            }
        })
}

/// Locate `snippet` around `target_page` and highlight it in memory
///
/// Nothing is saved; see [`find_and_highlight`] for the file-backed flow.
pub fn highlight_document<S>(
    surface: &mut S,
    snippet: &str,
    target_page: usize,
    config: &MatchConfig,
) -> Result<HighlightOutcome>
where
    S: PdfSurface + ?Sized,
{
    let segments = segment(snippet);
    let full_snippet = Segmenter::join(&segments);
    debug!(segments = segments.len(), target_page, "Segmented snippet");

    let indices = candidate_indices(target_page, surface.page_count(), config.candidate_radius);
    let Some(found) = locate(candidate_pages(&*surface, indices), &full_snippet, target_page, config)
    else {
        warn!(target_page, "No matching block found");
        return Ok(HighlightOutcome::NoPageMatch);
    };
    debug!(page = found.page_index, score = found.score, "Matched page window");

    let Some((span, applied)) = apply(surface, found.page_index, &segments, &found.window, config)?
    else {
        warn!(page = found.page_index, "No segments matched inside best text block");
        return Ok(HighlightOutcome::NoSegmentContainment);
    };

    let (method, rectangles) = match applied {
        AppliedHighlight::Exact(n) => (HighlightMethod::Exact, n),
        AppliedHighlight::Fuzzy(n) => (HighlightMethod::Fuzzy, n),
        AppliedHighlight::Missed => {
            warn!(page = found.page_index, "Highlight failed, no rectangles found");
            return Ok(HighlightOutcome::NoHighlightRectangles);
        }
    };

    Ok(HighlightOutcome::Highlighted(HighlightReport {
        page_index: found.page_index,
        score: found.score,
        span,
        method,
        rectangles,
        output: None,
    }))
}

/// Resolve a document, highlight `snippet` and save the result to `output`
///
/// The source is the previously highlighted variant when one exists, so
/// repeated calls accumulate highlights. The file is only written when
/// something was highlighted. `output` may equal the resolved source.
pub fn find_and_highlight(
    resolver: &SourceResolver,
    identifier: &str,
    snippet: &str,
    target_page: usize,
    output: &Path,
    config: &MatchConfig,
) -> Result<HighlightOutcome> {
    let source = resolver.resolve(identifier)?;
    debug!(source = %source.display(), "Using source document");

    let mut document = PdfHighlighter::open(&source)?;
    let mut outcome = highlight_document(&mut document, snippet, target_page, config)?;

    if let HighlightOutcome::Highlighted(report) = &mut outcome {
        document.save(output)?;
        report.output = Some(output.to_path_buf());
        info!(
            identifier,
            page = report.page_index,
            rectangles = report.rectangles,
            output = %output.display(),
            "Highlight successful"
        );
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::MemoryDocument;

    const PHRASE: &str = "the quarterly report shows strong growth in all regions";

    fn filler(n: usize) -> String {
        format!("page {n} lists the opening hours of the library and the rules for borrowing books")
    }

    fn ten_pages() -> MemoryDocument {
        MemoryDocument::new((0..10).map(|i| if i == 5 { PHRASE.to_string() } else { filler(i) }))
    }

    #[test]
    fn test_highlights_target_page() {
        let mut doc = ten_pages();
        let outcome = highlight_document(
            &mut doc,
            "the quarterly report shows strong growth",
            5,
            &MatchConfig::default(),
        )
        .unwrap();

        let report = outcome.report().unwrap();
        assert_eq!(report.page_index, 5);
        assert_eq!(report.method, HighlightMethod::Exact);
        assert_eq!(report.rectangles, 1);
        assert_eq!(doc.highlights().len(), 1);
        assert_eq!(doc.highlights()[0].0, 5);
    }

    #[test]
    fn test_only_neighbouring_pages_extracted() {
        let mut doc = ten_pages();
        highlight_document(&mut doc, "the quarterly report shows strong growth", 5, &MatchConfig::default())
            .unwrap();

        assert_eq!(doc.text_reads(4), 1);
        assert_eq!(doc.text_reads(5), 1);
        // Exact hit on page 5 ends the search before page 6
        assert_eq!(doc.text_reads(6), 0);
        assert_eq!(doc.text_reads(0), 0);
    }

    #[test]
    fn test_snippet_on_neighbouring_page() {
        let mut doc = ten_pages();
        let outcome = highlight_document(
            &mut doc,
            "the quarterly report shows strong growth",
            6,
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome.report().unwrap().page_index, 5);
    }

    #[test]
    fn test_span_keeps_every_sentence_with_a_typo() {
        let mut doc = MemoryDocument::new([
            "Handelwijze weigering. Het kind wil niet meedoen aan de krring. \
             Bespreek dit met de ouderss en evalueer het. Zoek samen naar een pasende activiteit. \
             Volgende punt op de lijst.",
        ]);
        let outcome = highlight_document(
            &mut doc,
            "Het kind wil niet meedoen aan de kring. Bespreek dit met de ouders en evalueer het. \
             Zoek samen naar een passende activiteit.",
            0,
            &MatchConfig::default(),
        )
        .unwrap();

        let report = outcome.report().unwrap();
        assert_eq!((report.span.start, report.span.end), (0, 2));
        assert_eq!(report.method, HighlightMethod::Fuzzy);
        assert_eq!(doc.highlights().len(), 1);
    }

    #[test]
    fn test_no_page_match() {
        let mut doc = ten_pages();
        let outcome = highlight_document(
            &mut doc,
            "the quarterly report shows strong growth",
            1,
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome, HighlightOutcome::NoPageMatch);
        assert!(doc.highlights().is_empty());
    }

    #[test]
    fn test_empty_snippet() {
        let mut doc = ten_pages();
        let outcome = highlight_document(&mut doc, " \u{000C}\n", 5, &MatchConfig::default()).unwrap();
        assert_eq!(outcome, HighlightOutcome::NoPageMatch);
    }

    #[test]
    fn test_target_beyond_document() {
        let mut doc = ten_pages();
        let outcome = highlight_document(&mut doc, PHRASE, 40, &MatchConfig::default()).unwrap();
        assert_eq!(outcome, HighlightOutcome::NoPageMatch);
    }

    #[test]
    fn test_no_segment_containment() {
        // Page matches at 60+ overall, yet no single segment is contained
        let config = MatchConfig {
            containment_score: 99.0,
            ..MatchConfig::default()
        };
        let mut doc = MemoryDocument::new(["the quartrly reprt shows strng growth"]);
        let outcome = highlight_document(
            &mut doc,
            "The quarterly report shows strong growth.",
            0,
            &config,
        )
        .unwrap();

        assert_eq!(outcome, HighlightOutcome::NoSegmentContainment);
    }

    #[test]
    fn test_no_highlight_rectangles() {
        struct Unsearchable(MemoryDocument);

        impl PdfSurface for Unsearchable {
            fn page_count(&self) -> usize {
                self.0.page_count()
            }
            fn page_text(&self, page: usize) -> Result<String> {
                self.0.page_text(page)
            }
            fn search_for(&self, _page: usize, _needle: &str) -> Result<Vec<crate::pdf::Rect>> {
                Ok(Vec::new())
            }
            fn add_highlight(&mut self, page: usize, rect: &crate::pdf::Rect) -> Result<()> {
                self.0.add_highlight(page, rect)
            }
        }

        let mut doc = Unsearchable(ten_pages());
        let outcome = highlight_document(
            &mut doc,
            "the quarterly report shows strong growth",
            5,
            &MatchConfig::default(),
        )
        .unwrap();

        assert_eq!(outcome, HighlightOutcome::NoHighlightRectangles);
    }
}
