//! Highlight Applier
//!
//! Marks the chosen span on the matched page: exact search first, then a
//! fuzzy window of the page text when the span does not render verbatim.

use tracing::{debug, warn};

use super::{determine_span, AppliedHighlight, HighlightSpan, Result};
use crate::matching::{best_window, MatchConfig};
use crate::pdf::PdfSurface;
use crate::snippet::Segment;

/// Search `text` on a page and highlight every hit, returning the hit count
pub fn highlight_text<S>(surface: &mut S, page: usize, text: &str) -> Result<usize>
where
    S: PdfSurface + ?Sized,
{
    let rects = surface.search_for(page, text)?;
    for rect in &rects {
        surface.add_highlight(page, rect)?;
    }
    Ok(rects.len())
}

/// Highlight `span_text` on a page, falling back to the closest page window
pub fn apply_highlight<S>(
    surface: &mut S,
    page: usize,
    span_text: &str,
    config: &MatchConfig,
) -> Result<AppliedHighlight>
where
    S: PdfSurface + ?Sized,
{
    let hits = highlight_text(surface, page, span_text)?;
    if hits > 0 {
        debug!(page, hits, "Exact highlight");
        return Ok(AppliedHighlight::Exact(hits));
    }

    warn!(page, "Exact match not found, falling back to fuzzy window match");
    let page_text = surface.page_text(page)?;
    let fallback = match best_window(&page_text, span_text, config) {
        Some(window) if window.score >= config.accept_score => window,
        _ => return Ok(AppliedHighlight::Missed),
    };

    debug!(page, score = fallback.score, window = %fallback.text, "Fuzzy fallback window");
    match highlight_text(surface, page, &fallback.text)? {
        0 => Ok(AppliedHighlight::Missed),
        hits => Ok(AppliedHighlight::Fuzzy(hits)),
    }
}

/// Determine the span for a matched window and highlight it
///
/// `None` when no segment is contained in `window`.
pub fn apply<S>(
    surface: &mut S,
    page: usize,
    segments: &[Segment],
    window: &str,
    config: &MatchConfig,
) -> Result<Option<(HighlightSpan, AppliedHighlight)>>
where
    S: PdfSurface + ?Sized,
{
    let Some(span) = determine_span(segments, window, config) else {
        return Ok(None);
    };
    let applied = apply_highlight(surface, page, &span.text, config)?;
    Ok(Some((span, applied)))
}
