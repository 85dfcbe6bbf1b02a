//! Highlight span determination

use tracing::debug;

use super::HighlightSpan;
use crate::matching::{contains_segment, MatchConfig};
use crate::snippet::{join_range, Segment};

/// Choose the run of segments to highlight for a matched window
///
/// Starts from the first and last segment contained in `window`, grows
/// while the neighbouring segments are contained too, then adds one more
/// segment on each side unconditionally (clamped) to make up for a window
/// that cut a segment in half. `None` if no segment is contained.
pub fn determine_span(
    segments: &[Segment],
    window: &str,
    config: &MatchConfig,
) -> Option<HighlightSpan> {
    let contained: Vec<bool> = segments
        .iter()
        .map(|s| contains_segment(&s.text, window, config))
        .collect();

    let first = contained.iter().position(|&c| c)?;
    let last = contained.iter().rposition(|&c| c)?;
    debug!(
        first,
        last,
        matched = contained.iter().filter(|&&c| c).count(),
        "Segments contained in window"
    );

    let mut start = first;
    while start > 0 && contained[start - 1] {
        start -= 1;
    }
    let mut end = last;
    while end + 1 < segments.len() && contained[end + 1] {
        end += 1;
    }

    let start = start.saturating_sub(1);
    let end = (end + 1).min(segments.len() - 1);

    Some(HighlightSpan {
        start,
        end,
        text: join_range(segments, start, end + 1),
    })
}
