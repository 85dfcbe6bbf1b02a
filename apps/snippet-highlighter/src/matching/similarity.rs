//! Similarity ratio and segment containment

use super::MatchConfig;

/// InDel similarity ratio of two strings, `0.0..=100.0`
///
/// Computed on chars: `100 * (1 - indel / (len(a) + len(b)))`, where `indel`
/// counts insertions and deletions only. Two empty strings are identical and
/// score 100.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    100.0 * rapidfuzz::fuzz::ratio(a.chars(), b.chars())
}

/// Check whether `segment` occurs in the matched `window` text
///
/// Exact substrings always pass. Segments shorter than
/// `short_segment_chars` only pass exactly, since a few characters are
/// fuzzy-similar to too many places. Longer segments are compared against
/// sub-windows of `len + containment_slack_chars` chars, moved by
/// `max(len / 4, containment_min_stride)` chars.
pub fn contains_segment(segment: &str, window: &str, config: &MatchConfig) -> bool {
    let segment = segment.trim();
    let window = window.trim();

    if window.contains(segment) {
        return true;
    }

    let segment_chars = segment.chars().count();
    if segment_chars < config.short_segment_chars {
        return false;
    }

    // Byte offset of every char boundary, so sub-windows never split a char
    let offsets: Vec<usize> = window
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(window.len()))
        .collect();
    let window_chars = offsets.len() - 1;
    if window_chars < segment_chars {
        return false;
    }

    let stride = (segment_chars / 4)
        .max(config.containment_min_stride)
        .max(1);
    let span = segment_chars + config.containment_slack_chars;

    (0..=window_chars - segment_chars)
        .step_by(stride)
        .any(|start| {
            let end = (start + span).min(window_chars);
            similarity(segment, &window[offsets[start]..offsets[end]]) >= config.containment_score
        })
}
