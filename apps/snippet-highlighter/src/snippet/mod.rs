//! Snippet Segmenter
//!
//! Splits a raw snippet returned by the retrieval system into an ordered
//! sequence of meaningful segments: dialogue turns, sentences and numbered
//! list items.
//!
//! # Pipeline
//!
//! ```text
//! raw text ─► normalize ─► DialogueTurnRule ─► SentenceRule ─► NumberedListRule ─► QuoteCleanupRule ─► Vec<Segment>
//! ```
//!
//! Order is never changed by any step; later stages rely on segment
//! adjacency to grow the highlighted span.
//!
//! # Usage
//!
//! ```rust,ignore
//! use snippet_highlighter::snippet::Segmenter;
//!
//! let segmenter = Segmenter::default();
//! let segments = segmenter.segment("Intro text 6.25 Item one 6.26 Item two");
//! let full_snippet = Segmenter::join(&segments);
//! ```

mod rules;
mod types;

pub use rules::{
    default_rules, DialogueTurnRule, NumberedListRule, QuoteCleanupRule, SegmentRule, SentenceRule,
};
pub use types::{Piece, Segment, SegmentKind};

/// Ordered list of segmentation rules
pub struct Segmenter {
    rules: Vec<Box<dyn SegmentRule>>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::with_rules(default_rules())
    }
}

impl Segmenter {
    /// Create a segmenter running `rules` in the given order
    pub fn with_rules(rules: Vec<Box<dyn SegmentRule>>) -> Self {
        Self { rules }
    }

    /// Collapse form feeds and line breaks into spaces and trim
    pub fn normalize(raw: &str) -> String {
        raw.replace(['\u{000C}', '\r', '\n'], " ").trim().to_string()
    }

    /// Split a raw snippet into ordered, non-empty segments
    pub fn segment(&self, raw: &str) -> Vec<Segment> {
        let normalized = Self::normalize(raw);
        if normalized.is_empty() {
            return Vec::new();
        }

        let mut pieces = vec![Piece::prose(normalized)];
        for rule in &self.rules {
            pieces = rule.apply(pieces);
            tracing::trace!(rule = rule.name(), pieces = pieces.len(), "Applied segmentation rule");
        }

        pieces
            .into_iter()
            .filter_map(|piece| {
                let text = piece.text.trim();
                (!text.is_empty()).then(|| (piece.kind, text.to_string()))
            })
            .enumerate()
            .map(|(index, (kind, text))| Segment { index, text, kind })
            .collect()
    }

    /// Reconstruct the full snippet from segments, separated by single spaces
    pub fn join(segments: &[Segment]) -> String {
        join_range(segments, 0, segments.len())
    }
}

/// Join `segments[start..end]` with single spaces
pub fn join_range(segments: &[Segment], start: usize, end: usize) -> String {
    segments[start..end]
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a raw snippet with the default rule set
pub fn segment(raw: &str) -> Vec<Segment> {
    Segmenter::default().segment(raw)
}
