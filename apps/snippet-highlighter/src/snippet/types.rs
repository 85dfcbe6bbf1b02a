//! Segment types

use serde::Serialize;

/// What a segment represents in the source snippet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SegmentKind {
    /// A speaker turn such as `A: "..."`
    Dialogue,
    /// Ordinary running text (a sentence or clause)
    Prose,
    /// An enumerated item starting with a marker such as `6.25` or `3)`
    ListItem,
}

/// Intermediate unit passed between segmentation rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: SegmentKind,
    pub text: String,
}

impl Piece {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn prose(text: impl Into<String>) -> Self {
        Self::new(SegmentKind::Prose, text)
    }
}

/// One unit of a decomposed snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Position in the ordered segment sequence (0-based, contiguous)
    pub index: usize,
    pub text: String,
    pub kind: SegmentKind,
}
