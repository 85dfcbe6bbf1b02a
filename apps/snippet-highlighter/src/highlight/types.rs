//! Highlight outcome types

use std::path::PathBuf;

use serde::Serialize;

/// Contiguous run of segments chosen for highlighting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSpan {
    /// First segment index
    pub start: usize,
    /// Last segment index, inclusive
    pub end: usize,
    /// Segments `start..=end` joined with single spaces
    pub text: String,
}

/// How the highlighted text was found on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMethod {
    /// The span text itself was found
    Exact,
    /// A fuzzy window of the page text was found instead
    Fuzzy,
}

/// Result of the exact-then-fuzzy highlight attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedHighlight {
    Exact(usize),
    Fuzzy(usize),
    Missed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightReport {
    /// 0-based page the highlight was placed on
    pub page_index: usize,
    /// Page match score, 0-100
    pub score: f64,
    pub span: HighlightSpan,
    pub method: HighlightMethod,
    /// Number of annotations added
    pub rectangles: usize,
    /// Where the document was saved, once persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// What a highlight call did
///
/// Everything but `Highlighted` is a non-fatal miss: nothing was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum HighlightOutcome {
    Highlighted(HighlightReport),
    /// No candidate page reached the acceptance score
    NoPageMatch,
    /// A window matched but none of the snippet segments is in it
    NoSegmentContainment,
    /// Neither exact nor fuzzy search found the text on the page
    NoHighlightRectangles,
    /// The worker did not finish within the configured timeout
    TimedOut,
}

impl HighlightOutcome {
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Highlighted(_))
    }

    pub fn report(&self) -> Option<&HighlightReport> {
        match self {
            Self::Highlighted(report) => Some(report),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(HighlightOutcome::NoPageMatch).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "noPageMatch" }));

        let outcome = HighlightOutcome::Highlighted(HighlightReport {
            page_index: 5,
            score: 100.0,
            span: HighlightSpan {
                start: 0,
                end: 0,
                text: "the quarterly report".into(),
            },
            method: HighlightMethod::Exact,
            rectangles: 1,
            output: None,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "highlighted");
        assert_eq!(json["pageIndex"], 5);
        assert_eq!(json["method"], "exact");
        assert!(json.get("output").is_none());
    }
}
