//! Matching thresholds and window constants

use serde::{Deserialize, Serialize};

/// Tunable constants of the locator and the containment test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    /// Allowed word-count slack of a window versus the snippet length
    pub window_margin: usize,
    /// Step between tried window sizes, in words
    pub window_step: usize,
    /// Step between window positions on a page, in words
    pub window_stride: usize,
    /// A window scoring at least this ends the whole search
    pub early_exit_score: f64,
    /// Minimum score for a page match to be accepted
    pub accept_score: f64,
    /// Minimum score for a segment to count as contained in a window
    pub containment_score: f64,
    /// Segments shorter than this (in chars) must match exactly
    pub short_segment_chars: usize,
    /// Extra chars added to the segment length for containment sub-windows
    pub containment_slack_chars: usize,
    /// Lower bound of the containment sub-window stride, in chars
    pub containment_min_stride: usize,
    /// Pages tried on each side of the target page
    pub candidate_radius: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            window_margin: 10,
            window_step: 2,
            window_stride: 2,
            early_exit_score: 95.0,
            accept_score: 60.0,
            containment_score: 70.0,
            short_segment_chars: 10,
            containment_slack_chars: 30,
            containment_min_stride: 10,
            candidate_radius: 1,
        }
    }
}
