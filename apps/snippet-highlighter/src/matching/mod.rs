//! Fuzzy Matching
//!
//! Approximate string alignment between a snippet and extracted page text.
//!
//! - [`similarity`]: normalized edit-distance ratio on a 0-100 scale
//! - [`contains_segment`]: whether one snippet segment occurs in a matched window
//! - [`best_window`]: sliding word-window search over a single page
//! - [`locate`]: best page among the candidates around a target page
//!
//! All thresholds and window constants live in [`MatchConfig`].

mod config;
mod locator;
mod similarity;
mod window;

pub use config::MatchConfig;
pub use locator::{candidate_indices, locate, MatchResult, PageCandidate};
pub use similarity::{contains_segment, similarity};
pub use window::{best_window, window_sizes, WindowMatch};
