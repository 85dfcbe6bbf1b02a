//! Sliding word-window search over one page

use serde::Serialize;
use tracing::trace;

use super::{similarity, MatchConfig};

/// Best-scoring run of consecutive page words
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowMatch {
    /// Window words joined with single spaces
    pub text: String,
    /// Similarity to the searched text, 0-100
    pub score: f64,
    /// Index of the first word of the window on the page
    pub start_word: usize,
    /// Number of words in the window
    pub word_len: usize,
}

/// Window sizes tried for a snippet of `target_len` words
///
/// Runs from `target_len - window_margin` to `target_len + window_margin`
/// in `window_step` increments, skipping sizes that are not positive or
/// exceed the page's word count.
pub fn window_sizes(
    target_len: usize,
    page_words: usize,
    config: &MatchConfig,
) -> impl Iterator<Item = usize> {
    let low = target_len as i64 - config.window_margin as i64;
    let high = target_len as i64 + config.window_margin as i64;

    (low..=high)
        .step_by(config.window_step.max(1))
        .filter_map(|size| usize::try_from(size).ok())
        .filter(move |&size| size > 0 && size <= page_words)
}

/// Find the page window most similar to `snippet`
///
/// Windows of every size from [`window_sizes`] slide across the page words
/// `window_stride` words at a time. The search returns as soon as a window
/// reaches `early_exit_score`. Returns `None` when the snippet is empty or no
/// window size fits the page; otherwise the best window seen, whatever its
/// score. Acceptance is up to the caller.
pub fn best_window(page_text: &str, snippet: &str, config: &MatchConfig) -> Option<WindowMatch> {
    let snippet = snippet.trim();
    let target_len = snippet.split_whitespace().count();
    if target_len == 0 {
        return None;
    }

    let words: Vec<&str> = page_text.split_whitespace().collect();
    let stride = config.window_stride.max(1);
    let mut best: Option<WindowMatch> = None;

    for size in window_sizes(target_len, words.len(), config) {
        for start in (0..=words.len() - size).step_by(stride) {
            let text = words[start..start + size].join(" ");
            let score = similarity(snippet, &text);

            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(WindowMatch {
                    text,
                    score,
                    start_word: start,
                    word_len: size,
                });
            }

            if score >= config.early_exit_score {
                trace!(size, start, score, "Early exit on window");
                return best;
            }
        }
    }

    best
}
