//! Fuzzy Page Locator
//!
//! Picks the page around the target page whose best window is most similar
//! to the full snippet.

use serde::Serialize;
use tracing::debug;

use super::{best_window, MatchConfig};

/// A page considered by the locator
#[derive(Debug, Clone)]
pub struct PageCandidate {
    /// 0-based page index
    pub index: usize,
    /// Extracted plain text
    pub text: String,
}

impl PageCandidate {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// Accepted page match
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// 0-based page index
    pub page_index: usize,
    /// Matched window text on that page
    pub window: String,
    /// Similarity of the window to the full snippet, 0-100
    pub score: f64,
}

/// Page indices searched for a target page, ascending
///
/// `target - radius ..= target + radius`, clamped to the document.
pub fn candidate_indices(target_page: usize, page_count: usize, radius: usize) -> Vec<usize> {
    if page_count == 0 {
        return Vec::new();
    }

    let low = target_page.saturating_sub(radius);
    let high = target_page.saturating_add(radius).min(page_count - 1);
    (low..=high).collect()
}

/// Find the best-matching page for `full_snippet`
///
/// Candidates are pulled lazily, so pages after an early-exit hit are never
/// produced. On equal scores the page closer to `target_page` wins; the
/// earlier page wins if the distance is equal too. Returns `None` if the
/// best score stays below `accept_score`.
pub fn locate<I>(
    candidates: I,
    full_snippet: &str,
    target_page: usize,
    config: &MatchConfig,
) -> Option<MatchResult>
where
    I: IntoIterator<Item = PageCandidate>,
{
    if full_snippet.trim().is_empty() {
        debug!("Empty snippet, nothing to locate");
        return None;
    }

    let mut best: Option<MatchResult> = None;

    for candidate in candidates {
        let Some(window) = best_window(&candidate.text, full_snippet, config) else {
            debug!(page = candidate.index, "No window fits page");
            continue;
        };
        debug!(page = candidate.index, score = window.score, "Best window on page");

        let replaces = match &best {
            None => true,
            Some(current) => {
                window.score > current.score
                    || (window.score == current.score
                        && candidate.index.abs_diff(target_page)
                            < current.page_index.abs_diff(target_page))
            }
        };

        if replaces {
            best = Some(MatchResult {
                page_index: candidate.index,
                window: window.text,
                score: window.score,
            });
        }

        if best
            .as_ref()
            .is_some_and(|b| b.score >= config.early_exit_score)
        {
            debug!(page = candidate.index, "Early exit on page match");
            break;
        }
    }

    match best {
        Some(result) if result.score >= config.accept_score => Some(result),
        Some(result) => {
            debug!(
                page = result.page_index,
                score = result.score,
                "Best page match below acceptance threshold"
            );
            None
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    const SNIPPET: &str = "the quarterly report shows strong growth";

    fn filler(n: usize) -> String {
        format!("page {n} lists the opening hours of the library and the rules for borrowing books")
    }

    #[test]
    fn test_candidate_indices() {
        assert_eq!(candidate_indices(5, 10, 1), vec![4, 5, 6]);
        assert_eq!(candidate_indices(0, 10, 1), vec![0, 1]);
        assert_eq!(candidate_indices(9, 10, 1), vec![8, 9]);
        assert_eq!(candidate_indices(3, 10, 0), vec![3]);
        assert_eq!(candidate_indices(0, 1, 2), vec![0]);
        assert!(candidate_indices(12, 10, 1).is_empty());
        assert!(candidate_indices(0, 0, 1).is_empty());
    }

    #[test]
    fn test_exact_match_short_circuits() {
        let config = MatchConfig::default();
        let pulled = Cell::new(0usize);
        let pages = [
            filler(4),
            format!("intro text {SNIPPET} in all regions"),
            filler(6),
        ];

        let candidates = candidate_indices(5, 10, 1).into_iter().map(|i| {
            pulled.set(pulled.get() + 1);
            PageCandidate::new(i, pages[i - 4].clone())
        });

        let result = locate(candidates, SNIPPET, 5, &config).unwrap();
        assert_eq!(result.page_index, 5);
        assert!(result.score >= 95.0);
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_best_page_kept_across_candidates() {
        let config = MatchConfig::default();
        let candidates = vec![
            PageCandidate::new(4, "the quarterly summary shows some growth"),
            PageCandidate::new(5, filler(5)),
            PageCandidate::new(6, "the quarterly report shows strong grow"),
        ];

        let result = locate(candidates, SNIPPET, 5, &config).unwrap();
        assert_eq!(result.page_index, 6);
    }

    #[test]
    fn test_no_match_below_threshold() {
        let config = MatchConfig::default();
        let candidates = vec![
            PageCandidate::new(4, filler(4)),
            PageCandidate::new(5, "completely unrelated words about gardening and the weather today"),
        ];

        assert!(locate(candidates, SNIPPET, 5, &config).is_none());
    }

    #[test]
    fn test_tie_prefers_page_closest_to_target() {
        let config = MatchConfig {
            early_exit_score: 101.0,
            ..MatchConfig::default()
        };
        let text = "the quarterly report shows strong growth";
        let candidates = vec![
            PageCandidate::new(3, text),
            PageCandidate::new(4, text),
            PageCandidate::new(5, text),
        ];

        let result = locate(candidates, SNIPPET, 4, &config).unwrap();
        assert_eq!(result.page_index, 4);
    }

    #[test]
    fn test_empty_snippet_is_no_match() {
        let config = MatchConfig::default();
        let candidates = vec![PageCandidate::new(0, "anything")];
        assert!(locate(candidates, "  ", 0, &config).is_none());
    }
}
