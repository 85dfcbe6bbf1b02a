//! Highlight Service
//!
//! Async front of the blocking highlighter. Every call runs on the blocking
//! thread pool under a wall-clock timeout, and calls writing the same output
//! path run one at a time. Resetting the highlighted directory waits for
//! every running call and holds new ones back until it is done.

mod locks;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{info, warn};

use crate::highlight::{find_and_highlight, HighlightError, HighlightOutcome, Result};
use crate::matching::MatchConfig;
use crate::source::SourceResolver;

pub use locks::PathLocks;

/// Default wall-clock limit for one highlight call
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// One highlight call
#[derive(Debug, Clone)]
pub struct HighlightRequest {
    /// Relative path of the document, see [`SourceResolver`]
    pub identifier: String,
    pub snippet: String,
    /// 0-based target page
    pub page: usize,
    /// Output path; the conventional highlighted location when `None`
    pub output: Option<PathBuf>,
}

/// A snippet returned by retrieval, with its source metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetrievedDocument {
    pub file_path: String,
    pub content: String,
    /// Page the snippet was indexed on, used as the 0-based target page
    pub page_number: usize,
}

/// Result for one document of a batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub file_path: String,
    pub page_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<HighlightOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct HighlightService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    resolver: SourceResolver,
    config: MatchConfig,
    timeout: Duration,
    locks: PathLocks,
    /// Held for read by every highlight worker, for write by a reset
    reset_gate: Arc<RwLock<()>>,
}

impl HighlightService {
    pub fn new(resolver: SourceResolver, config: MatchConfig, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(ServiceInner {
                resolver,
                config,
                timeout,
                locks: PathLocks::new(),
                reset_gate: Arc::new(RwLock::new(())),
            }),
        }
    }

    pub fn resolver(&self) -> &SourceResolver {
        &self.inner.resolver
    }

    pub fn match_config(&self) -> &MatchConfig {
        &self.inner.config
    }

    /// Highlight one snippet
    ///
    /// An expired timeout yields [`HighlightOutcome::TimedOut`]. The worker
    /// keeps the output path locked until it actually finishes.
    pub async fn highlight(&self, request: HighlightRequest) -> Result<HighlightOutcome> {
        let output = match request.output {
            Some(output) => output,
            None => self.inner.resolver.output_path(&request.identifier)?,
        };

        let gate = Arc::clone(&self.inner.reset_gate).read_owned().await;
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let guard = self.inner.locks.acquire(&output).await;
        let inner = Arc::clone(&self.inner);
        let task_output = output.clone();
        let identifier = request.identifier.clone();

        let task = tokio::task::spawn_blocking(move || {
            let _guards = (gate, guard);
            find_and_highlight(
                &inner.resolver,
                &request.identifier,
                &request.snippet,
                request.page,
                &task_output,
                &inner.config,
            )
        });

        match timeout(self.inner.timeout, task).await {
            Ok(joined) => joined.map_err(|e| HighlightError::Join(e.to_string()))?,
            Err(_) => {
                warn!(
                    identifier = %identifier,
                    output = %output.display(),
                    timeout_secs = self.inner.timeout.as_secs(),
                    "Highlight timed out"
                );
                Ok(HighlightOutcome::TimedOut)
            }
        }
    }

    /// Highlight every retrieved document into its conventional output path
    ///
    /// With `reset`, earlier highlighted copies are removed first so each
    /// batch starts from the imported originals. Errors tied to a single
    /// document are recorded in its entry; I/O errors abort the batch.
    pub async fn highlight_batch(
        &self,
        documents: Vec<RetrievedDocument>,
        reset: bool,
    ) -> Result<Vec<BatchEntry>> {
        if reset {
            let _gate = self.inner.reset_gate.write().await;
            let resolver = self.inner.resolver.clone();
            tokio::task::spawn_blocking(move || resolver.reset_highlighted_dir())
                .await
                .map_err(|e| HighlightError::Join(e.to_string()))??;
        }

        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            let request = HighlightRequest {
                identifier: document.file_path.clone(),
                snippet: document.content,
                page: document.page_number,
                output: None,
            };

            let (outcome, error) = match self.highlight(request).await {
                Ok(outcome) => (Some(outcome), None),
                Err(e) if e.is_recoverable() => {
                    warn!(file_path = %document.file_path, error = %e, "Skipping document");
                    (None, Some(e.to_string()))
                }
                Err(e) => return Err(e),
            };

            entries.push(BatchEntry {
                file_path: document.file_path,
                page_number: document.page_number,
                outcome,
                error,
            });
        }

        let highlighted = entries
            .iter()
            .filter(|e| e.outcome.as_ref().is_some_and(HighlightOutcome::is_highlighted))
            .count();
        info!(documents = entries.len(), highlighted, "Batch highlight finished");

        Ok(entries)
    }
}
