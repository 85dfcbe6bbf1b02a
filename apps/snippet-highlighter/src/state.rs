//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::service::HighlightService;
use crate::source::SourceResolver;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    highlighter: HighlightService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let resolver = SourceResolver::new(
            config.storage.highlighted_dir.clone(),
            config.storage.import_dir.clone(),
        );
        let highlighter =
            HighlightService::new(resolver, config.matching.clone(), config.worker.timeout());

        Self {
            inner: Arc::new(AppStateInner {
                config,
                highlighter,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the highlight service
    pub fn highlighter(&self) -> &HighlightService {
        &self.inner.highlighter
    }
}
