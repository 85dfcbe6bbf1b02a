//! Configuration management for the snippet highlighter

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::matching::MatchConfig;
use crate::service::DEFAULT_TIMEOUT_SECS;
use crate::source::{DEFAULT_HIGHLIGHTED_DIR, DEFAULT_IMPORT_DIR};

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub matching: MatchConfig,
    pub worker: WorkerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where documents are read from and highlighted copies written to
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub highlighted_dir: PathBuf,
    pub import_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Wall-clock limit for one highlight call
    pub timeout_secs: u64,
}

impl WorkerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            storage: StorageConfig {
                highlighted_dir: PathBuf::from(DEFAULT_HIGHLIGHTED_DIR),
                import_dir: PathBuf::from(DEFAULT_IMPORT_DIR),
            },
            matching: MatchConfig::default(),
            worker: WorkerConfig {
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            },
        }
    }
}

/// Parse `name` from `lookup`, falling back to `default` when unset or invalid
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", name, raw);
            default
        }),
        None => default,
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the configuration through `lookup`, defaults for missing keys
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let matching = defaults.matching;

        Config {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var(&lookup, "SERVER_PORT", defaults.server.port),
            },
            storage: StorageConfig {
                highlighted_dir: lookup("HIGHLIGHTED_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.highlighted_dir),
                import_dir: lookup("IMPORT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.storage.import_dir),
            },
            matching: MatchConfig {
                window_margin: parse_var(&lookup, "MATCH_WINDOW_MARGIN", matching.window_margin),
                early_exit_score: parse_var(
                    &lookup,
                    "MATCH_EARLY_EXIT_SCORE",
                    matching.early_exit_score,
                ),
                accept_score: parse_var(&lookup, "MATCH_ACCEPT_SCORE", matching.accept_score),
                containment_score: parse_var(
                    &lookup,
                    "MATCH_CONTAINMENT_SCORE",
                    matching.containment_score,
                ),
                ..matching
            },
            worker: WorkerConfig {
                timeout_secs: parse_var(
                    &lookup,
                    "HIGHLIGHT_TIMEOUT_SECS",
                    defaults.worker.timeout_secs,
                ),
            },
        }
    }
}
