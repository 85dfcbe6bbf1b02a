//! Per-output-path write serialization

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of one async mutex per output path
///
/// Guards are owned, so they can move into a blocking task and stay held
/// until the write finished, even if the caller stopped waiting.
#[derive(Default)]
pub struct PathLocks {
    locks: Mutex<HashMap<PathBuf, Arc<AsyncMutex<()>>>>,
}

impl PathLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `path`
    ///
    /// Different spellings of one file (relative, `./`, `..`, symlinked
    /// parent) share a lock as long as the parent directory exists.
    pub async fn acquire(&self, path: &Path) -> OwnedMutexGuard<()> {
        let key = lock_key(path);
        let lock = {
            let mut locks = self.locks.lock();
            // Drop entries nobody holds or waits on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of paths currently tracked
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Canonical parent directory joined with the file name
///
/// Falls back to the absolute, uncanonicalized path while the parent does
/// not exist yet.
fn lock_key(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()),
    }
}
