//! Source Document Resolution
//!
//! Maps a document identifier (a relative file path such as
//! `beleid/Normen en Waarden.pdf`) to the PDF to read and the path to write.
//! A previously highlighted copy is preferred over the imported original so
//! that repeated highlights on one document accumulate.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::highlight::{HighlightError, Result};

/// Default directory of highlighted copies
pub const DEFAULT_HIGHLIGHTED_DIR: &str = "output/highlighted";
/// Default directory of imported originals
pub const DEFAULT_IMPORT_DIR: &str = "documenten-import";

#[derive(Debug, Clone)]
pub struct SourceResolver {
    highlighted_dir: PathBuf,
    import_dir: PathBuf,
}

impl Default for SourceResolver {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHTED_DIR, DEFAULT_IMPORT_DIR)
    }
}

impl SourceResolver {
    pub fn new(highlighted_dir: impl Into<PathBuf>, import_dir: impl Into<PathBuf>) -> Self {
        Self {
            highlighted_dir: highlighted_dir.into(),
            import_dir: import_dir.into(),
        }
    }

    pub fn highlighted_dir(&self) -> &Path {
        &self.highlighted_dir
    }

    pub fn import_dir(&self) -> &Path {
        &self.import_dir
    }

    /// Accept only non-empty relative paths without `..`
    fn validate(identifier: &str) -> Result<&Path> {
        let path = Path::new(identifier);
        let relative = path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if identifier.trim().is_empty() || !relative {
            return Err(HighlightError::InvalidIdentifier(identifier.to_string()));
        }
        Ok(path)
    }

    /// Path of the PDF to read: highlighted copy first, then the import
    pub fn resolve(&self, identifier: &str) -> Result<PathBuf> {
        let relative = Self::validate(identifier)?;

        let highlighted = self.highlighted_dir.join(relative);
        if highlighted.is_file() {
            debug!(path = %highlighted.display(), "Using existing highlighted file");
            return Ok(highlighted);
        }

        let imported = self.import_dir.join(relative);
        if imported.is_file() {
            debug!(path = %imported.display(), "Using original input file");
            return Ok(imported);
        }

        Err(HighlightError::NotFound(identifier.to_string()))
    }

    /// Conventional output path of a document's highlighted copy
    pub fn output_path(&self, identifier: &str) -> Result<PathBuf> {
        Ok(self.highlighted_dir.join(Self::validate(identifier)?))
    }

    /// Remove all highlighted copies and recreate the empty directory
    pub fn reset_highlighted_dir(&self) -> Result<()> {
        match fs::remove_dir_all(&self.highlighted_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        fs::create_dir_all(&self.highlighted_dir)?;
        debug!(path = %self.highlighted_dir.display(), "Reset highlighted directory");
        Ok(())
    }
}
