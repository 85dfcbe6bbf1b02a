//! Writing the annotated document to disk

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use lopdf::Document;
use tracing::debug;

use crate::highlight::Result;

/// Both paths name the same existing file
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Save `doc` to `output` as a full rewrite
///
/// Unreferenced objects are pruned first. When `output` is the file the
/// document was loaded from, the bytes go to a temporary file in the same
/// directory which then replaces the target in one rename. Any other
/// existing file at `output` is removed before writing.
pub(crate) fn write_document(doc: &mut Document, source: &Path, output: &Path) -> Result<()> {
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let pruned = doc.prune_objects();
    debug!(pruned = pruned.len(), "Pruned unreferenced objects");

    if same_file(source, output) {
        debug!(path = %output.display(), "Overwriting source through temporary file");
        let mut tmp = tempfile::Builder::new()
            .prefix(".highlight-")
            .suffix(".pdf")
            .tempfile_in(parent)?;
        doc.save_to(&mut tmp)?;
        tmp.as_file().sync_all()?;
        tmp.persist(output).map_err(|e| e.error)?;
    } else {
        if output.exists() {
            fs::remove_file(output)?;
        }
        let mut writer = BufWriter::new(fs::File::create(output)?);
        doc.save_to(&mut writer)?;
        writer.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_same_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.pdf");
        fs::write(&path, b"x").unwrap();

        assert!(same_file(&path, &dir.path().join(".").join("a.pdf")));
        assert!(!same_file(&path, &dir.path().join("b.pdf")));
    }
}
