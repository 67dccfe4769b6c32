// src/infrastructure/export.rs
use crate::application::ExportedDocument;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

/// Save an exported document into `dir`, replacing any file of the same name.
///
/// The bytes are staged in `dir` and moved into place in one rename.
pub fn save_document(dir: impl AsRef<Path>, document: &ExportedDocument) -> Result<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let mut staging = NamedTempFile::new_in(dir).context("Failed to create temporary export file")?;
    staging
        .write_all(&document.bytes)
        .context("Failed to write exported document")?;

    let target = dir.join(&document.file_name);
    staging
        .persist(&target)
        .with_context(|| format!("Failed to move export into place at {}", target.display()))?;

    info!(path = %target.display(), size = document.bytes.len(), "Saved export");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn document(name: &str, bytes: &[u8]) -> ExportedDocument {
        ExportedDocument {
            file_name: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn given_document_when_saving_then_writes_bytes_under_file_name() {
        let temp_dir = TempDir::new().unwrap();

        let path = save_document(temp_dir.path(), &document("Weekend Plans.pdf", b"%PDF-1.4")).unwrap();

        assert_eq!(path, temp_dir.path().join("Weekend Plans.pdf"));
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn given_existing_file_when_saving_then_replaces_it() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("note.pdf"), b"old").unwrap();

        let path = save_document(temp_dir.path(), &document("note.pdf", b"new")).unwrap();

        assert_eq!(fs::read(path).unwrap(), b"new");
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn given_missing_directory_when_saving_then_creates_it() {
        let temp_dir = TempDir::new().unwrap();
        let target_dir = temp_dir.path().join("exports").join("2026");

        let path = save_document(&target_dir, &document("a.pdf", b"x")).unwrap();

        assert!(path.exists());
    }
}
