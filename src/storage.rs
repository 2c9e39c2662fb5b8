//! Saving extracted text to disk
//!
//! Handles the "Save as…" path chosen through a dialog and the
//! dialog-less "Save to Documents" shortcut.

use chrono::Local;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name offered by the save dialog.
pub(crate) const DEFAULT_SAVE_NAME: &str = "converted.txt";

/// Default directory offered by the save dialog.
pub(crate) fn default_save_dir() -> Option<PathBuf> {
    dirs::document_dir()
}

/// Write text to `path`, appending a `.txt` extension if missing.
///
/// Returns the path actually written.
pub(crate) fn save_text(path: &Path, text: &str) -> Result<PathBuf, StorageError> {
    let path = ensure_txt_extension(path);

    let mut file = fs::File::create(&path).map_err(|e| StorageError::CreateFile {
        path: path.clone(),
        source: e,
    })?;
    file.write_all(text.as_bytes())
        .map_err(|e| StorageError::WriteFile {
            path: path.clone(),
            source: e,
        })?;
    file.flush().map_err(|e| StorageError::WriteFile {
        path: path.clone(),
        source: e,
    })?;

    info!("Saved text to {:?}", path);
    Ok(path)
}

/// Save a timestamped copy under the user's Documents folder without a
/// dialog.
pub(crate) fn quick_save(text: &str) -> Result<PathBuf, StorageError> {
    if text.trim().is_empty() {
        return Err(StorageError::EmptyText);
    }

    let dir = default_save_dir()
        .ok_or(StorageError::NoDocumentsDir)?
        .join("SnapText");
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| StorageError::CreateDirectory {
            path: dir.clone(),
            source: e,
        })?;
        info!("Created save directory: {:?}", dir);
    }

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let filename = format!("converted-{}.txt", timestamp);
    save_text(&dir.join(filename), text)
}

fn ensure_txt_extension(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("txt") => path.to_path_buf(),
        _ => {
            let mut with_ext = path.as_os_str().to_os_string();
            with_ext.push(".txt");
            PathBuf::from(with_ext)
        }
    }
}

/// Storage errors with contextual information
#[derive(Debug, thiserror::Error)]
pub(crate) enum StorageError {
    #[error("Could not find Documents directory")]
    NoDocumentsDir,

    #[error("Nothing to save (text is empty)")]
    EmptyText,

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {path}: {source}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write to file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_txt_extension() {
        let dir = TempDir::new().unwrap();

        let written = save_text(&dir.path().join("out"), "hello").unwrap();

        assert!(written.ends_with("out.txt"));
        assert_eq!(std::fs::read_to_string(written).unwrap(), "hello");
    }

    #[test]
    fn test_keeps_existing_txt_extension() {
        let dir = TempDir::new().unwrap();

        let written = save_text(&dir.path().join("note.txt"), "hi").unwrap();

        assert!(written.ends_with("note.txt"));
    }

    #[test]
    fn test_appends_to_other_extensions() {
        let dir = TempDir::new().unwrap();

        let written = save_text(&dir.path().join("page.png"), "hi").unwrap();

        assert!(written.ends_with("page.png.txt"));
    }

    #[test]
    fn test_quick_save_rejects_empty_text() {
        assert!(matches!(quick_save("  \n"), Err(StorageError::EmptyText)));
    }
}
