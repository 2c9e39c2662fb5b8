//! OCR language catalog and availability probing
//!
//! The catalog is a fixed table of every language Tesseract publishes a
//! traineddata pack for; which of those are selectable on this machine
//! is decided by listing the local tessdata directory.

mod catalog;

use std::fs;
use std::path::Path;
use tracing::warn;

/// A selectable OCR language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Language {
    pub(crate) code: &'static str,
    pub(crate) display_name: &'static str,
}

/// Look up the catalog display name for a language code.
pub(crate) fn display_name(code: &str) -> Option<&'static str> {
    catalog::CATALOG
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}

/// List the file names in the Tesseract data directory.
///
/// A missing or unreadable directory yields an empty list rather than
/// an error; the language menu is then simply empty.
pub(crate) fn installed_data_files(dir: &Path) -> Vec<String> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Could not read tessdata directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect()
}

/// Filter the catalog down to languages with an installed data file.
///
/// A catalog entry is available when any installed file name starts
/// with its code; the result keeps catalog order. The match is a prefix
/// test, not an exact one: `aze` counts as available when only
/// `aze_cyrl.traineddata` is installed.
pub(crate) fn available_languages(installed: &[String]) -> Vec<Language> {
    catalog::CATALOG
        .iter()
        .filter(|&&(code, _)| installed.iter().any(|file| file.starts_with(code)))
        .map(|&(code, display_name)| Language { code, display_name })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn codes(languages: &[Language]) -> Vec<&'static str> {
        languages.iter().map(|lang| lang.code).collect()
    }

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(display_name("eng"), Some("English"));
        assert_eq!(display_name("fra"), Some("French"));
        assert_eq!(display_name("xyz"), None);
    }

    #[test]
    fn test_filters_catalog_by_installed_files() {
        let installed = vec!["eng.traineddata".to_string()];

        let available = available_languages(&installed);

        assert_eq!(codes(&available), ["eng"]);
        assert_eq!(available[0].display_name, "English");
    }

    #[test]
    fn test_prefix_match_reports_both_azerbaijani_entries() {
        let installed = vec!["aze_cyrl.traineddata".to_string()];

        let available = available_languages(&installed);

        assert_eq!(codes(&available), ["aze", "aze_cyrl"]);
    }

    #[test]
    fn test_result_keeps_catalog_order() {
        let installed = vec![
            "fra.traineddata".to_string(),
            "eng.traineddata".to_string(),
            "deu.traineddata".to_string(),
        ];

        let available = available_languages(&installed);

        assert_eq!(codes(&available), ["deu", "eng", "fra"]);
    }

    #[test]
    fn test_no_installed_files_yields_empty_result() {
        assert!(available_languages(&[]).is_empty());
    }

    #[test]
    fn test_missing_directory_yields_no_files() {
        let dir = TempDir::new().unwrap();
        assert!(installed_data_files(&dir.path().join("missing")).is_empty());
    }

    #[test]
    fn test_lists_directory_file_names() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("eng.traineddata"), b"").unwrap();
        std::fs::write(dir.path().join("osd.traineddata"), b"").unwrap();

        let mut files = installed_data_files(dir.path());
        files.sort();

        assert_eq!(files, ["eng.traineddata", "osd.traineddata"]);
    }
}
