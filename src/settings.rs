//! Persisted user settings
//!
//! Handles saving and loading the active OCR language and visual theme
//! to a small TOML file in the working directory. Failures never reach
//! the user: loading falls back to the defaults and saving is
//! best-effort.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use crate::selection::Selection;

/// Fixed relative path of the settings file.
pub(crate) const SETTINGS_FILE: &str = "settings.toml";

/// Default OCR language code.
pub(crate) const DEFAULT_LANG: &str = "eng";

/// Default OCR language display name.
pub(crate) const DEFAULT_LONG_NAME: &str = "English";

/// Light theme name, also the default.
pub(crate) const THEME_LIGHT: &str = "pulse";

/// Dark theme name.
pub(crate) const THEME_DARK: &str = "darkly";

/// On-disk layout: a single `[Settings]` section.
#[derive(Debug, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(rename = "Settings")]
    settings: PersistedSettings,
}

#[derive(Debug, Serialize, Deserialize)]
struct PersistedSettings {
    theme: String,
    lang: String,
    long_name: String,
}

/// Reads and writes the persisted selection record.
#[derive(Debug)]
pub(crate) struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by the fixed settings file in the working directory.
    pub(crate) fn open_default() -> Self {
        Self::new(SETTINGS_FILE)
    }

    /// Load the persisted selection.
    ///
    /// Never fails: a missing file is created with the defaults
    /// (best-effort), and any read or parse failure falls back to the
    /// defaults.
    pub(crate) fn load(&self) -> Selection {
        if !self.path.exists() {
            let defaults = Selection::default();
            if let Err(e) = self.try_save(&defaults) {
                error!("Failed to create settings file: {}", e);
            }
            return defaults;
        }

        match self.try_load() {
            Ok(selection) => selection,
            Err(e) => {
                error!("Failed to load settings, using defaults: {}", e);
                Selection::default()
            }
        }
    }

    /// Save the selection, swallowing any failure.
    ///
    /// A failed save must not prevent application shutdown; the next run
    /// simply falls back to the defaults.
    pub(crate) fn save(&self, selection: &Selection) {
        match self.try_save(selection) {
            Ok(()) => info!("Saved settings to {:?}", self.path),
            Err(e) => error!("Failed to save settings: {}", e),
        }
    }

    fn try_load(&self) -> Result<Selection, SettingsError> {
        let contents = fs::read_to_string(&self.path)?;
        let file: SettingsFile = toml::from_str(&contents)?;
        Ok(Selection::new(
            file.settings.lang,
            file.settings.long_name,
            file.settings.theme,
        ))
    }

    fn try_save(&self, selection: &Selection) -> Result<(), SettingsError> {
        let file = SettingsFile {
            settings: PersistedSettings {
                theme: selection.theme_name().to_string(),
                lang: selection.language_code().to_string(),
                long_name: selection.language_display_name().to_string(),
            },
        };
        let rendered = toml::to_string(&file)?;
        fs::write(&self.path, rendered)?;
        Ok(())
    }
}

/// Settings errors
#[derive(Debug, thiserror::Error)]
enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.path().join(SETTINGS_FILE))
    }

    #[test]
    fn test_load_creates_missing_file_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let selection = store.load();

        assert_eq!(selection, Selection::default());
        assert!(dir.path().join(SETTINGS_FILE).exists());
    }

    #[test]
    fn test_default_selection_values() {
        let selection = Selection::default();
        assert_eq!(selection.language_code(), "eng");
        assert_eq!(selection.language_display_name(), "English");
        assert_eq!(selection.theme_name(), "pulse");
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let selection = Selection::new("fra", "French", THEME_DARK);

        store.save(&selection);

        assert_eq!(store.load(), selection);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "not a settings file [").unwrap();

        let store = SettingsStore::new(&path);

        assert_eq!(store.load(), Selection::default());
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "[Settings]\ntheme = \"darkly\"\n").unwrap();

        let store = SettingsStore::new(&path);

        assert_eq!(store.load(), Selection::default());
    }

    #[test]
    fn test_save_writes_single_settings_section() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.save(&Selection::default());

        let contents = std::fs::read_to_string(dir.path().join(SETTINGS_FILE)).unwrap();
        assert!(contents.starts_with("[Settings]"));
        assert!(contents.contains("lang = \"eng\""));
        assert!(contents.contains("long_name = \"English\""));
        assert!(contents.contains("theme = \"pulse\""));
    }
}
