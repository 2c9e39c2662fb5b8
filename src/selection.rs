//! Active language and theme selection
//!
//! A single `SelectionState` is created at startup from the settings
//! store, mutated by the menu handlers, and flushed back to the store
//! when the window closes.

use tracing::info;

use crate::languages;
use crate::settings::{SettingsStore, DEFAULT_LANG, DEFAULT_LONG_NAME, THEME_LIGHT};

/// The currently active OCR language and visual theme.
///
/// `language_display_name` is always the catalog's name for
/// `language_code`; the two fields are only ever written together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Selection {
    language_code: String,
    language_display_name: String,
    theme_name: String,
}

impl Selection {
    pub(crate) fn new(
        language_code: impl Into<String>,
        language_display_name: impl Into<String>,
        theme_name: impl Into<String>,
    ) -> Self {
        Self {
            language_code: language_code.into(),
            language_display_name: language_display_name.into(),
            theme_name: theme_name.into(),
        }
    }

    pub(crate) fn language_code(&self) -> &str {
        &self.language_code
    }

    pub(crate) fn language_display_name(&self) -> &str {
        &self.language_display_name
    }

    pub(crate) fn theme_name(&self) -> &str {
        &self.theme_name
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(DEFAULT_LANG, DEFAULT_LONG_NAME, THEME_LIGHT)
    }
}

/// Process-wide selection state, owned by the application controller.
#[derive(Debug)]
pub(crate) struct SelectionState {
    current: Selection,
    store: SettingsStore,
}

impl SelectionState {
    /// Load the persisted selection and enter the active state.
    pub(crate) fn startup(store: SettingsStore) -> Self {
        let current = store.load();
        info!(
            "Starting with language '{}' ({}) and theme '{}'",
            current.language_code, current.language_display_name, current.theme_name
        );
        Self { current, store }
    }

    /// Snapshot of the current selection.
    pub(crate) fn current(&self) -> &Selection {
        &self.current
    }

    /// Switch the active OCR language.
    ///
    /// `display_name` must be the catalog's name for `code`; callers
    /// source both from the same catalog entry.
    pub(crate) fn set_language(&mut self, code: &str, display_name: &str) {
        debug_assert!(
            match languages::display_name(code) {
                Some(name) => name == display_name,
                None => true,
            },
            "display name '{display_name}' does not match catalog entry for '{code}'"
        );
        self.current.language_code = code.to_string();
        self.current.language_display_name = display_name.to_string();
        info!("OCR language set to '{}' ({})", code, display_name);
    }

    /// Switch the active visual theme.
    pub(crate) fn set_theme(&mut self, theme_name: &str) {
        self.current.theme_name = theme_name.to_string();
        info!("Theme set to '{}'", theme_name);
    }

    /// Write the current selection to the settings store.
    ///
    /// Idempotent; save failures are swallowed by the store.
    pub(crate) fn flush_to_store(&self) {
        self.store.save(&self.current);
    }

    /// Final flush before the window is destroyed.
    pub(crate) fn shutdown(&self) {
        self.flush_to_store();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SETTINGS_FILE, THEME_DARK};
    use tempfile::TempDir;

    fn state_in(dir: &TempDir) -> SelectionState {
        SelectionState::startup(SettingsStore::new(dir.path().join(SETTINGS_FILE)))
    }

    #[test]
    fn test_startup_uses_defaults_without_settings() {
        let dir = TempDir::new().unwrap();
        let state = state_in(&dir);
        assert_eq!(state.current(), &Selection::default());
    }

    #[test]
    fn test_set_language_updates_code_and_name_together() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);

        state.set_language("fra", "French");

        assert_eq!(state.current().language_code(), "fra");
        assert_eq!(state.current().language_display_name(), "French");
    }

    #[test]
    fn test_set_theme_leaves_language_untouched() {
        let dir = TempDir::new().unwrap();
        let mut state = state_in(&dir);

        state.set_theme(THEME_DARK);

        assert_eq!(state.current().theme_name(), THEME_DARK);
        assert_eq!(state.current().language_code(), "eng");
        assert_eq!(state.current().language_display_name(), "English");
    }

    #[test]
    fn test_flush_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let mut state = SelectionState::startup(SettingsStore::new(&path));
        state.set_language("deu", "German");

        state.flush_to_store();
        let first = std::fs::read_to_string(&path).unwrap();
        state.flush_to_store();
        let second = std::fs::read_to_string(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_startup_restores_persisted_selection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        {
            let mut state = SelectionState::startup(SettingsStore::new(&path));
            state.set_language("jpn", "Japanese");
            state.set_theme(THEME_DARK);
            state.shutdown();
        }

        let restored = SelectionState::startup(SettingsStore::new(&path));

        assert_eq!(
            restored.current(),
            &Selection::new("jpn", "Japanese", THEME_DARK)
        );
    }
}
