#![deny(clippy::all)]

mod app;
mod capture;
mod clipboard;
mod languages;
mod ocr;
mod selection;
mod settings;
mod storage;

use anyhow::Result;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize tracing for structured logging
    tracing_subscriber::fmt::init();

    // Restore the persisted language and theme selection
    let store = settings::SettingsStore::open_default();
    let state = selection::SelectionState::startup(store);

    // Probe the local Tesseract installation for selectable languages
    let available = match ocr::tessdata_dir() {
        Some(dir) => {
            info!("Using tessdata directory {:?}", dir);
            let files = languages::installed_data_files(&dir);
            languages::available_languages(&files)
        }
        None => {
            warn!("No tessdata directory found; the language menu will be empty");
            Vec::new()
        }
    };
    info!("{} OCR language(s) available", available.len());

    // Run the application event loop; the selection is flushed back to
    // the settings store when the window closes.
    app::run(state, available)
}
