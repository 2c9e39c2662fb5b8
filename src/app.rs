//! Application window
//!
//! Menu bar, action buttons, and the editable text area holding the
//! OCR result. All selection mutations happen here, on the UI thread,
//! against the `SelectionState` owned by the app.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use eframe::egui;
use tracing::{error, info};

use crate::capture;
use crate::clipboard;
use crate::languages::Language;
use crate::ocr;
use crate::selection::SelectionState;
use crate::settings::{THEME_DARK, THEME_LIGHT};
use crate::storage;

const APP_TITLE: &str = "SnapText";

/// Minimum time after launching the snipping overlay before regained
/// focus is treated as the capture finishing.
const CAPTURE_GRACE: Duration = Duration::from_secs(1);

pub(crate) struct SnapTextApp {
    state: SelectionState,
    available: Vec<Language>,
    text: String,
    capture_started: Option<Instant>,
}

/// Open the application window and run the event loop until close.
pub(crate) fn run(state: SelectionState, available: Vec<Language>) -> Result<()> {
    let visuals = visuals_for(state.current().theme_name());
    let app = SnapTextApp {
        state,
        available,
        text: String::new(),
        capture_started: None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([900.0, 500.0])
            .with_min_inner_size([450.0, 250.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(visuals);
            Box::new(app)
        }),
    )
    .map_err(|err| anyhow!("failed to launch window: {err}"))
}

fn visuals_for(theme_name: &str) -> egui::Visuals {
    if theme_name == THEME_DARK {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    }
}

impl SnapTextApp {
    fn file_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("File", |ui| {
            if ui.button("Open image…").clicked() {
                ui.close_menu();
                self.open_image_dialog();
            }
            if ui.button("Save as…").clicked() {
                ui.close_menu();
                self.save_as_dialog();
            }
            if ui.button("Save to Documents").clicked() {
                ui.close_menu();
                match storage::quick_save(&self.text) {
                    Ok(path) => info!("Saved copy to {:?}", path),
                    Err(e) => error!("Failed to save copy: {}", e),
                }
            }
            ui.separator();
            if ui.button("Exit").clicked() {
                ui.close_menu();
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });
    }

    fn view_menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.menu_button("View", |ui| {
            if ui.button("Dark mode").clicked() {
                ui.close_menu();
                self.apply_theme(ctx, THEME_DARK);
            }
            if ui.button("Light mode").clicked() {
                ui.close_menu();
                self.apply_theme(ctx, THEME_LIGHT);
            }
        });
    }

    fn language_menu(&mut self, ui: &mut egui::Ui) {
        ui.menu_button("OCR Language", |ui| {
            if self.available.is_empty() {
                ui.label("No language data found");
                return;
            }

            let mut chosen: Option<Language> = None;
            for lang in &self.available {
                let active = self.state.current().language_code() == lang.code;
                if ui.selectable_label(active, lang.display_name).clicked() {
                    chosen = Some(*lang);
                    ui.close_menu();
                }
            }
            if let Some(lang) = chosen {
                self.state.set_language(lang.code, lang.display_name);
            }
        });
    }

    fn apply_theme(&mut self, ctx: &egui::Context, theme_name: &str) {
        self.state.set_theme(theme_name);
        ctx.set_visuals(visuals_for(theme_name));
    }

    fn open_image_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter(
                "Image files",
                &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff"],
            )
            .pick_file()
        else {
            return;
        };
        self.run_ocr_on_file(&path);
    }

    fn run_ocr_on_file(&mut self, path: &Path) {
        match ocr::image_to_text(path, self.state.current().language_code()) {
            Ok(text) => self.text = text,
            Err(e) => {
                error!("OCR failed: {}", e);
                self.text = format!("Error: {e}");
            }
        }
    }

    fn paste_clipboard(&mut self) {
        match clipboard::grab_image() {
            Ok(Some(image)) => {
                match ocr::clipboard_image_to_text(&image, self.state.current().language_code()) {
                    Ok(text) => self.text = text,
                    Err(e) => {
                        error!("OCR failed on clipboard image: {}", e);
                        self.text = format!("Error: {e}");
                    }
                }
            }
            Ok(None) => self.text = "No image in clipboard".to_string(),
            Err(e) => {
                error!("Clipboard read failed: {}", e);
                self.text = format!("Error: {e}");
            }
        }
    }

    fn save_as_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .set_file_name(storage::DEFAULT_SAVE_NAME)
            .add_filter("Text files", &["txt"]);
        if let Some(dir) = storage::default_save_dir() {
            dialog = dialog.set_directory(dir);
        }

        let Some(path) = dialog.save_file() else {
            info!("Save cancelled by user");
            return;
        };
        match storage::save_text(&path, &self.text) {
            Ok(path) => info!("Text saved to {:?}", path),
            Err(e) => error!("Failed to save text: {}", e),
        }
    }

    fn capture_screen(&mut self, ctx: &egui::Context) {
        match capture::launch_snipping_tool() {
            Ok(()) => {
                self.capture_started = Some(Instant::now());
                ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
            }
            Err(e) => {
                error!("Screen capture failed: {}", e);
                self.text = format!("Error: {e}");
            }
        }
    }

    /// Once the window regains focus after a capture, the snip is on the
    /// clipboard; pick it up and OCR it.
    fn poll_capture(&mut self, ctx: &egui::Context) {
        let Some(started) = self.capture_started else {
            return;
        };
        if started.elapsed() < CAPTURE_GRACE {
            ctx.request_repaint_after(CAPTURE_GRACE);
            return;
        }

        if ctx.input(|i| i.raw.focused) {
            self.capture_started = None;
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(false));
            self.paste_clipboard();
        } else {
            ctx.request_repaint_after(Duration::from_millis(500));
        }
    }
}

impl eframe::App for SnapTextApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_capture(ctx);

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                self.file_menu(ui, ctx);
                self.view_menu(ui, ctx);
                self.language_menu(ui);
            });
        });

        egui::TopBottomPanel::top("actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open image").clicked() {
                    self.open_image_dialog();
                }
                if ui.button("Paste clipboard").clicked() {
                    self.paste_clipboard();
                }
                let capture_btn = ui.add_enabled(capture::SUPPORTED, egui::Button::new("Capture"));
                if capture_btn.clicked() {
                    self.capture_screen(ctx);
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    self.text.clear();
                }
                if ui.button("Copy all").clicked() {
                    clipboard::set_text(&self.text);
                }
                ui.label(format!(
                    "Language: {}",
                    self.state.current().language_display_name()
                ));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(&mut self.text),
                );
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
