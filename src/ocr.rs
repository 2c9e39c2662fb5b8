//! Tesseract OCR invocation
//!
//! Shells out to the external `tesseract` binary. The binary location
//! and the tessdata directory are discovered once; recognition itself
//! is a synchronous subprocess call.

use image::RgbaImage;
use once_cell::sync::Lazy;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Environment variable overriding the Tesseract binary location.
const TESSERACT_CMD_ENV: &str = "TESSERACT_CMD";

/// Environment variable Tesseract itself honors for its data directory.
const TESSDATA_PREFIX_ENV: &str = "TESSDATA_PREFIX";

/// Conventional Windows install location of the Tesseract binary.
#[cfg(windows)]
const WINDOWS_TESSERACT: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";

static TESSERACT_CMD: Lazy<PathBuf> = Lazy::new(resolve_tesseract_cmd);

fn resolve_tesseract_cmd() -> PathBuf {
    if let Ok(custom) = std::env::var(TESSERACT_CMD_ENV) {
        if !custom.is_empty() {
            return PathBuf::from(custom);
        }
    }

    #[cfg(windows)]
    {
        let installed = PathBuf::from(WINDOWS_TESSERACT);
        if installed.exists() {
            return installed;
        }
    }

    // Fall back to whatever is on PATH.
    PathBuf::from("tesseract")
}

/// Locate the Tesseract language data directory, if any.
pub(crate) fn tessdata_dir() -> Option<PathBuf> {
    if let Ok(prefix) = std::env::var(TESSDATA_PREFIX_ENV) {
        if !prefix.is_empty() {
            return Some(PathBuf::from(prefix));
        }
    }

    let candidates: &[&str] = if cfg!(windows) {
        &[r"C:\Program Files\Tesseract-OCR\tessdata"]
    } else {
        &[
            "/usr/share/tesseract-ocr/5/tessdata",
            "/usr/share/tesseract-ocr/4.00/tessdata",
            "/usr/share/tessdata",
            "/usr/local/share/tessdata",
            "/opt/homebrew/share/tessdata",
        ]
    };

    candidates.iter().map(PathBuf::from).find(|p| p.is_dir())
}

/// Run OCR on an image file and return the recognized text.
pub(crate) fn image_to_text(image_path: &Path, lang: &str) -> Result<String, OcrError> {
    info!("Running OCR on {:?} with language '{}'", image_path, lang);

    let output = Command::new(&*TESSERACT_CMD)
        .arg(image_path)
        .arg("stdout")
        .arg("-l")
        .arg(lang)
        .output()
        .map_err(OcrError::Spawn)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(OcrError::Engine {
            status: output.status,
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run OCR on an in-memory clipboard image.
///
/// The image is written to a scratch PNG so it can go through the same
/// subprocess path as opened files.
pub(crate) fn clipboard_image_to_text(image: &RgbaImage, lang: &str) -> Result<String, OcrError> {
    let scratch = tempfile::Builder::new()
        .prefix("snaptext-")
        .suffix(".png")
        .tempfile()?;
    image.save_with_format(scratch.path(), image::ImageFormat::Png)?;

    image_to_text(scratch.path(), lang)
}

/// OCR errors
#[derive(Debug, thiserror::Error)]
pub(crate) enum OcrError {
    #[error("Failed to run Tesseract (is it installed?): {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Tesseract exited with {status}: {stderr}")]
    Engine {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Failed to encode clipboard image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
