//! System clipboard access
//!
//! Fetches images for clipboard OCR and puts extracted text back on the
//! clipboard for "Copy all".

use arboard::Clipboard;
use image::RgbaImage;
use tracing::{error, info};

/// Copy text to the clipboard.
///
/// Empty text is skipped; failures are logged and swallowed.
pub(crate) fn set_text(text: &str) {
    if text.trim().is_empty() {
        info!("No text to copy (empty)");
        return;
    }

    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => info!("Copied {} chars to clipboard", text.len()),
            Err(e) => error!("Failed to copy text to clipboard: {}", e),
        },
        Err(e) => error!("Failed to initialize clipboard: {}", e),
    }
}

/// Fetch an image from the clipboard, if one is present.
///
/// A clipboard holding no image is `Ok(None)`, not an error.
pub(crate) fn grab_image() -> Result<Option<RgbaImage>, ClipboardError> {
    let mut clipboard = Clipboard::new().map_err(ClipboardError::Access)?;

    let data = match clipboard.get_image() {
        Ok(data) => data,
        Err(arboard::Error::ContentNotAvailable) => return Ok(None),
        Err(e) => return Err(ClipboardError::Access(e)),
    };

    let (width, height) = (data.width as u32, data.height as u32);
    let image = RgbaImage::from_raw(width, height, data.bytes.into_owned())
        .ok_or(ClipboardError::MalformedImage)?;

    Ok(Some(image))
}

/// Clipboard errors
#[derive(Debug, thiserror::Error)]
pub(crate) enum ClipboardError {
    #[error("Unable to access clipboard: {0}")]
    Access(#[source] arboard::Error),

    #[error("Clipboard image data is malformed")]
    MalformedImage,
}
