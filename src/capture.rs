//! Screen capture launcher
//!
//! Hands off to the OS snipping overlay; the captured image comes back
//! through the clipboard once the user finishes the snip.

use thiserror::Error;

/// Whether the current platform has a snipping overlay to launch.
pub(crate) const SUPPORTED: bool = cfg!(windows);

/// Launch the OS snipping overlay.
#[cfg(windows)]
pub(crate) fn launch_snipping_tool() -> Result<(), CaptureError> {
    use std::process::Command;
    use tracing::info;

    info!("Launching snipping overlay");
    // explorer reports a nonzero status even when the overlay opens;
    // only spawn failures count as errors.
    let _ = Command::new("explorer")
        .arg("ms-screenclip:")
        .status()
        .map_err(CaptureError::Spawn)?;
    Ok(())
}

/// Launch the OS snipping overlay.
#[cfg(not(windows))]
pub(crate) fn launch_snipping_tool() -> Result<(), CaptureError> {
    Err(CaptureError::Unsupported)
}

/// Capture errors
#[derive(Debug, Error)]
#[allow(dead_code)]
pub(crate) enum CaptureError {
    #[error("Failed to launch snipping overlay: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("Screen capture is not supported on this platform")]
    Unsupported,
}

#[cfg(all(test, not(windows)))]
mod tests {
    use super::*;

    #[test]
    fn test_capture_unsupported_off_windows() {
        assert!(!SUPPORTED);
        assert!(matches!(
            launch_snipping_tool(),
            Err(CaptureError::Unsupported)
        ));
    }
}
