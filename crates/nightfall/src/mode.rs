//! Color mode detection.
//!
//! The engine only converts when the page is shown in dark mode. The mode is
//! either forced through [`Config::mode`](crate::Config::mode) or detected from
//! the OS preference.
//!
//! Use [`set_mode_detector`] to override detection for testing:
//!
//! ```rust
//! use nightfall::{detect_color_mode, set_mode_detector, ColorMode};
//!
//! set_mode_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! ```

use dark_light::{detect as detect_os_mode, Mode as OsMode};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// The preferred color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

type ModeDetector = fn() -> ColorMode;

static MODE_DETECTOR: Lazy<Mutex<ModeDetector>> = Lazy::new(|| Mutex::new(os_mode_detector));

/// Overrides the detector used when the mode is not forced.
pub fn set_mode_detector(detector: ModeDetector) {
    let mut guard = MODE_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    *guard = detector;
}

/// Restores OS-based detection.
pub fn reset_mode_detector() {
    set_mode_detector(os_mode_detector);
}

/// Detects the preferred color mode.
///
/// Uses the `dark-light` crate unless overridden with [`set_mode_detector`].
/// An unspecified or unreadable OS preference counts as light.
pub fn detect_color_mode() -> ColorMode {
    // Copy the detector out so it runs without holding the lock.
    let detector = *MODE_DETECTOR.lock().unwrap_or_else(|e| e.into_inner());
    detector()
}

fn os_mode_detector() -> ColorMode {
    match detect_os_mode() {
        Ok(OsMode::Dark) => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}
