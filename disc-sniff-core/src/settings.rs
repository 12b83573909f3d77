//! Scanner settings (`~/.config/disc-sniff/settings.toml`).
//!
//! The brute-force serial scanners test every byte offset in a window at the
//! start of the image, so the window size bounds the worst-case number of
//! seeks on a malformed or oversized input. The defaults cover every known
//! layout; the `[scan]` table lets a frontend shrink or widen them.
//!
//! ```toml
//! [scan]
//! psp_window = 100000
//! ascii_window = 10000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::DiscError;

/// Default number of offsets the PSP serial scanner tests.
pub const DEFAULT_PSP_WINDOW: u64 = 100_000;

/// Default number of offsets the ASCII serial scanner tests.
pub const DEFAULT_ASCII_WINDOW: u64 = 10_000;

const SCAN_TABLE: &str = "scan";

/// Upper bounds for the brute-force serial scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    /// Offsets `0..psp_window` are probed for a PSP serial prefix.
    pub psp_window: u64,
    /// Offsets `0..ascii_window` are probed for an ASCII serial run.
    pub ascii_window: u64,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            psp_window: DEFAULT_PSP_WINDOW,
            ascii_window: DEFAULT_ASCII_WINDOW,
        }
    }
}

/// Canonical path to the settings file: `~/.config/disc-sniff/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("disc-sniff").join("settings.toml")
}

impl ScanLimits {
    pub fn new(psp_window: u64, ascii_window: u64) -> Self {
        Self {
            psp_window,
            ascii_window,
        }
    }

    /// Load limits from the canonical settings file.
    ///
    /// A missing file silently yields the defaults; an unreadable or
    /// malformed one is logged and also yields the defaults.
    pub fn load() -> Self {
        let path = settings_path();
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(limits) => limits,
            Err(e) => {
                log::warn!("Ignoring {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Load limits from an explicit settings file.
    ///
    /// Missing keys (or a missing `[scan]` table) take their default values.
    pub fn load_from(path: &Path) -> Result<Self, DiscError> {
        let contents = std::fs::read_to_string(path)?;
        let doc: toml::Table = toml::from_str(&contents)
            .map_err(|e| DiscError::config(format!("{}: {e}", path.display())))?;
        match doc.get(SCAN_TABLE) {
            Some(scan) => scan
                .clone()
                .try_into()
                .map_err(|e| DiscError::config(format!("[{SCAN_TABLE}]: {e}"))),
            None => Ok(Self::default()),
        }
    }

    /// Write these limits into the `[scan]` table of `path`.
    ///
    /// Other tables in an existing file are preserved. The file is written
    /// to a temporary sibling first and renamed into place.
    pub fn save_to(&self, path: &Path) -> Result<(), DiscError> {
        let mut doc: toml::Table = std::fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str(&contents).ok())
            .unwrap_or_default();

        let scan = toml::Value::try_from(self).map_err(|e| DiscError::config(e.to_string()))?;
        doc.insert(SCAN_TABLE.to_string(), scan);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized =
            toml::to_string_pretty(&doc).map_err(|e| DiscError::config(e.to_string()))?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
