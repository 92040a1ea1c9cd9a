//! Optional settings file.
//!
//! Looked up at `--config <path>` or `<config dir>/cc-keep-working/config.yaml`.
//! Every field is optional; a missing file means defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detectors::DETECTOR_NAMES;
use crate::error::{HookError, Result};
use crate::transcript::{LoadOptions, MalformedLines};
use crate::window::DEFAULT_WINDOW_SIZE;

const APP_DIR: &str = "cc-keep-working";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Number of recent turns handed to the detectors.
    pub window_size: usize,
    /// Decode only the last `n` non-blank transcript lines.
    pub tail_lines: Option<usize>,
    pub malformed_lines: MalformedLines,
    pub disabled_detectors: Vec<String>,
    pub log_level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            tail_lines: None,
            malformed_lines: MalformedLines::Skip,
            disabled_detectors: Vec::new(),
            log_level: None,
        }
    }
}

impl Settings {
    /// `<config dir>/cc-keep-working/config.yaml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load settings from `explicit`, or from the default location.
    ///
    /// A missing default file is not an error. A missing explicit file is.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| HookError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&text).map_err(|message| HookError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn parse(text: &str) -> std::result::Result<Self, String> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Settings = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
        if let Some(unknown) = settings
            .disabled_detectors
            .iter()
            .find(|name| !DETECTOR_NAMES.contains(&name.as_str()))
        {
            return Err(format!(
                "unknown detector '{unknown}' (expected one of: {})",
                DETECTOR_NAMES.join(", ")
            ));
        }
        Ok(settings)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            malformed_lines: self.malformed_lines,
            tail_lines: self.tail_lines,
        }
    }

    pub fn is_enabled(&self, detector: &str) -> bool {
        !self.disabled_detectors.iter().any(|d| d == detector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
        assert_eq!(Settings::default().window_size, 10);
    }

    #[test]
    fn parses_all_fields() {
        let yaml = "\
window_size: 20
tail_lines: 20
malformed_lines: abort
disabled_detectors: [mid_task]
log_level: debug
";
        let settings = Settings::parse(yaml).unwrap();
        assert_eq!(settings.window_size, 20);
        assert_eq!(settings.tail_lines, Some(20));
        assert_eq!(settings.malformed_lines, MalformedLines::Abort);
        assert!(!settings.is_enabled("mid_task"));
        assert!(settings.is_enabled("todos"));
        assert_eq!(settings.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_detector() {
        let err = Settings::parse("disabled_detectors: [vibes]").unwrap_err();
        assert!(err.contains("vibes"));
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(Settings::parse("windowsize: 3").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(Some(dir.path().join("nope.yaml").as_path())).unwrap_err();
        assert!(matches!(err, HookError::Config { .. }));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "window_size: 4\n").unwrap();
        let settings = Settings::load(Some(path.as_path())).unwrap();
        assert_eq!(settings.window_size, 4);
        assert_eq!(settings.malformed_lines, MalformedLines::Skip);
    }
}
