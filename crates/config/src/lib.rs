//! Keepmap Configuration Management
//!
//! Loads editor options from `config/editoroptions.txt`.
//!
//! The file is a list of `key = value` lines. Blank lines and lines starting
//! with `#` are skipped, unknown keys are ignored, and a value that does not
//! parse leaves the default in place.

use std::fs;
use std::path::{Path, PathBuf};

/// Where the options file lives, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/editoroptions.txt";

/// Editor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    /// File the map is saved to (from "mapfile" option)
    pub map_file: PathBuf,
    /// Load `map_file` at startup if it exists (from "loadonstart" option)
    pub load_on_start: bool,
    /// Capture the mouse for drag painting (from "mouse" option)
    pub mouse: bool,
    /// Log destination (from "logfile" option)
    pub log_file: PathBuf,
    /// Tracing filter directive (from "loglevel" option)
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            map_file: "keep.map".into(),
            load_on_start: false,
            mouse: true,
            log_file: "keepmap.log".into(),
            log_level: "info".into(),
        }
    }
}

impl EditorConfig {
    /// Load configuration from an options file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config = Self::parse(&content)?;
        Ok(config)
    }

    /// Load configuration from the default path
    pub fn load_default() -> Result<Self, Box<dyn std::error::Error>> {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }

    /// Parse options file content
    pub fn parse(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // Parse key=value
            if let Some(eq_pos) = line.find('=') {
                let key = line[..eq_pos].trim();
                let value = line[eq_pos + 1..].trim();

                config.parse_option(key, value);
            }
        }

        if config.map_file.as_os_str().is_empty() {
            return Err(keepmap_core::KeepError::Config("mapfile must not be empty".into()).into());
        }

        Ok(config)
    }

    fn parse_option(&mut self, key: &str, value: &str) {
        match key {
            "mapfile" => self.map_file = value.into(),
            "loadonstart" => {
                self.load_on_start = value.parse().unwrap_or(false);
            }
            "mouse" => {
                self.mouse = value.parse().unwrap_or(true);
            }
            "logfile" => {
                if !value.is_empty() {
                    self.log_file = value.into();
                }
            }
            "loglevel" => {
                if !value.is_empty() {
                    self.log_level = value.into();
                }
            }
            _ => {
                tracing::debug!("Unknown config option: {} = {}", key, value);
            }
        }
    }

    /// Display configuration summary
    pub fn display(&self) {
        tracing::info!("Editor configuration:");
        tracing::info!("    Map file: {}", self.map_file.display());
        tracing::info!("    Load on start: {}", self.load_on_start);
        tracing::info!("    Mouse: {}", self.mouse);
        tracing::info!("    Log file: {} ({})", self.log_file.display(), self.log_level);
    }
}
