//! Tool configuration (`~/.config/family-switcher/config.yaml`).
//!
//! Holds where the editor settings live and how the picker behaves. The font
//! settings and curation lists themselves are stored in the editor settings
//! file, not here.

use crate::curation::CurationMode;
use crate::defaults;
use crate::state::StateFile;
use crate::types::LogLevel;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Editor settings file to edit (default: VS Code user settings)
    #[serde(default)]
    pub settings_path: Option<PathBuf>,

    /// State file holding the font cache
    #[serde(default)]
    pub state_path: Option<PathBuf>,

    /// Which curation list shapes the picker
    #[serde(default = "defaults::curation_mode")]
    pub curation_mode: CurationMode,

    /// Write the highlighted font into the setting while picking
    #[serde(default = "defaults::live_preview")]
    pub live_preview: bool,

    /// Hide family names starting with '.'
    #[serde(default = "defaults::hide_dot_fonts")]
    pub hide_dot_fonts: bool,

    /// Only cache fixed-pitch families
    #[serde(default = "defaults::monospace_only")]
    pub monospace_only: bool,

    /// Extra directories scanned for fonts
    #[serde(default)]
    pub font_dirs: Vec<PathBuf>,

    #[serde(default = "defaults::log_level")]
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings_path: None,
            state_path: None,
            curation_mode: defaults::curation_mode(),
            live_preview: defaults::live_preview(),
            hide_dot_fonts: defaults::hide_dot_fonts(),
            monospace_only: defaults::monospace_only(),
            font_dirs: Vec::new(),
            log_level: defaults::log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, creating it if missing
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Config path: {:?}", path);
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            if contents.trim().is_empty() {
                return Ok(Self::default());
            }
            let config: Config = serde_yaml_ng::from_str(&contents)?;
            Ok(config)
        } else {
            log::info!("Config file not found, creating default at {:?}", path);
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::error!("Failed to save default config: {}", e);
                return Err(e);
            }
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("family-switcher")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("family-switcher")
            } else {
                PathBuf::from(".")
            }
        }
    }

    /// Default editor settings file: VS Code's user `settings.json`.
    ///
    /// `~/.config/Code/User` on Linux, `~/Library/Application Support/Code/User`
    /// on macOS, `%APPDATA%\Code\User` on Windows.
    pub fn default_settings_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("Code").join("User").join("settings.json"))
            .unwrap_or_else(|| PathBuf::from("settings.json"))
    }

    /// Settings file in effect, expanding a leading `~/`
    pub fn resolved_settings_path(&self) -> PathBuf {
        self.settings_path
            .as_deref()
            .map(expand_home_dir)
            .unwrap_or_else(Self::default_settings_path)
    }

    /// State file in effect, expanding a leading `~/`
    pub fn state_file(&self) -> StateFile {
        let path = self
            .state_path
            .as_deref()
            .map(expand_home_dir)
            .unwrap_or_else(StateFile::default_path);
        StateFile::new(path)
    }

    /// Extra font directories with `~/` expanded
    pub fn resolved_font_dirs(&self) -> Vec<PathBuf> {
        self.font_dirs.iter().map(|d| expand_home_dir(d)).collect()
    }
}

/// Expand `~/` to the home directory
fn expand_home_dir(path: &Path) -> PathBuf {
    if let Ok(suffix) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(suffix);
    }
    path.to_path_buf()
}
