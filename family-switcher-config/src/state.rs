//! Tool-local state persisted between runs (the font cache).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `state.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolState {
    /// Last enumerated font family names
    #[serde(default)]
    pub font_cache: Vec<String>,
}

/// State file on disk.
#[derive(Debug, Clone)]
pub struct StateFile {
    path: PathBuf,
}

impl StateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `~/.local/share/family-switcher/state.yaml`
    /// (`%LOCALAPPDATA%\family-switcher\state.yaml` on Windows).
    pub fn default_path() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(data_dir) = dirs::data_local_dir() {
                data_dir.join("family-switcher").join("state.yaml")
            } else {
                PathBuf::from("state.yaml")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir
                    .join(".local")
                    .join("share")
                    .join("family-switcher")
                    .join("state.yaml")
            } else {
                PathBuf::from("state.yaml")
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state; a missing file is the default (empty) state.
    pub fn load(&self) -> Result<ToolState, ConfigError> {
        if !self.path.exists() {
            return Ok(ToolState::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        if contents.trim().is_empty() {
            return Ok(ToolState::default());
        }
        let state: ToolState = serde_yaml_ng::from_str(&contents)?;
        log::debug!(
            "Loaded state from {:?} ({} cached fonts)",
            self.path,
            state.font_cache.len()
        );
        Ok(state)
    }

    /// Atomic save: write to temp file then rename.
    pub fn save(&self, state: &ToolState) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let yaml = serde_yaml_ng::to_string(state)?;
        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        Ok(())
    }
}
