//! Typed error variants for the family-switcher-config crate.
//!
//! Settings and state I/O report through [`ConfigError`] so callers can match
//! on the failure mode. Application code usually wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when reading or writing editor settings and tool state.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings or state file could not be read or written.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The editor settings file is not valid JSON (after comment stripping).
    #[error("JSON parse error in '{}': {source}", path.display())]
    Parse {
        /// Settings file that failed to parse.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The tool state file could not be serialized or parsed.
    #[error("State file error: {0}")]
    State(#[from] serde_yaml_ng::Error),

    /// The settings file parsed, but its top level is not a JSON object.
    #[error("Settings file '{}' does not contain a JSON object", .0.display())]
    NotAnObject(PathBuf),

    /// A settings key holds a value of an unexpected type.
    #[error("Setting '{key}' is not {expected}")]
    InvalidValue {
        /// Offending settings key.
        key: String,
        /// Human-readable description of the expected type.
        expected: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
