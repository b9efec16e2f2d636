//! Settings store for family-switcher.
//!
//! This crate provides:
//!
//! - Access to the editor settings file through the [`SettingsBackend`] trait
//! - Font family setting values ([`FontFamily`]) and their positions
//! - The curation policy (allow-list, deny-list, favorites) as one parameter
//! - The font cache kept in the tool state file
//! - The tool's own YAML configuration ([`Config`])

pub mod config;
pub mod curation;
pub mod defaults;
pub mod error;
pub mod font_family;
mod jsonc;
pub mod settings;
pub mod state;
pub mod store;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use curation::{
    ALLOW_LIST_KEY, Candidate, CurationList, CurationMode, CurationPolicy, DENY_LIST_KEY,
    FAVORITES_KEY,
};
pub use error::ConfigError;
pub use font_family::{
    EDITOR_FONT_FAMILY_KEY, FontFamily, FontFamilyValue, FontPosition, FontTarget,
    TERMINAL_FONT_FAMILY_KEY, join_font_names,
};
pub use settings::{JsonSettingsFile, SettingsBackend, strip_json_comments};
pub use state::{StateFile, ToolState};
pub use store::SettingsStore;
pub use types::LogLevel;
