//! Default value functions used as `#[serde(default = "...")]` on `Config` fields.

use crate::curation::CurationMode;
use crate::types::LogLevel;

pub fn curation_mode() -> CurationMode {
    CurationMode::Allow
}

pub fn live_preview() -> bool {
    true
}

pub fn hide_dot_fonts() -> bool {
    true // macOS system-private families start with '.'
}

pub fn monospace_only() -> bool {
    false
}

pub fn log_level() -> LogLevel {
    LogLevel::Info
}
