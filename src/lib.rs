// Library exports for testing and potential library use

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod debug;

pub mod cli;
pub mod picker;
pub mod switcher;
pub mod views;

pub use switcher::{Command, Switcher, SwitcherOptions};
pub use views::{FontListItem, FontViews};
