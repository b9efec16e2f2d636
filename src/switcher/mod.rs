//! Command layer: each user command is one method on [`Switcher`].
//!
//! Control flow is font source -> store (cache) -> prompt -> store (commit).
//! Errors from the store are caught in [`Switcher::run`], logged, and shown to
//! the user as `"Failed to <operation>: <error>"`.

mod curation;
mod font_family;

use crate::picker::{Notifier, Prompt};
use crate::views::FontViews;
use anyhow::{Context, Result};
use family_switcher_config::{
    Config, CurationMode, FontPosition, FontTarget, JsonSettingsFile, SettingsBackend,
    SettingsStore,
};
use family_switcher_fonts::{FontSource, enumerate_families, visible_families};

/// Message shown when a command needs the font cache and it is empty
pub const FONT_CACHE_MISSING: &str = "Font cache not found. You need to load fonts first.";
/// Action offered alongside [`FONT_CACHE_MISSING`]
pub const LOAD_FONTS_ACTION: &str = "Load Fonts";

/// Behaviour switches for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitcherOptions {
    pub mode: CurationMode,
    /// Write the highlighted font into the setting while picking
    pub live_preview: bool,
    /// Drop family names starting with '.' before caching
    pub hide_dot_fonts: bool,
}

impl Default for SwitcherOptions {
    fn default() -> Self {
        Self {
            mode: CurationMode::default(),
            live_preview: true,
            hide_dot_fonts: true,
        }
    }
}

impl From<&Config> for SwitcherOptions {
    fn from(config: &Config) -> Self {
        Self {
            mode: config.curation_mode,
            live_preview: config.live_preview,
            hide_dot_fonts: config.hide_dot_fonts,
        }
    }
}

/// A user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    LoadFonts,
    /// Pick a font for one position of a font family setting
    Switch {
        target: FontTarget,
        position: Option<FontPosition>,
    },
    /// Multi-select over the cache that overwrites the curation list
    Manage,
    Preview {
        font: String,
    },
    Apply {
        font: String,
        target: FontTarget,
        position: Option<FontPosition>,
    },
    Add {
        font: String,
    },
    Remove {
        font: String,
    },
    Views,
}

impl Command {
    /// Operation name used in failure messages
    pub fn operation(&self, mode: CurationMode) -> String {
        match self {
            Command::LoadFonts => "load fonts".to_string(),
            Command::Switch {
                target: FontTarget::Editor,
                ..
            } => "switch font".to_string(),
            Command::Switch {
                target: FontTarget::Terminal,
                ..
            } => "switch terminal font".to_string(),
            Command::Manage => format!("update {}", mode.list_name()),
            Command::Preview { .. } => "preview font".to_string(),
            Command::Apply { target, .. } => format!("apply {} font", target.display_name()),
            Command::Add { .. } => format!("add to {}", mode.list_name()),
            Command::Remove { .. } => format!("remove from {}", mode.list_name()),
            Command::Views => "show views".to_string(),
        }
    }
}

pub struct Switcher<B: SettingsBackend = JsonSettingsFile> {
    store: SettingsStore<B>,
    prompt: Box<dyn Prompt>,
    notifier: Box<dyn Notifier>,
    fonts: Box<dyn FontSource>,
    options: SwitcherOptions,
}

impl<B: SettingsBackend> Switcher<B> {
    pub fn new(
        store: SettingsStore<B>,
        prompt: Box<dyn Prompt>,
        notifier: Box<dyn Notifier>,
        fonts: Box<dyn FontSource>,
        options: SwitcherOptions,
    ) -> Self {
        Self {
            store,
            prompt,
            notifier,
            fonts,
            options,
        }
    }

    /// Run `command`, reporting any failure. Returns false when it failed.
    pub fn run(&mut self, command: &Command) -> bool {
        log::info!("Running command {:?}", command);
        let operation = command.operation(self.options.mode);
        self.report(&operation, |switcher| switcher.execute(command))
            .is_some()
    }

    /// Run `f`, turning an error into a logged failure notification.
    pub fn report<T>(
        &mut self,
        operation: &str,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Option<T> {
        match f(self) {
            Ok(value) => Some(value),
            Err(e) => {
                log::error!("Failed to {}: {:#}", operation, e);
                self.notifier
                    .error(&format!("Failed to {}: {:#}", operation, e));
                None
            }
        }
    }

    fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::LoadFonts => self.load_fonts().map(|_| ()),
            Command::Switch { target, position } => self.switch_font_family(*target, *position),
            Command::Manage => self.manage_curation(),
            Command::Preview { font } => self.preview_font(font),
            Command::Apply {
                font,
                target,
                position,
            } => self.apply_font(font, *target, *position),
            Command::Add { font } => self.add_to_curation(font),
            Command::Remove { font } => self.remove_from_curation(font),
            Command::Views => self.views().map(|_| ()),
        }
    }

    /// Enumerate installed fonts and replace the cache. Returns the count.
    pub fn load_fonts(&mut self) -> Result<usize> {
        self.notifier.info("Loading fonts...");
        let mut families = enumerate_families(self.fonts.as_ref());
        if self.options.hide_dot_fonts {
            families = visible_families(families);
        }
        let count = families.len();
        self.store
            .set_font_cache(families)
            .context("could not write font cache")?;
        log::info!("Cached {} font families", count);
        self.notifier
            .info(&format!("Successfully loaded and cached {} fonts.", count));
        Ok(count)
    }

    /// True when the font cache is usable, offering to load fonts when it is
    /// empty. Declining returns false without any message.
    pub fn ensure_font_cache(&mut self) -> Result<bool> {
        if self.store.has_font_cache()? {
            return Ok(true);
        }
        log::debug!("Font cache empty, asking to load fonts");
        if self.prompt.confirm(FONT_CACHE_MISSING, LOAD_FONTS_ACTION)? {
            self.load_fonts()?;
            Ok(self.store.has_font_cache()?)
        } else {
            Ok(false)
        }
    }

    /// Both font lists for the active curation mode; empty with no cache.
    pub fn views(&mut self) -> Result<FontViews> {
        let cache = self.store.font_cache()?;
        let policy = self.store.curation_policy(self.options.mode)?;
        Ok(FontViews::build(&cache, &policy))
    }
}
