//! System font family enumeration.
//!
//! [`SystemFontSource`] asks `fontdb` for every installed face and reduces the
//! faces to a sorted, de-duplicated list of family names. [`enumerate_families`]
//! wraps any [`FontSource`] so failures come back as an empty list.

use std::any::Any;
use std::collections::BTreeSet;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use fontdb::{Database, Language};

/// Something that can list installed font family names.
pub trait FontSource {
    fn family_names(&self) -> Result<Vec<String>>;
}

/// Fonts installed on this machine, plus any extra directories.
#[derive(Debug, Clone, Default)]
pub struct SystemFontSource {
    /// Extra directories scanned after the system locations
    pub font_dirs: Vec<PathBuf>,
    /// Only report families with at least one fixed-pitch face
    pub monospace_only: bool,
}

impl SystemFontSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_dirs(mut self, dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        self.font_dirs.extend(dirs);
        self
    }

    pub fn monospace_only(mut self, monospace_only: bool) -> Self {
        self.monospace_only = monospace_only;
        self
    }

    fn load_database(&self) -> Database {
        let mut font_db = Database::new();
        font_db.load_system_fonts();
        log::info!("Loaded {} system font faces", font_db.len());
        for dir in &self.font_dirs {
            if dir.is_dir() {
                let before = font_db.len();
                font_db.load_fonts_dir(dir);
                log::info!(
                    "Loaded {} font faces from {:?}",
                    font_db.len() - before,
                    dir
                );
            } else {
                log::warn!("Font directory {:?} does not exist, skipping", dir);
            }
        }
        font_db
    }
}

impl FontSource for SystemFontSource {
    fn family_names(&self) -> Result<Vec<String>> {
        let font_db = self.load_database();
        Ok(families_in_database(&font_db, self.monospace_only))
    }
}

/// Sorted, de-duplicated family names of every face in `font_db`.
///
/// Uses the US English name when a face carries localized names.
pub fn families_in_database(font_db: &Database, monospace_only: bool) -> Vec<String> {
    let families: BTreeSet<String> = font_db
        .faces()
        .filter(|face| !monospace_only || face.monospaced)
        .filter_map(|face| {
            face.families
                .iter()
                .find(|(_, lang)| *lang == Language::English_UnitedStates)
                .or_else(|| face.families.first())
                .map(|(name, _)| name.trim().to_string())
        })
        .filter(|name| !name.is_empty())
        .collect();
    families.into_iter().collect()
}

/// List family names from `source`, turning any error or panic into an empty list.
pub fn enumerate_families(source: &dyn FontSource) -> Vec<String> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| source.family_names()))
        .unwrap_or_else(|payload| {
            Err(anyhow!(
                "font enumeration panicked: {}",
                panic_message(&*payload)
            ))
        });
    match result {
        Ok(families) => {
            log::debug!("Enumerated {} font families", families.len());
            families
        }
        Err(e) => {
            log::error!("Font enumeration failed: {:#}", e);
            Vec::new()
        }
    }
}

/// Drop families whose name starts with '.' (platform-private faces).
pub fn visible_families(families: Vec<String>) -> Vec<String> {
    families
        .into_iter()
        .filter(|name| !name.starts_with('.'))
        .collect()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
