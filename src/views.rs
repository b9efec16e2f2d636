//! Static font lists: the curated subset and the full cached list.
//!
//! Both lists are rebuilt from the store on every call, so any change to the
//! cache or a curation list shows up the next time they are rendered. With no
//! font cache both lists are empty.

use family_switcher_config::{CurationMode, CurationPolicy};
use serde_json::{Value, json};
use std::fmt::Write as _;

/// One row of a font list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontListItem {
    pub name: String,
    /// Listed in the active curation list
    pub curated: bool,
    /// Curated but absent from the font cache
    pub missing: bool,
}

/// Both lists for one curation mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontViews {
    pub mode: CurationMode,
    pub curated: Vec<FontListItem>,
    pub all: Vec<FontListItem>,
}

impl FontViews {
    /// Build the lists from the cached fonts and the active policy.
    pub fn build(cache: &[String], policy: &CurationPolicy) -> Self {
        if cache.is_empty() {
            return Self {
                mode: policy.mode,
                ..Self::default()
            };
        }

        let curated = if policy.mode.is_enabled() {
            policy
                .list
                .fonts()
                .iter()
                .map(|name| FontListItem {
                    name: name.clone(),
                    curated: true,
                    missing: !cache.contains(name),
                })
                .collect()
        } else {
            Vec::new()
        };

        let all = cache
            .iter()
            .map(|name| FontListItem {
                name: name.clone(),
                curated: policy.mode.is_enabled() && policy.list.contains(name),
                missing: false,
            })
            .collect();

        Self {
            mode: policy.mode,
            curated,
            all,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.curated.is_empty() && self.all.is_empty()
    }

    /// Title of the curated list
    pub fn curated_title(&self) -> &'static str {
        match self.mode {
            CurationMode::None => "Curated Fonts",
            CurationMode::Allow => "Allow-list",
            CurationMode::Deny => "Deny-list",
            CurationMode::Favorite => "Favorites",
        }
    }

    /// Plain text rendering with one font per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        if self.is_empty() {
            out.push_str("No fonts loaded. Run `family-switcher load-fonts` first.\n");
            return out;
        }

        let annotation = self.mode.annotation();
        let _ = writeln!(out, "{} ({})", self.curated_title(), self.curated.len());
        if !self.mode.is_enabled() {
            out.push_str("  (curation disabled)\n");
        }
        for item in &self.curated {
            let _ = write!(out, "  {}", item.name);
            if item.missing {
                out.push_str("  [not installed]");
            }
            out.push('\n');
        }

        let _ = writeln!(out, "\nAll Fonts ({})", self.all.len());
        for item in &self.all {
            let _ = write!(out, "  {}", item.name);
            if let Some(label) = annotation.filter(|_| item.curated) {
                let _ = write!(out, "  ({label})");
            }
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> Value {
        let items = |list: &[FontListItem]| -> Vec<Value> {
            list.iter()
                .map(|item| {
                    json!({
                        "name": item.name,
                        "curated": item.curated,
                        "missing": item.missing,
                    })
                })
                .collect()
        };
        json!({
            "mode": self.mode.to_string(),
            "curated": items(&self.curated),
            "all": items(&self.all),
        })
    }
}
