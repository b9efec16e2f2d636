//! Curation policy: allow-list, deny-list and favorites as one parameter.
//!
//! A [`CurationPolicy`] pairs a [`CurationMode`] with the list stored for that
//! mode and decides which cached fonts are offered and how they are annotated.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings key holding the allow-list
pub const ALLOW_LIST_KEY: &str = "fontFamilySwitcher.allowList";
/// Settings key holding the deny-list
pub const DENY_LIST_KEY: &str = "fontFamilySwitcher.denyList";
/// Settings key holding the favorites
pub const FAVORITES_KEY: &str = "fontFamilySwitcher.favorites";

/// How the curation list shapes the font picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CurationMode {
    /// No curation; every cached font is offered
    None,
    /// Only listed fonts are offered (all fonts while the list is empty)
    #[default]
    Allow,
    /// Listed fonts are hidden
    Deny,
    /// Listed fonts are offered first and marked
    Favorite,
}

impl CurationMode {
    /// Settings key for this mode's list, `None` when curation is off
    pub fn config_key(self) -> Option<&'static str> {
        match self {
            CurationMode::None => None,
            CurationMode::Allow => Some(ALLOW_LIST_KEY),
            CurationMode::Deny => Some(DENY_LIST_KEY),
            CurationMode::Favorite => Some(FAVORITES_KEY),
        }
    }

    /// Status label shown next to curated fonts
    pub fn annotation(self) -> Option<&'static str> {
        match self {
            CurationMode::None => None,
            CurationMode::Allow => Some("Allowed"),
            CurationMode::Deny => Some("Denied"),
            CurationMode::Favorite => Some("Favorited"),
        }
    }

    /// Name of the list used in messages
    pub fn list_name(self) -> &'static str {
        match self {
            CurationMode::None => "curation list",
            CurationMode::Allow => "allow-list",
            CurationMode::Deny => "deny-list",
            CurationMode::Favorite => "favorites",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != CurationMode::None
    }
}

impl fmt::Display for CurationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CurationMode::None => "none",
            CurationMode::Allow => "allow",
            CurationMode::Deny => "deny",
            CurationMode::Favorite => "favorite",
        };
        f.write_str(name)
    }
}

/// User-maintained set of font names that keeps insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurationList {
    fonts: Vec<String>,
}

impl CurationList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.iter().any(|f| f == name)
    }

    /// Append `name`; returns false if it was already listed.
    pub fn add(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.fonts.push(name);
        true
    }

    /// Remove every occurrence of `name`; returns true if anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.fonts.len();
        self.fonts.retain(|f| f != name);
        self.fonts.len() != before
    }

    /// Replace the whole list with `selection`.
    pub fn replace<I, S>(&mut self, selection: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fonts.clear();
        for name in selection {
            self.add(name);
        }
    }

    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Listed fonts that are missing from `cache`
    pub fn missing_from<'a>(&'a self, cache: &[String]) -> Vec<&'a str> {
        self.fonts
            .iter()
            .filter(|f| !cache.contains(f))
            .map(String::as_str)
            .collect()
    }
}

impl From<Vec<String>> for CurationList {
    fn from(fonts: Vec<String>) -> Self {
        let mut list = CurationList::new();
        list.replace(fonts);
        list
    }
}

impl<'a> IntoIterator for &'a CurationList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fonts.iter()
    }
}

/// A font offered by the picker together with its curation status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub name: String,
    pub curated: bool,
}

/// Curation mode plus the list stored for it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurationPolicy {
    pub mode: CurationMode,
    pub list: CurationList,
}

impl CurationPolicy {
    pub fn new(mode: CurationMode, list: CurationList) -> Self {
        Self { mode, list }
    }

    /// Cached fonts to offer, in cache order except that favorites come first.
    pub fn candidates(&self, cache: &[String]) -> Vec<Candidate> {
        let curated = |name: &String| self.mode.is_enabled() && self.list.contains(name);
        let mut candidates: Vec<Candidate> = match self.mode {
            CurationMode::None => cache
                .iter()
                .map(|name| Candidate {
                    name: name.clone(),
                    curated: false,
                })
                .collect(),
            CurationMode::Allow if !self.list.is_empty() => cache
                .iter()
                .filter(|name| self.list.contains(name))
                .map(|name| Candidate {
                    name: name.clone(),
                    curated: true,
                })
                .collect(),
            CurationMode::Deny => cache
                .iter()
                .filter(|name| !self.list.contains(name))
                .map(|name| Candidate {
                    name: name.clone(),
                    curated: false,
                })
                .collect(),
            CurationMode::Allow | CurationMode::Favorite => cache
                .iter()
                .map(|name| Candidate {
                    name: name.clone(),
                    curated: curated(name),
                })
                .collect(),
        };
        if self.mode == CurationMode::Favorite {
            // stable: favorites keep cache order among themselves
            candidates.sort_by_key(|c| !c.curated);
        }
        candidates
    }

    /// Annotation for a font in this policy, if any
    pub fn annotation_for(&self, name: &str) -> Option<&'static str> {
        if self.list.contains(name) {
            self.mode.annotation()
        } else {
            None
        }
    }
}
