//! Font family setting values and the positions within them.
//!
//! A font family setting is a comma-joined list of names: the primary font
//! followed by fallbacks. Editing happens on the split form and is joined back
//! with `", "` on write.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Settings key holding the editor font family.
pub const EDITOR_FONT_FAMILY_KEY: &str = "editor.fontFamily";

/// Settings key holding the integrated terminal font family.
pub const TERMINAL_FONT_FAMILY_KEY: &str = "terminal.integrated.fontFamily";

/// Which font family setting an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontTarget {
    #[default]
    Editor,
    Terminal,
}

impl FontTarget {
    /// Settings key for this target
    pub fn config_key(self) -> &'static str {
        match self {
            FontTarget::Editor => EDITOR_FONT_FAMILY_KEY,
            FontTarget::Terminal => TERMINAL_FONT_FAMILY_KEY,
        }
    }

    /// Prefix used in confirmation messages
    pub fn message_prefix(self) -> &'static str {
        match self {
            FontTarget::Editor => "Font",
            FontTarget::Terminal => "Terminal font",
        }
    }

    /// Lowercase name used in "for editor" / "for terminal" messages
    pub fn display_name(self) -> &'static str {
        match self {
            FontTarget::Editor => "editor",
            FontTarget::Terminal => "terminal",
        }
    }
}

/// Slot within a font family list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontPosition {
    Primary,
    Secondary,
    Tertiary,
    Quaternary,
    Quinary,
}

impl FontPosition {
    /// All positions in list order
    pub fn all() -> &'static [FontPosition] {
        &[
            FontPosition::Primary,
            FontPosition::Secondary,
            FontPosition::Tertiary,
            FontPosition::Quaternary,
            FontPosition::Quinary,
        ]
    }

    /// Zero-based index into the family list
    pub fn index(self) -> usize {
        match self {
            FontPosition::Primary => 0,
            FontPosition::Secondary => 1,
            FontPosition::Tertiary => 2,
            FontPosition::Quaternary => 3,
            FontPosition::Quinary => 4,
        }
    }

    /// Position for a zero-based index, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            FontPosition::Primary => "Primary Font",
            FontPosition::Secondary => "Secondary Font",
            FontPosition::Tertiary => "Tertiary Font",
            FontPosition::Quaternary => "Quaternary Font",
            FontPosition::Quinary => "Quinary Font",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FontPosition::Primary => "Main font",
            FontPosition::Secondary => "First fallback font",
            FontPosition::Tertiary => "Second fallback font",
            FontPosition::Quaternary => "Third fallback font",
            FontPosition::Quinary => "Fourth fallback font",
        }
    }
}

impl fmt::Display for FontPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A font family setting split into its positions.
///
/// Entries keep whatever the split produced, including empty strings, so an
/// unset slot stays unset until something is explicitly placed there.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FontFamily {
    entries: Vec<String>,
}

impl FontFamily {
    /// Split a comma-joined setting value, trimming each entry.
    ///
    /// An empty string yields a single empty entry.
    pub fn parse(value: &str) -> Self {
        Self {
            entries: value.split(',').map(|f| f.trim().to_string()).collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entry at `index`, if the list is that long
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    /// Place `name` at `index`, padding with empty entries when the list is shorter.
    pub fn set(&mut self, index: usize, name: impl Into<String>) {
        if self.entries.len() <= index {
            self.entries.resize(index + 1, String::new());
        }
        self.entries[index] = name.into();
    }

    /// Copy of this family with `name` placed at `index`
    pub fn with(&self, index: usize, name: impl Into<String>) -> Self {
        let mut family = self.clone();
        family.set(index, name);
        family
    }

    /// Join non-empty entries with `", "`.
    pub fn to_setting_string(&self) -> String {
        join_font_names(&self.entries)
    }
}

impl From<Vec<String>> for FontFamily {
    fn from(entries: Vec<String>) -> Self {
        Self { entries }
    }
}

/// Join font names for a settings value, dropping empty entries.
pub fn join_font_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !name.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Value accepted when writing a font family setting.
///
/// A raw string is written verbatim; a sequence is joined with
/// [`join_font_names`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontFamilyValue {
    Raw(String),
    Sequence(Vec<String>),
}

impl FontFamilyValue {
    /// The string that ends up in the settings file
    pub fn to_setting_string(&self) -> String {
        match self {
            FontFamilyValue::Raw(value) => value.clone(),
            FontFamilyValue::Sequence(names) => join_font_names(names),
        }
    }
}

impl From<&str> for FontFamilyValue {
    fn from(value: &str) -> Self {
        FontFamilyValue::Raw(value.to_string())
    }
}

impl From<String> for FontFamilyValue {
    fn from(value: String) -> Self {
        FontFamilyValue::Raw(value)
    }
}

impl From<Vec<String>> for FontFamilyValue {
    fn from(names: Vec<String>) -> Self {
        FontFamilyValue::Sequence(names)
    }
}

impl From<&[&str]> for FontFamilyValue {
    fn from(names: &[&str]) -> Self {
        FontFamilyValue::Sequence(names.iter().map(|n| n.to_string()).collect())
    }
}

impl From<&FontFamily> for FontFamilyValue {
    fn from(family: &FontFamily) -> Self {
        FontFamilyValue::Sequence(family.entries.clone())
    }
}

impl From<FontFamily> for FontFamilyValue {
    fn from(family: FontFamily) -> Self {
        FontFamilyValue::Sequence(family.entries)
    }
}
