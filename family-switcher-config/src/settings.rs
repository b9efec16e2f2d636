//! Key-value access to the editor's settings file.
//!
//! Editor settings are a flat JSON object keyed by dotted names
//! (`"editor.fontFamily"`). [`JsonSettingsFile`] keeps the file's text next to
//! the parsed object and writes the file after every change, so each write is
//! visible to the editor immediately. Edits touch only the changed member's
//! text; comments and formatting elsewhere are kept.

use crate::error::ConfigError;
use crate::jsonc;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Generic key-value configuration facility behind the settings store.
pub trait SettingsBackend {
    /// Raw value for `key`, if present
    fn get(&self, key: &str) -> Option<&Value>;

    /// Store `value` under `key`, persisting it
    fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError>;

    /// Remove `key`, persisting the change. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> Result<(), ConfigError>;

    /// String value for `key`; `Ok(None)` when absent or `null`.
    fn get_string(&self, key: &str) -> Result<Option<String>, ConfigError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                expected: "a string",
            }),
        }
    }

    /// String-array value for `key`; empty when absent or `null`.
    fn get_string_list(&self, key: &str) -> Result<Vec<String>, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            expected: "an array of strings",
        };
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect(),
            Some(_) => Err(invalid()),
        }
    }
}

/// Editor `settings.json` on disk.
#[derive(Debug)]
pub struct JsonSettingsFile {
    path: PathBuf,
    /// File contents as last written, comments included
    text: String,
    values: Map<String, Value>,
}

impl JsonSettingsFile {
    /// Load the settings file at `path`. A missing or blank file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let (text, values) = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
            let values = parse_settings(&path, &contents)?;
            (contents, values)
        } else {
            log::info!("Settings file {:?} not found, starting empty", path);
            (String::new(), Map::new())
        };
        log::debug!("Loaded {} settings from {:?}", values.len(), path);
        Ok(Self { path, text, values })
    }

    /// Apply `edit` to the file text. A document with no object yet gets an
    /// empty one appended first; text the editor cannot follow is rewritten
    /// from the parsed values.
    fn apply_edit(&mut self, edit: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if strip_json_comments(&self.text).trim().is_empty() {
            let separator = if self.text.is_empty() || self.text.ends_with('\n') {
                ""
            } else {
                "\n"
            };
            self.text = format!("{}{separator}{{}}\n", self.text);
        }
        self.text = match edit(&self.text) {
            Some(text) => text,
            None => {
                log::warn!("Could not edit {:?} in place, rewriting it", self.path);
                let json = serde_json::to_string_pretty(&self.values).map_err(|e| {
                    ConfigError::Parse {
                        path: self.path.clone(),
                        source: e,
                    }
                })?;
                format!("{json}\n")
            }
        };
        Ok(())
    }

    /// Write the settings text back to disk.
    ///
    /// Atomic save: write to a temp file then rename over the original. A
    /// symlinked settings file is resolved first so the link is kept and its
    /// target receives the write.
    fn save(&self) -> Result<(), ConfigError> {
        let target = fs::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone());
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let temp_path = target.with_extension("json.tmp");
        fs::write(&temp_path, &self.text).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, &target).map_err(|e| ConfigError::io(&target, e))?;
        Ok(())
    }
}

impl SettingsBackend for JsonSettingsFile {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
        log::debug!("Setting {} = {}", key, value);
        self.values.insert(key.to_string(), value.clone());
        self.apply_edit(|text| jsonc::set_member(text, key, &value))?;
        self.save()
    }

    fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
        if self.values.shift_remove(key).is_some() {
            log::debug!("Removed setting {}", key);
            self.apply_edit(|text| jsonc::remove_member(text, key))?;
            self.save()?;
        }
        Ok(())
    }
}

fn parse_settings(path: &Path, contents: &str) -> Result<Map<String, Value>, ConfigError> {
    let stripped = strip_json_comments(contents);
    if stripped.trim().is_empty() {
        return Ok(Map::new());
    }
    let value: Value = serde_json::from_str(&stripped).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject(path.to_path_buf())),
    }
}

/// Remove `//` and `/* */` comments and trailing commas from JSON text.
///
/// String literals are left untouched. Comment bytes are replaced by spaces so
/// parse error positions still line up with the original file.
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        let next = chars.peek().copied();
        match (c, next) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                out.push(' ');
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                    out.push(' ');
                }
            }
            ('/', Some('*')) => {
                chars.next();
                out.push_str("  ");
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        out.push(' ');
                        break;
                    }
                    out.push(if next == '\n' { '\n' } else { ' ' });
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    strip_trailing_commas(&out)
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if in_string {
            if c == '\\' && i + 1 < chars.len() {
                out.push(c);
                out.push(chars[i + 1]);
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                out.push(' ');
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}
