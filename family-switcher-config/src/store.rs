//! The settings store: named font settings, curation lists and the font cache.
//!
//! Every accessor is a pass-through read or write on the backend; there is no
//! transaction spanning keys, the last write wins. The font cache sits in the
//! tool state file with a process-lifetime copy held in memory after first use.

use crate::curation::{CurationList, CurationMode, CurationPolicy};
use crate::error::ConfigError;
use crate::font_family::{FontFamily, FontFamilyValue, FontTarget};
use crate::settings::{JsonSettingsFile, SettingsBackend};
use crate::state::{StateFile, ToolState};
use serde_json::Value;

pub struct SettingsStore<B: SettingsBackend = JsonSettingsFile> {
    settings: B,
    state: StateFile,
    font_cache: Option<Vec<String>>,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(settings: B, state: StateFile) -> Self {
        Self {
            settings,
            state,
            font_cache: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.settings
    }

    // ── Font family settings ───────────────────────────────────────────────

    /// Raw font family string for `target`, `None` when unset.
    pub fn font_family_raw(&self, target: FontTarget) -> Result<Option<String>, ConfigError> {
        self.settings.get_string(target.config_key())
    }

    /// Font family for `target` split into positions (unset reads as `""`).
    pub fn font_family(&self, target: FontTarget) -> Result<FontFamily, ConfigError> {
        let raw = self.font_family_raw(target)?.unwrap_or_default();
        Ok(FontFamily::parse(&raw))
    }

    /// Write the font family for `target`.
    ///
    /// Sequences drop empty entries and are joined with `", "`; raw strings are
    /// written as given.
    pub fn set_font_family(
        &mut self,
        target: FontTarget,
        value: impl Into<FontFamilyValue>,
    ) -> Result<(), ConfigError> {
        let value = value.into().to_setting_string();
        self.settings
            .set(target.config_key(), Value::String(value))
    }

    /// Put back a value captured by [`Self::font_family_raw`]: the exact string,
    /// or no key at all when it was unset.
    pub fn restore_font_family(
        &mut self,
        target: FontTarget,
        original: Option<&str>,
    ) -> Result<(), ConfigError> {
        match original {
            Some(value) => self.set_font_family(target, value),
            None => self.settings.remove(target.config_key()),
        }
    }

    pub fn editor_font_family(&self) -> Result<FontFamily, ConfigError> {
        self.font_family(FontTarget::Editor)
    }

    pub fn set_editor_font_family(
        &mut self,
        value: impl Into<FontFamilyValue>,
    ) -> Result<(), ConfigError> {
        self.set_font_family(FontTarget::Editor, value)
    }

    pub fn terminal_font_family(&self) -> Result<FontFamily, ConfigError> {
        self.font_family(FontTarget::Terminal)
    }

    pub fn set_terminal_font_family(
        &mut self,
        value: impl Into<FontFamilyValue>,
    ) -> Result<(), ConfigError> {
        self.set_font_family(FontTarget::Terminal, value)
    }

    // ── Curation lists ─────────────────────────────────────────────────────

    /// List stored for `mode`; always empty for [`CurationMode::None`].
    pub fn curation_list(&self, mode: CurationMode) -> Result<CurationList, ConfigError> {
        match mode.config_key() {
            Some(key) => Ok(CurationList::from(self.settings.get_string_list(key)?)),
            None => Ok(CurationList::new()),
        }
    }

    /// Overwrite the list stored for `mode`. No-op for [`CurationMode::None`].
    pub fn set_curation_list(
        &mut self,
        mode: CurationMode,
        list: &CurationList,
    ) -> Result<(), ConfigError> {
        let Some(key) = mode.config_key() else {
            log::debug!("Curation disabled, not storing list");
            return Ok(());
        };
        let value = Value::Array(
            list.fonts()
                .iter()
                .map(|f| Value::String(f.clone()))
                .collect(),
        );
        self.settings.set(key, value)
    }

    pub fn curation_policy(&self, mode: CurationMode) -> Result<CurationPolicy, ConfigError> {
        Ok(CurationPolicy::new(mode, self.curation_list(mode)?))
    }

    // ── Font cache ─────────────────────────────────────────────────────────

    /// Cached font names, loading from the state file on first use.
    pub fn font_cache(&mut self) -> Result<Vec<String>, ConfigError> {
        if let Some(cache) = &self.font_cache {
            return Ok(cache.clone());
        }
        let cache = self.state.load()?.font_cache;
        self.font_cache = Some(cache.clone());
        Ok(cache)
    }

    pub fn set_font_cache(&mut self, fonts: Vec<String>) -> Result<(), ConfigError> {
        let mut state = self.state.load().unwrap_or_else(|e| {
            log::warn!("Discarding unreadable state file: {}", e);
            ToolState::default()
        });
        state.font_cache = fonts;
        self.state.save(&state)?;
        self.font_cache = Some(state.font_cache);
        Ok(())
    }

    /// True when the cache holds at least one font.
    pub fn has_font_cache(&mut self) -> Result<bool, ConfigError> {
        Ok(!self.font_cache()?.is_empty())
    }
}

impl SettingsStore<JsonSettingsFile> {
    /// Open the settings file at `settings_path` with state in `state`.
    pub fn open(
        settings_path: impl Into<std::path::PathBuf>,
        state: StateFile,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(JsonSettingsFile::open(settings_path)?, state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use tempfile::TempDir;

    /// Backend that keeps values in memory and counts writes.
    #[derive(Default)]
    struct MemoryBackend {
        values: Map<String, Value>,
        writes: usize,
    }

    impl SettingsBackend for MemoryBackend {
        fn get(&self, key: &str) -> Option<&Value> {
            self.values.get(key)
        }

        fn set(&mut self, key: &str, value: Value) -> Result<(), ConfigError> {
            self.writes += 1;
            self.values.insert(key.to_string(), value);
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), ConfigError> {
            self.writes += 1;
            self.values.shift_remove(key);
            Ok(())
        }
    }

    fn store() -> (SettingsStore<MemoryBackend>, TempDir) {
        let dir = TempDir::new().unwrap();
        let state = StateFile::new(dir.path().join("state.yaml"));
        (SettingsStore::new(MemoryBackend::default(), state), dir)
    }

    #[test]
    fn test_sequence_write_drops_empty_entries() {
        let (mut store, _dir) = store();
        store
            .set_editor_font_family(vec!["A".to_string(), String::new(), "B".to_string()])
            .unwrap();
        assert_eq!(
            store.font_family_raw(FontTarget::Editor).unwrap().as_deref(),
            Some("A, B")
        );
    }

    #[test]
    fn test_unset_family_reads_as_single_empty_entry() {
        let (store, _dir) = store();
        assert_eq!(store.terminal_font_family().unwrap().entries(), &[""]);
        assert_eq!(store.font_family_raw(FontTarget::Terminal).unwrap(), None);
    }

    #[test]
    fn test_restore_unset_removes_key() {
        let (mut store, _dir) = store();
        store.set_terminal_font_family("Hack").unwrap();
        store
            .restore_font_family(FontTarget::Terminal, None)
            .unwrap();
        assert!(store.backend().get("terminal.integrated.fontFamily").is_none());
    }

    #[test]
    fn test_curation_none_is_never_written() {
        let (mut store, _dir) = store();
        let list = CurationList::from(vec!["X".to_string()]);
        store.set_curation_list(CurationMode::None, &list).unwrap();
        assert_eq!(store.backend().writes, 0);
        assert!(store.curation_list(CurationMode::None).unwrap().is_empty());
    }

    #[test]
    fn test_curation_lists_are_independent_per_mode() {
        let (mut store, _dir) = store();
        store
            .set_curation_list(CurationMode::Allow, &CurationList::from(vec!["A".to_string()]))
            .unwrap();
        store
            .set_curation_list(CurationMode::Deny, &CurationList::from(vec!["D".to_string()]))
            .unwrap();
        assert_eq!(store.curation_list(CurationMode::Allow).unwrap().fonts(), &["A"]);
        assert_eq!(store.curation_list(CurationMode::Deny).unwrap().fonts(), &["D"]);
        assert!(store.curation_list(CurationMode::Favorite).unwrap().is_empty());
    }

    #[test]
    fn test_wrongly_typed_list_is_reported() {
        let (mut store, _dir) = store();
        store
            .settings
            .set("fontFamilySwitcher.allowList", Value::String("Hack".into()))
            .unwrap();
        assert!(matches!(
            store.curation_list(CurationMode::Allow),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_font_cache_presence() {
        let (mut store, _dir) = store();
        assert!(!store.has_font_cache().unwrap());
        store.set_font_cache(Vec::new()).unwrap();
        assert!(!store.has_font_cache().unwrap());
        store.set_font_cache(vec!["Hack".to_string()]).unwrap();
        assert!(store.has_font_cache().unwrap());
    }

    #[test]
    fn test_font_cache_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.yaml");
        let mut first = SettingsStore::new(MemoryBackend::default(), StateFile::new(&path));
        first
            .set_font_cache(vec!["Fira Code".to_string(), "Hack".to_string()])
            .unwrap();

        let mut second = SettingsStore::new(MemoryBackend::default(), StateFile::new(&path));
        assert_eq!(second.font_cache().unwrap(), ["Fira Code", "Hack"]);
    }
}
