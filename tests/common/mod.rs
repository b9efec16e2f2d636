//! Shared integration test helpers for family-switcher.
//!
//! Provides a scripted [`Prompt`], a recording [`Notifier`], a fixed font
//! source and a [`TestEnv`] that keeps the settings and state files inside a
//! temp directory.
//!
//! Note: Rust integration tests use `mod common;` (not `use`) to bring in
//! helpers from `tests/common/mod.rs`. The `#[allow(dead_code)]` attribute
//! suppresses warnings when only a subset of helpers are used per file.

#![allow(dead_code)]

use anyhow::{Result, bail};
use family_switcher::picker::{Notifier, PickItem, PickRequest, Prompt};
use family_switcher::{Switcher, SwitcherOptions};
use family_switcher_config::{SettingsStore, StateFile, ToolState};
use family_switcher_fonts::FontSource;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use tempfile::TempDir;

/// One scripted answer to a prompt.
#[derive(Debug, Clone)]
pub enum Step {
    /// Highlight each label in turn, then pick `pick` (dismiss when `None`)
    One {
        highlight: Vec<String>,
        pick: Option<String>,
    },
    /// Confirm the multi-select with these labels checked (dismiss when `None`)
    Many(Option<Vec<String>>),
    Confirm(bool),
    /// Highlight each label, then replace the settings file with a directory
    /// so later writes fail, and fail the prompt
    Crash { highlight: Vec<String> },
}

pub fn pick(highlight: &[&str], pick: Option<&str>) -> Step {
    Step::One {
        highlight: highlight.iter().map(|s| s.to_string()).collect(),
        pick: pick.map(str::to_string),
    }
}

pub fn pick_many(labels: &[&str]) -> Step {
    Step::Many(Some(labels.iter().map(|s| s.to_string()).collect()))
}

/// What the scripted prompt saw.
#[derive(Debug, Default)]
pub struct PromptLog {
    pub placeholders: Vec<String>,
    /// Items of every picker shown, in order
    pub items: Vec<Vec<PickItem>>,
    pub confirmations: Vec<(String, String)>,
    /// Settings file contents right after each highlight callback
    pub snapshots: Vec<Option<String>>,
}

pub struct ScriptedPrompt {
    steps: VecDeque<Step>,
    log: Rc<RefCell<PromptLog>>,
    watch: PathBuf,
}

impl ScriptedPrompt {
    fn next_step(&mut self) -> Result<Step> {
        match self.steps.pop_front() {
            Some(step) => Ok(step),
            None => bail!("prompt shown with no scripted answer left"),
        }
    }

    fn record(&self, request: &PickRequest<'_>) {
        let mut log = self.log.borrow_mut();
        log.placeholders.push(request.placeholder.to_string());
        log.items.push(request.items.to_vec());
    }
}

fn index_of(items: &[PickItem], label: &str) -> Result<usize> {
    match items.iter().position(|item| item.label == label) {
        Some(index) => Ok(index),
        None => bail!("no picker item labelled {label:?}"),
    }
}

impl Prompt for ScriptedPrompt {
    fn pick_one(
        &mut self,
        request: PickRequest<'_>,
        on_highlight: &mut dyn FnMut(&PickItem),
    ) -> Result<Option<usize>> {
        self.record(&request);
        let (highlight, pick) = match self.next_step()? {
            Step::One { highlight, pick } => (highlight, Some(pick)),
            Step::Crash { highlight } => (highlight, None),
            _ => bail!("expected a single-select prompt"),
        };
        for label in &highlight {
            let index = index_of(request.items, label)?;
            on_highlight(&request.items[index]);
            let snapshot = fs::read_to_string(&self.watch).ok();
            self.log.borrow_mut().snapshots.push(snapshot);
        }
        let Some(pick) = pick else {
            fs::remove_file(&self.watch)?;
            fs::create_dir(&self.watch)?;
            bail!("picker crashed");
        };
        pick.map(|label| index_of(request.items, &label)).transpose()
    }

    fn pick_many(&mut self, request: PickRequest<'_>) -> Result<Option<Vec<usize>>> {
        self.record(&request);
        let Step::Many(labels) = self.next_step()? else {
            bail!("expected a multi-select prompt");
        };
        labels
            .map(|labels| {
                labels
                    .iter()
                    .map(|label| index_of(request.items, label))
                    .collect()
            })
            .transpose()
    }

    fn confirm(&mut self, message: &str, action: &str) -> Result<bool> {
        self.log
            .borrow_mut()
            .confirmations
            .push((message.to_string(), action.to_string()));
        let Step::Confirm(answer) = self.next_step()? else {
            bail!("expected a confirmation");
        };
        Ok(answer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl Notifier for RecordingNotifier {
    fn info(&mut self, message: &str) {
        self.notices.borrow_mut().push(Notice::Info(message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.notices
            .borrow_mut()
            .push(Notice::Error(message.to_string()));
    }
}

/// Font source returning a fixed list, or failing.
pub struct StaticFontSource(pub Result<Vec<String>, String>);

impl StaticFontSource {
    pub fn fonts(names: &[&str]) -> Self {
        Self(Ok(names.iter().map(|s| s.to_string()).collect()))
    }

    pub fn failing(message: &str) -> Self {
        Self(Err(message.to_string()))
    }
}

impl FontSource for StaticFontSource {
    fn family_names(&self) -> Result<Vec<String>> {
        match &self.0 {
            Ok(names) => Ok(names.clone()),
            Err(message) => bail!("{message}"),
        }
    }
}

/// Temp settings and state files plus handles on what the fakes recorded.
///
/// The `TempDir` is dropped with the env; keep the env alive for the test.
pub struct TestEnv {
    pub dir: TempDir,
    pub settings_path: PathBuf,
    pub state_path: PathBuf,
    pub notices: Rc<RefCell<Vec<Notice>>>,
    pub prompts: Rc<RefCell<PromptLog>>,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let settings_path = dir.path().join("User").join("settings.json");
        let state_path = dir.path().join("state.yaml");
        Self {
            dir,
            settings_path,
            state_path,
            notices: Rc::default(),
            prompts: Rc::default(),
        }
    }

    /// Write `json` as the editor settings file.
    pub fn write_settings(&self, json: &str) {
        if let Some(parent) = self.settings_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create settings dir");
        }
        fs::write(&self.settings_path, json).expect("Failed to write settings");
    }

    pub fn settings(&self) -> Value {
        let contents = fs::read_to_string(&self.settings_path).expect("settings file missing");
        serde_json::from_str(&contents).expect("settings file is not JSON")
    }

    pub fn setting(&self, key: &str) -> Option<Value> {
        if !self.settings_path.exists() {
            return None;
        }
        self.settings().get(key).cloned()
    }

    pub fn seed_cache(&self, fonts: &[&str]) {
        let state = ToolState {
            font_cache: fonts.iter().map(|s| s.to_string()).collect(),
        };
        StateFile::new(&self.state_path)
            .save(&state)
            .expect("Failed to seed font cache");
    }

    pub fn cached_fonts(&self) -> Vec<String> {
        StateFile::new(&self.state_path)
            .load()
            .expect("Failed to read state")
            .font_cache
    }

    /// A switcher over this env's files answering prompts from `steps`.
    pub fn switcher(
        &self,
        steps: Vec<Step>,
        fonts: StaticFontSource,
        options: SwitcherOptions,
    ) -> Switcher {
        let store = SettingsStore::open(&self.settings_path, StateFile::new(&self.state_path))
            .expect("Failed to open settings store");
        let prompt = ScriptedPrompt {
            steps: steps.into(),
            log: Rc::clone(&self.prompts),
            watch: self.settings_path.clone(),
        };
        let notifier = RecordingNotifier {
            notices: Rc::clone(&self.notices),
        };
        Switcher::new(
            store,
            Box::new(prompt),
            Box::new(notifier),
            Box::new(fonts),
            options,
        )
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn infos(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter_map(|n| match n {
                Notice::Info(message) => Some(message),
                Notice::Error(_) => None,
            })
            .collect()
    }

    /// Labels of the `n`th picker shown
    pub fn picker_labels(&self, n: usize) -> Vec<String> {
        self.prompts.borrow().items[n]
            .iter()
            .map(|item| item.label.clone())
            .collect()
    }
}

/// Font family value from a settings snapshot
pub fn snapshot_value(snapshot: &Option<String>, key: &str) -> Option<String> {
    let contents = snapshot.as_ref()?;
    let value: Value = serde_json::from_str(contents).ok()?;
    value.get(key)?.as_str().map(str::to_string)
}
