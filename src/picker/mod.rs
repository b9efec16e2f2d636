//! Selection UI seams.
//!
//! Commands talk to the user only through [`Prompt`] (pickers and
//! confirmations) and [`Notifier`] (result messages). The terminal
//! implementations live in [`terminal`]; tests drive the commands with
//! scripted fakes.

pub mod filter;
pub mod terminal;

use anyhow::Result;

pub use filter::{MatchedItem, rank_items};
pub use terminal::{TerminalNotifier, TerminalPrompt};

/// One row in a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub label: String,
    /// Dimmed text after the label, also searched
    pub description: Option<String>,
    /// Pre-checked state in multi-select pickers
    pub picked: bool,
}

impl PickItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            picked: false,
        }
    }

    pub fn with_description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn with_picked(mut self, picked: bool) -> Self {
        self.picked = picked;
        self
    }
}

/// Picker contents and placeholder text.
#[derive(Debug, Clone, Copy)]
pub struct PickRequest<'a> {
    pub placeholder: &'a str,
    pub items: &'a [PickItem],
}

/// Interactive selection.
pub trait Prompt {
    /// Single-select with search. `on_highlight` runs whenever the highlighted
    /// row changes. Returns the index into `request.items`, or `None` when the
    /// user dismissed the picker.
    fn pick_one(
        &mut self,
        request: PickRequest<'_>,
        on_highlight: &mut dyn FnMut(&PickItem),
    ) -> Result<Option<usize>>;

    /// Multi-select starting from each item's `picked` state. Returns the
    /// checked indices in item order, or `None` when dismissed.
    fn pick_many(&mut self, request: PickRequest<'_>) -> Result<Option<Vec<usize>>>;

    /// Ask whether to run `action`; true when accepted.
    fn confirm(&mut self, message: &str, action: &str) -> Result<bool>;
}

/// User-facing result messages.
pub trait Notifier {
    fn info(&mut self, message: &str);
    fn error(&mut self, message: &str);
}
