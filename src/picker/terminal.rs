//! Crossterm pickers drawn inline below the cursor.
//!
//! Type to search, arrow keys to move, Enter to confirm. In multi-select
//! pickers Tab toggles the highlighted row. Esc and Ctrl+C dismiss the picker
//! so callers can undo a live preview.

use super::filter::{MatchedItem, rank_items};
use super::{Notifier, PickItem, PickRequest, Prompt};
use anyhow::Result;
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Stylize},
    terminal,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::io::{self, Write};

/// Rows shown below the search line
const VISIBLE_ROWS: usize = 10;

/// Raw mode for the lifetime of a picker; restored on drop.
struct RawGuard {
    cursor_hidden: bool,
}

impl RawGuard {
    fn enter(hide_cursor: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if hide_cursor {
            io::stdout().execute(cursor::Hide)?;
        }
        Ok(RawGuard {
            cursor_hidden: hide_cursor,
        })
    }
}

impl Drop for RawGuard {
    fn drop(&mut self) {
        if self.cursor_hidden {
            let _ = io::stdout().execute(cursor::Show);
        }
        let _ = terminal::disable_raw_mode();
    }
}

/// What a key press did to the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyOutcome {
    Redraw,
    Toggle,
    Confirm,
    Cancel,
    Ignore,
}

/// Search query, ranked matches and the highlighted row
struct PickerState {
    query: String,
    matches: Vec<MatchedItem>,
    cursor: usize,
    /// Highlight last reported by [`Self::highlight_change`]
    reported: Option<usize>,
}

impl PickerState {
    fn new(matcher: &SkimMatcherV2, items: &[PickItem]) -> Self {
        let matches = rank_items(matcher, items, "");
        let reported = matches.first().map(|m| m.index);
        Self {
            query: String::new(),
            matches,
            cursor: 0,
            reported,
        }
    }

    fn refilter(&mut self, matcher: &SkimMatcherV2, items: &[PickItem]) {
        self.matches = rank_items(matcher, items, &self.query);
        self.cursor = 0;
    }

    /// Index into the request items of the highlighted row
    fn highlighted(&self) -> Option<usize> {
        self.matches.get(self.cursor).map(|m| m.index)
    }

    /// The newly highlighted item when it differs from the last one reported.
    ///
    /// The row highlighted when the picker opens is never reported, and a
    /// refilter only reports when the top row changed.
    fn highlight_change(&mut self) -> Option<usize> {
        let now = self.highlighted();
        if now == self.reported {
            return None;
        }
        self.reported = now;
        now
    }

    fn window_start(&self) -> usize {
        (self.cursor + 1).saturating_sub(VISIBLE_ROWS)
    }

    fn handle_key(&mut self, key: KeyEvent, matcher: &SkimMatcherV2, items: &[PickItem]) -> KeyOutcome {
        if key.kind == KeyEventKind::Release {
            return KeyOutcome::Ignore;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyOutcome::Cancel;
        }
        match key.code {
            KeyCode::Esc => KeyOutcome::Cancel,
            KeyCode::Enter => KeyOutcome::Confirm,
            KeyCode::Tab => KeyOutcome::Toggle,
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                KeyOutcome::Redraw
            }
            KeyCode::Down => {
                if self.cursor + 1 < self.matches.len() {
                    self.cursor += 1;
                }
                KeyOutcome::Redraw
            }
            KeyCode::PageUp => {
                self.cursor = self.cursor.saturating_sub(VISIBLE_ROWS);
                KeyOutcome::Redraw
            }
            KeyCode::PageDown => {
                self.cursor = (self.cursor + VISIBLE_ROWS).min(self.matches.len().saturating_sub(1));
                KeyOutcome::Redraw
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter(matcher, items);
                KeyOutcome::Redraw
            }
            KeyCode::Char(c) => {
                self.query.push(c);
                self.refilter(matcher, items);
                KeyOutcome::Redraw
            }
            _ => KeyOutcome::Ignore,
        }
    }
}

/// Interactive prompts on stdout.
pub struct TerminalPrompt {
    matcher: SkimMatcherV2,
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl Prompt for TerminalPrompt {
    fn pick_one(
        &mut self,
        request: PickRequest<'_>,
        on_highlight: &mut dyn FnMut(&PickItem),
    ) -> Result<Option<usize>> {
        let _guard = RawGuard::enter(false)?;
        let mut out = io::stdout();
        let mut state = PickerState::new(&self.matcher, request.items);

        render(&mut out, &request, &state, None)?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match state.handle_key(key, &self.matcher, request.items) {
                KeyOutcome::Cancel => {
                    finish(&mut out, request.placeholder, None)?;
                    return Ok(None);
                }
                KeyOutcome::Confirm => {
                    if let Some(index) = state.highlighted() {
                        finish(&mut out, request.placeholder, Some(request.items[index].label.as_str()))?;
                        return Ok(Some(index));
                    }
                }
                KeyOutcome::Redraw => {
                    if let Some(index) = state.highlight_change() {
                        on_highlight(&request.items[index]);
                    }
                    render(&mut out, &request, &state, None)?;
                }
                KeyOutcome::Toggle | KeyOutcome::Ignore => {}
            }
        }
    }

    fn pick_many(&mut self, request: PickRequest<'_>) -> Result<Option<Vec<usize>>> {
        let _guard = RawGuard::enter(false)?;
        let mut out = io::stdout();
        let mut state = PickerState::new(&self.matcher, request.items);
        let mut checked: Vec<bool> = request.items.iter().map(|item| item.picked).collect();

        render(&mut out, &request, &state, Some(checked.as_slice()))?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            match state.handle_key(key, &self.matcher, request.items) {
                KeyOutcome::Cancel => {
                    finish(&mut out, request.placeholder, None)?;
                    return Ok(None);
                }
                KeyOutcome::Confirm => {
                    let selected: Vec<usize> = checked
                        .iter()
                        .enumerate()
                        .filter_map(|(i, on)| on.then_some(i))
                        .collect();
                    let summary = format!("{} selected", selected.len());
                    finish(&mut out, request.placeholder, Some(summary.as_str()))?;
                    return Ok(Some(selected));
                }
                KeyOutcome::Toggle => {
                    if let Some(flag) = state.highlighted().and_then(|i| checked.get_mut(i)) {
                        *flag = !*flag;
                    }
                    render(&mut out, &request, &state, Some(checked.as_slice()))?;
                }
                KeyOutcome::Redraw => render(&mut out, &request, &state, Some(checked.as_slice()))?,
                KeyOutcome::Ignore => {}
            }
        }
    }

    fn confirm(&mut self, message: &str, action: &str) -> Result<bool> {
        let _guard = RawGuard::enter(false)?;
        let mut out = io::stdout();

        out.queue(style::Print(style::style("? ").green().bold()))?;
        out.queue(style::Print(message))?;
        out.queue(style::Print(" "))?;
        out.queue(style::Print(style::style(format!("{action}? [Y/n] ")).dark_grey()))?;
        out.flush()?;

        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            let accepted = match key.code {
                KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => false,
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => false,
                _ => continue,
            };
            out.queue(style::Print(if accepted { "Yes\r\n" } else { "No\r\n" }))?;
            out.flush()?;
            return Ok(accepted);
        }
    }
}

/// Redraw the picker from the search line down, then park the cursor after
/// the query text.
fn render(
    out: &mut impl Write,
    request: &PickRequest<'_>,
    state: &PickerState,
    checked: Option<&[bool]>,
) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    out.queue(style::Print(style::style("? ").green().bold()))?;
    out.queue(style::Print(style::style(request.placeholder).bold()))?;
    out.queue(style::Print(" "))?;
    if state.query.is_empty() {
        out.queue(style::Print(style::style("(type to search)").dark_grey()))?;
    } else {
        out.queue(style::Print(&state.query))?;
    }
    out.queue(style::Print("\r\n"))?;

    let mut lines: u16 = 1;
    let start = state.window_start();
    for (row, matched) in state.matches.iter().enumerate().skip(start).take(VISIBLE_ROWS) {
        let item = &request.items[matched.index];
        let active = row == state.cursor;
        out.queue(style::Print(if active {
            style::style("> ").cyan().bold()
        } else {
            style::style("  ")
        }))?;
        if let Some(checked) = checked {
            let mark = if checked[matched.index] { "[x] " } else { "[ ] " };
            out.queue(style::Print(style::style(mark).green()))?;
        }
        print_label(out, &item.label, &matched.indices, active)?;
        if let Some(description) = &item.description {
            out.queue(style::Print(style::style(format!("  {description}")).dark_grey()))?;
        }
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    if state.matches.is_empty() {
        out.queue(style::Print(style::style("  No matching fonts").dark_grey()))?;
        out.queue(style::Print("\r\n"))?;
        lines += 1;
    }

    let help = if checked.is_some() {
        "↑↓ move, tab toggle, enter confirm, esc cancel"
    } else {
        "↑↓ move, enter select, esc cancel"
    };
    out.queue(style::Print(style::style(format!("  {help}")).dark_grey()))?;
    lines += 1;

    out.queue(cursor::MoveUp(lines - 1))?;
    let col = 2 + request.placeholder.chars().count() + 1 + state.query.chars().count();
    out.queue(cursor::MoveToColumn(u16::try_from(col).unwrap_or(u16::MAX)))?;
    out.flush()
}

fn print_label(out: &mut impl Write, label: &str, indices: &[usize], active: bool) -> io::Result<()> {
    for (i, c) in label.chars().enumerate() {
        let styled = if indices.contains(&i) {
            style::style(c).yellow().bold()
        } else if active {
            style::style(c).cyan()
        } else {
            style::style(c)
        };
        out.queue(style::Print(styled))?;
    }
    Ok(())
}

/// Clear the picker and leave a one-line summary.
fn finish(out: &mut impl Write, placeholder: &str, value: Option<&str>) -> io::Result<()> {
    out.queue(cursor::MoveToColumn(0))?;
    out.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;
    match value {
        Some(value) => {
            out.queue(style::Print(style::style("✔ ").green().bold()))?;
            out.queue(style::Print(style::style(placeholder).bold()))?;
            out.queue(style::Print(" "))?;
            out.queue(style::Print(style::style(value).cyan()))?;
        }
        None => {
            out.queue(style::Print(style::style("✘ ").red().bold()))?;
            out.queue(style::Print(style::style(placeholder).bold()))?;
            out.queue(style::Print(style::style(" cancelled").dark_grey()))?;
        }
    }
    out.queue(style::Print("\r\n"))?;
    out.flush()
}

/// Prints result messages; errors go to stderr.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&mut self, message: &str) {
        println!("{} {}", style::style("ℹ").blue().bold(), message);
    }

    fn error(&mut self, message: &str) {
        eprintln!("{} {}", style::style("✘").red().bold(), message);
    }
}
