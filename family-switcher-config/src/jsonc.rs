//! In-place edits of a JSONC settings document.
//!
//! Only the edited member's text changes. Comments, blank lines and the
//! layout of every other member stay exactly as the user wrote them.

use serde_json::Value;
use std::ops::Range;

/// Indent for members added to an object with no indented member to copy
const DEFAULT_INDENT: &str = "    ";

/// One `"key": value` member of the root object
#[derive(Debug)]
struct Member {
    key: String,
    /// Offset of the key's opening quote
    start: usize,
    value: Range<usize>,
    /// Offset of the comma after the value
    comma: Option<usize>,
}

#[derive(Debug)]
struct RootObject {
    /// Offset of the closing brace
    close: usize,
    members: Vec<Member>,
}

/// Byte cursor over the document. Structural characters are ASCII, so byte
/// offsets found here are always char boundaries.
struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<u8> {
        self.bytes.get(self.pos + 1).copied()
    }

    fn expect(&mut self, byte: u8) -> Option<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Some(())
        } else {
            None
        }
    }

    /// Skip whitespace, `//` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(b), _) if b.is_ascii_whitespace() => self.pos += 1,
                (Some(b'/'), Some(b'/')) => {
                    while let Some(b) = self.peek() {
                        if b == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                (Some(b'/'), Some(b'*')) => {
                    self.pos += 2;
                    while self.pos < self.bytes.len() && !self.bytes[self.pos..].starts_with(b"*/")
                    {
                        self.pos += 1;
                    }
                    self.pos = (self.pos + 2).min(self.bytes.len());
                }
                _ => return,
            }
        }
    }

    fn skip_string(&mut self) -> Option<()> {
        self.expect(b'"')?;
        while let Some(b) = self.peek() {
            self.pos += 1;
            match b {
                b'\\' => self.pos += 1,
                b'"' => return Some(()),
                _ => {}
            }
        }
        None
    }

    fn skip_value(&mut self) -> Option<()> {
        match self.peek()? {
            b'"' => self.skip_string(),
            b'{' | b'[' => {
                let mut depth = 0usize;
                loop {
                    self.skip_trivia();
                    match self.peek()? {
                        b'"' => self.skip_string()?,
                        b'{' | b'[' => {
                            depth += 1;
                            self.pos += 1;
                        }
                        b'}' | b']' => {
                            depth = depth.saturating_sub(1);
                            self.pos += 1;
                            if depth == 0 {
                                return Some(());
                            }
                        }
                        _ => self.pos += 1,
                    }
                }
            }
            _ => {
                let start = self.pos;
                while let Some(b) = self.peek() {
                    if b.is_ascii_whitespace() || matches!(b, b',' | b'}' | b']' | b'/') {
                        break;
                    }
                    self.pos += 1;
                }
                (self.pos > start).then_some(())
            }
        }
    }

    fn root_object(mut self) -> Option<RootObject> {
        self.skip_trivia();
        self.expect(b'{')?;
        let mut members = Vec::new();
        loop {
            self.skip_trivia();
            match self.peek()? {
                b'}' => {
                    return Some(RootObject {
                        close: self.pos,
                        members,
                    });
                }
                b'"' => {
                    let start = self.pos;
                    self.skip_string()?;
                    let key: String = serde_json::from_str(&self.text[start..self.pos]).ok()?;
                    self.skip_trivia();
                    self.expect(b':')?;
                    self.skip_trivia();
                    let value_start = self.pos;
                    self.skip_value()?;
                    let value = value_start..self.pos;
                    self.skip_trivia();
                    let comma = if self.peek() == Some(b',') {
                        self.pos += 1;
                        Some(self.pos - 1)
                    } else {
                        None
                    };
                    members.push(Member {
                        key,
                        start,
                        value,
                        comma,
                    });
                }
                _ => return None,
            }
        }
    }
}

fn line_start(text: &str, at: usize) -> usize {
    text[..at].rfind('\n').map_or(0, |i| i + 1)
}

/// Indentation of the member's line, when the member is the first thing on it.
fn member_indent<'t>(text: &'t str, member: &Member) -> Option<&'t str> {
    let prefix = &text[line_start(text, member.start)..member.start];
    prefix
        .chars()
        .all(|c| c == ' ' || c == '\t')
        .then_some(prefix)
}

fn render_value(value: &Value, indent: &str) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    pretty.replace('\n', &format!("\n{indent}"))
}

/// `text` with the root member `key` set to `value`.
///
/// An existing member has only its value replaced; a new member is appended
/// after the last one. `None` when `text` has no root object.
pub(crate) fn set_member(text: &str, key: &str, value: &Value) -> Option<String> {
    let root = Scanner::new(text).root_object()?;
    let mut out = text.to_string();

    // Duplicate keys resolve to the last one, as in the parsed map
    if let Some(member) = root.members.iter().rev().find(|m| m.key == key) {
        let indent = member_indent(text, member).unwrap_or_default();
        out.replace_range(member.value.clone(), &render_value(value, indent));
        return Some(out);
    }

    let indent = root
        .members
        .last()
        .and_then(|m| member_indent(text, m))
        .unwrap_or(DEFAULT_INDENT);
    let mut at = root.close;
    while at > 0 && text.as_bytes()[at - 1].is_ascii_whitespace() {
        at -= 1;
    }
    let member = format!(
        "\n{indent}{}: {}",
        Value::from(key),
        render_value(value, indent)
    );
    if text[at..root.close].contains('\n') {
        out.insert_str(at, &member);
    } else {
        out.replace_range(at..root.close, &format!("{member}\n"));
    }
    if let Some(last) = root.members.last()
        && last.comma.is_none()
    {
        out.insert(last.value.end, ',');
    }
    Some(out)
}

/// `text` without the root member `key`. Unchanged when the key is absent;
/// `None` when `text` has no root object.
pub(crate) fn remove_member(text: &str, key: &str) -> Option<String> {
    let root = Scanner::new(text).root_object()?;
    let Some(position) = root.members.iter().rposition(|m| m.key == key) else {
        return Some(text.to_string());
    };
    let member = &root.members[position];
    let own_line = member_indent(text, member).is_some();

    let start = if own_line {
        line_start(text, member.start)
    } else {
        member.start
    };
    let mut end = member.comma.map_or(member.value.end, |comma| comma + 1);
    if own_line
        && let Some(newline) = text[end..].find('\n')
        && text[end..end + newline].trim().is_empty()
    {
        end += newline + 1;
    }

    let mut out = text.to_string();
    out.replace_range(start..end, "");
    if member.comma.is_none()
        && position > 0
        && let Some(comma) = root.members[position - 1].comma
    {
        out.remove(comma);
    }
    Some(out)
}
