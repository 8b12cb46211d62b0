//! Parsing wire text into [`Message`]s.
//!
//! A message is a block of `KEY: value` lines, optionally wrapped in a
//! triple-backtick fence:
//!
//! ~~~text
//! ```
//! FROM: CODER
//! TO: USER
//! ACTION: inform
//! DETAILS: Dependencies installed.
//! ```
//! ~~~
//!
//! Keys are uppercase identifiers (`[A-Z][A-Z0-9_-]*`). Each line is split on
//! its first colon and both sides are trimmed, so values may themselves
//! contain colons. A line that does not start with a key continues the value
//! of the previous field, joined with a newline. Blank lines are skipped.

use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, FENCE, Field, Message, Result};

/// Matches `KEY: value` lines after the line has been trimmed.
static KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z0-9_-]*)\s*:(.*)$").expect("Invalid key line regex")
});

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Whether `line`, placed after a field, would start a new field or close the
/// block instead of continuing the field's value.
pub(crate) fn breaks_value(line: &str) -> bool {
    is_fence(line) || KEY_LINE.is_match(line.trim())
}

/// Lines between the first fence and the next one, or every line if unfenced.
fn fenced_body(text: &str) -> Vec<&str> {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|line| is_fence(line)) {
        Some(open) => lines[open + 1..]
            .iter()
            .take_while(|line| !is_fence(line))
            .copied()
            .collect(),
        None => lines,
    }
}

/// Parse wire text into an ordered field mapping.
///
/// Duplicate keys keep their first position and take the last value seen.
/// Keys outside the declared [`Field`] set are kept as-is.
///
/// # Errors
///
/// Returns [`Error::MalformedMessage`] when no `KEY: value` line is found or
/// when the `ACTION` field is absent.
///
/// # Example
///
/// ```
/// use relay_messages::parse;
///
/// let message = parse("```\nFROM: CODER\nTO: USER\nACTION: inform\nDETAILS: a: b\n```").unwrap();
/// assert_eq!(message.get("DETAILS"), Some("a: b"));
/// ```
pub fn parse(text: &str) -> Result<Message> {
    let mut message = Message::new();
    let mut current: Option<String> = None;

    for line in fenced_body(text) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = KEY_LINE.captures(line) {
            let key = caps[1].to_string();
            message.insert(key.clone(), caps[2].trim());
            current = Some(key);
        } else if let Some(value) = current.as_deref().and_then(|key| message.value_mut(key)) {
            if !value.is_empty() {
                value.push('\n');
            }
            value.push_str(line);
        } else {
            tracing::debug!(line, "Ignoring text before the first field");
        }
    }

    if message.is_empty() {
        return Err(Error::malformed("no `KEY: value` lines found"));
    }
    if !message.contains(Field::Action.as_str()) {
        return Err(Error::malformed("missing ACTION field"));
    }

    tracing::debug!(fields = message.len(), "Parsed message");
    Ok(message)
}

/// Incrementally groups lines of a stream into fenced message blocks.
///
/// Each completed block is returned with its fences so it can be passed
/// straight to [`parse`]. Text between blocks is dropped with a warning;
/// text after the last block is returned by [`finish`](Self::finish) as an
/// unfenced message.
#[derive(Debug, Default)]
pub struct MessageAssembler {
    buffer: Vec<String>,
    loose: Vec<String>,
    inside: bool,
}

impl MessageAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line; returns a message once its closing fence is seen.
    pub fn push_line(&mut self, line: &str) -> Option<String> {
        if !is_fence(line) {
            if self.inside {
                self.buffer.push(line.to_string());
            } else if !line.trim().is_empty() {
                self.loose.push(line.to_string());
            }
            return None;
        }

        if self.inside {
            self.inside = false;
            let body = std::mem::take(&mut self.buffer);
            let mut block = String::from(FENCE);
            block.push('\n');
            for line in body {
                block.push_str(&line);
                block.push('\n');
            }
            block.push_str(FENCE);
            Some(block)
        } else {
            if !self.loose.is_empty() {
                tracing::warn!(lines = self.loose.len(), "Dropping text outside message fences");
                self.loose.clear();
            }
            self.inside = true;
            None
        }
    }

    /// Flush what is left at the end of the stream: an unterminated block,
    /// or text after the last block, which is passed on unfenced.
    pub fn finish(self) -> Option<String> {
        if self.inside {
            if self.buffer.is_empty() {
                return None;
            }
            let mut block = String::from(FENCE);
            for line in self.buffer {
                block.push('\n');
                block.push_str(&line);
            }
            Some(block)
        } else if self.loose.is_empty() {
            None
        } else {
            Some(self.loose.join("\n"))
        }
    }
}

/// Split text holding several fenced messages into one string per message.
pub fn split_messages(text: &str) -> Vec<String> {
    let mut assembler = MessageAssembler::new();
    let mut messages: Vec<String> = text
        .lines()
        .filter_map(|line| assembler.push_line(line))
        .collect();
    messages.extend(assembler.finish());
    messages
}
