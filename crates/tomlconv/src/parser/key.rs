//! Quote tracking and dotted key handling shared by the parsers

use crate::error::{Error, ErrorKind, Result};
use crate::escape::decode_basic;

/// Tracks whether a scan position is inside a basic or literal string
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Quotes {
    basic: bool,
    literal: bool,
    escaped: bool,
}

impl Quotes {
    pub(crate) fn is_open(&self) -> bool {
        self.basic || self.literal
    }

    /// Update state with the next char
    pub(crate) fn feed(&mut self, ch: char) {
        if self.basic {
            if self.escaped {
                self.escaped = false;
            } else if ch == '\\' {
                self.escaped = true;
            } else if ch == '"' {
                self.basic = false;
            }
        } else if self.literal {
            if ch == '\'' {
                self.literal = false;
            }
        } else if ch == '"' {
            self.basic = true;
        } else if ch == '\'' {
            self.literal = true;
        }
    }
}

/// Byte offset of the first `=` outside any quoted key
pub(crate) fn find_assignment(line: &str) -> Option<usize> {
    let mut quotes = Quotes::default();
    for (i, ch) in line.char_indices() {
        let was_open = quotes.is_open();
        quotes.feed(ch);
        if ch == '=' && !was_open && !quotes.is_open() {
            return Some(i);
        }
    }
    None
}

/// Whether `target` occurs outside any quoted section of `text`
pub(crate) fn has_unquoted(text: &str, target: char) -> bool {
    let mut quotes = Quotes::default();
    text.chars().any(|ch| {
        let was_open = quotes.is_open();
        quotes.feed(ch);
        ch == target && !was_open
    })
}

/// Split `text` on separators that sit outside strings, brackets and braces
pub(crate) fn split_top_level(text: &str, separator: char) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut quotes = Quotes::default();
    let mut brackets = 0usize;
    let mut braces = 0usize;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        let was_open = quotes.is_open();
        quotes.feed(ch);
        if was_open || quotes.is_open() {
            continue;
        }
        match ch {
            '[' => brackets += 1,
            '{' => braces += 1,
            ']' => brackets = unnest(brackets, text)?,
            '}' => braces = unnest(braces, text)?,
            c if c == separator && brackets == 0 && braces == 0 => {
                parts.push(text.get(start..i).unwrap_or_default());
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(text.get(start..).unwrap_or_default());
    Ok(parts)
}

fn unnest(depth: usize, text: &str) -> Result<usize> {
    depth
        .checked_sub(1)
        .ok_or_else(|| Error::new(ErrorKind::InvalidInlineTableDefinition, text))
}

/// Split a dotted key into its segments
///
/// Whitespace around dots is ignored. Quoted segments keep dots and spaces;
/// basic-quoted segments have their escapes decoded.
pub(crate) fn split_key_path(text: &str) -> Result<Vec<String>> {
    let mut segments = Vec::new();
    let mut quotes = Quotes::default();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        let was_open = quotes.is_open();
        quotes.feed(ch);
        if ch == '.' && !was_open && !quotes.is_open() {
            segments.push(key_segment(text.get(start..i).unwrap_or_default(), text)?);
            start = i + 1;
        }
    }
    segments.push(key_segment(text.get(start..).unwrap_or_default(), text)?);
    Ok(segments)
}

fn key_segment(raw: &str, full: &str) -> Result<String> {
    let raw = raw.trim();
    if let Some(inner) = quoted(raw, '"') {
        return Ok(decode_basic(inner).into_owned());
    }
    if let Some(inner) = quoted(raw, '\'') {
        return Ok(inner.to_owned());
    }
    let bare_ok = !raw.is_empty()
        && !raw
            .chars()
            .any(|c| c.is_whitespace() || "[]{}=,\"'#".contains(c));
    if bare_ok {
        Ok(raw.to_owned())
    } else {
        Err(Error::new(ErrorKind::InvalidKey, full))
    }
}

fn quoted(raw: &str, quote: char) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    raw.strip_prefix(quote)?.strip_suffix(quote)
}
