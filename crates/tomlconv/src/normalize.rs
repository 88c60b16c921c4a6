//! Input normalization
//!
//! A single left-to-right scan that strips comments, folds newlines inside
//! arrays and inline values, joins line continuations in multi-line basic
//! strings, and checks that every bracket and string is closed. The output is
//! what the table parser consumes line by line.

use tracing::{debug, instrument, trace};

use crate::cursor::Cursor;
use crate::error::{Error, ErrorKind, Pos, Result};

const TRIPLE_BASIC: &str = "\"\"\"";
const TRIPLE_LITERAL: &str = "'''";

/// Normalize raw input text
///
/// Tabs are removed and `\r\n` / `\n\r` collapse to `\n` before the scan.
#[instrument(level = "debug", skip_all, fields(len = raw.len()))]
pub fn normalize(raw: &str) -> Result<String> {
    let text = raw
        .replace("\r\n", "\n")
        .replace("\n\r", "\n")
        .replace('\t', "");
    let normalized = Normalizer::new(&text).run()?;
    debug!(bytes = normalized.len(), "normalized input");
    Ok(normalized)
}

#[derive(Debug, Default)]
struct ScanState {
    basic: bool,
    literal: bool,
    multiline_basic: bool,
    multiline_literal: bool,
    brackets: usize,
    key_group: bool,
}

impl ScanState {
    fn in_string(&self) -> bool {
        self.basic || self.literal || self.multiline_basic || self.multiline_literal
    }
}

struct Normalizer {
    cursor: Cursor,
    state: ScanState,
    out: String,
    /// Text consumed since the last newline
    line: String,
    /// Previous char was an unescaped backslash inside a basic string
    escaped: bool,
    opened_at: Pos,
    opened_line: String,
}

impl Normalizer {
    fn new(text: &str) -> Self {
        Self {
            cursor: Cursor::new(text),
            state: ScanState::default(),
            out: String::with_capacity(text.len()),
            line: String::new(),
            escaped: false,
            opened_at: Pos::line_start(1),
            opened_line: String::new(),
        }
    }

    fn run(mut self) -> Result<String> {
        while let Some(ch) = self.cursor.current() {
            let pos = self.cursor.position();
            let escaped = std::mem::take(&mut self.escaped);
            let in_string = self.state.in_string();

            match ch {
                '[' if !in_string => {
                    self.state.brackets += 1;
                    if self.state.brackets == 1 {
                        self.mark_open(pos);
                        if self.line.trim().is_empty() {
                            self.state.key_group = true;
                        }
                    }
                }
                ']' if !in_string => {
                    if self.state.brackets == 0 {
                        return Err(self.error_here(ErrorKind::UnexpectedCloseBracket, pos, "]"));
                    }
                    self.state.brackets -= 1;
                    if self.state.brackets == 0 {
                        self.state.key_group = false;
                    }
                }
                '\n' if self.state.brackets > 0 => {
                    if self.state.key_group {
                        return Err(self.error_here(
                            ErrorKind::DisallowedMultilineKeyGroup,
                            pos,
                            "",
                        ));
                    }
                    trace!(line = pos.line, "folding newline inside brackets");
                    self.consume(ch, false);
                    continue;
                }
                '\n' if self.state.basic => {
                    return Err(self.error_here(ErrorKind::UnterminatedString, pos, ""));
                }
                '\n' if self.state.literal => {
                    return Err(self.error_here(ErrorKind::UnterminatedLiteralString, pos, ""));
                }
                '"' if !escaped && !self.state.literal && !self.state.multiline_literal => {
                    if !self.state.basic && self.cursor.starts_with(TRIPLE_BASIC) {
                        self.state.multiline_basic = !self.state.multiline_basic;
                        if self.state.multiline_basic {
                            self.mark_open(pos);
                        }
                        self.consume_str(TRIPLE_BASIC);
                        continue;
                    }
                    if !self.state.multiline_basic {
                        self.state.basic = !self.state.basic;
                        if self.state.basic {
                            self.mark_open(pos);
                        }
                    }
                }
                '\'' if !self.state.basic && !self.state.multiline_basic => {
                    if !self.state.literal && self.cursor.starts_with(TRIPLE_LITERAL) {
                        self.state.multiline_literal = !self.state.multiline_literal;
                        if self.state.multiline_literal {
                            self.mark_open(pos);
                        }
                        self.consume_str(TRIPLE_LITERAL);
                        continue;
                    }
                    if !self.state.multiline_literal {
                        self.state.literal = !self.state.literal;
                        if self.state.literal {
                            self.mark_open(pos);
                        }
                    }
                }
                '\\' if !escaped && (self.state.basic || self.state.multiline_basic) => {
                    let next = self.cursor.peek(1);
                    if self.state.basic && !is_escape_char(next) {
                        let sequence: String = ['\\'].into_iter().chain(next).collect();
                        return Err(self.error_here(
                            ErrorKind::ReservedEscapeSequence,
                            pos,
                            &sequence,
                        ));
                    }
                    if self.state.multiline_basic && self.ends_line_after_spaces() {
                        trace!(line = pos.line, "joining line continuation");
                        self.skip_continuation();
                        continue;
                    }
                    self.escaped = true;
                }
                '#' if !in_string && !self.state.key_group => {
                    self.skip_comment();
                    continue;
                }
                _ => {}
            }

            self.consume(ch, true);
        }

        self.finish()
    }

    fn finish(self) -> Result<String> {
        let kind = if self.state.key_group {
            ErrorKind::UnterminatedKeyGroup
        } else if self.state.brackets > 0 {
            ErrorKind::UnbalancedBracket
        } else if self.state.basic {
            ErrorKind::UnterminatedString
        } else if self.state.multiline_basic {
            ErrorKind::UnterminatedMultilineString
        } else if self.state.literal {
            ErrorKind::UnterminatedLiteralString
        } else if self.state.multiline_literal {
            ErrorKind::UnterminatedMultilineLiteralString
        } else {
            return Ok(self.out);
        };
        Err(Error::at(kind, self.opened_at, self.opened_line.trim()))
    }

    fn consume(&mut self, ch: char, keep: bool) {
        self.cursor.advance();
        if keep {
            self.out.push(ch);
        }
        if ch == '\n' {
            self.line.clear();
        } else {
            self.line.push(ch);
        }
    }

    fn consume_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.consume(ch, true);
        }
    }

    fn mark_open(&mut self, pos: Pos) {
        self.opened_at = pos;
        self.opened_line.clone_from(&self.line);
    }

    /// Backslash followed by optional spaces and a newline
    fn ends_line_after_spaces(&self) -> bool {
        let mut ahead = 1;
        while self.cursor.peek(ahead) == Some(' ') {
            ahead += 1;
        }
        self.cursor.peek(ahead) == Some('\n')
    }

    /// Drop the backslash and every following space or newline
    fn skip_continuation(&mut self) {
        self.cursor.advance();
        self.cursor.skip_while(|c| c == ' ' || c == '\n');
        self.line.clear();
    }

    /// Drop a comment up to, not including, the newline
    fn skip_comment(&mut self) {
        self.cursor.skip_while(|c| c != '\n');
    }

    fn error_here(&self, kind: ErrorKind, pos: Pos, suffix: &str) -> Error {
        let snippet = format!("{}{}", self.line, suffix);
        Error::at(kind, pos, snippet.trim())
    }
}

fn is_escape_char(next: Option<char>) -> bool {
    matches!(
        next,
        Some('b' | 't' | 'n' | 'f' | 'r' | 'u' | 'U' | '"' | '\\' | ' ')
    )
}
