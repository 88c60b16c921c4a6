//! Character cursor for the normalizer scan

use crate::error::Pos;

/// Cursor over Unicode scalars with position tracking
#[derive(Clone, Debug)]
pub struct Cursor {
    input: Vec<char>,
    pos: usize,
    offset: usize,
    line: u32,
    col: u32,
}

impl Cursor {
    /// Create cursor from text
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    /// Get current char without consuming
    pub fn current(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Peek at char ahead without consuming
    pub fn peek(&self, ahead: usize) -> Option<char> {
        self.input.get(self.pos.saturating_add(ahead)).copied()
    }

    /// True if the next chars are exactly `expected`
    pub fn starts_with(&self, expected: &str) -> bool {
        expected
            .chars()
            .enumerate()
            .all(|(i, ch)| self.peek(i) == Some(ch))
    }

    /// Advance cursor by one char
    pub fn advance(&mut self) {
        if let Some(ch) = self.current() {
            self.pos += 1;
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    /// Advance while the current char satisfies `pred`
    pub fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.current() {
            if !pred(ch) {
                break;
            }
            self.advance();
        }
    }

    /// Get current position
    pub const fn position(&self) -> Pos {
        Pos::new(self.offset, self.line, self.col)
    }
}
