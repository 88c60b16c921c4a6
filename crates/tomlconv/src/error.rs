//! Error types for tomlconv

use std::fmt;
use thiserror::Error;

/// Position in the text handed to the failing stage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub offset: usize,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl Pos {
    pub const fn new(offset: usize, line: u32, col: u32) -> Self {
        Self { offset, line, col }
    }

    /// Start of a line, used by the line-oriented table parser
    pub const fn line_start(line: u32) -> Self {
        Self {
            offset: 0,
            line,
            col: 1,
        }
    }
}

/// Error kind for detailed categorization
///
/// Every kind is terminal: the first error aborts the whole conversion.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("missing closing bracket")]
    UnbalancedBracket,
    #[error("missing closing string delimiter")]
    UnterminatedString,
    #[error("missing closing multi-line string delimiter")]
    UnterminatedMultilineString,
    #[error("missing closing literal string delimiter")]
    UnterminatedLiteralString,
    #[error("missing closing multi-line literal string delimiter")]
    UnterminatedMultilineLiteralString,
    #[error("missing closing key group delimiter")]
    UnterminatedKeyGroup,
    #[error("unexpected ']'")]
    UnexpectedCloseBracket,
    #[error("multi-line key group definition is not allowed")]
    DisallowedMultilineKeyGroup,
    #[error("reserved escape sequence inside string")]
    ReservedEscapeSequence,
    #[error("key groups have to be on a line by themselves")]
    KeyGroupNotAlone,
    #[error("syntax error")]
    SyntaxError,
    #[error("unknown value type")]
    UnknownValueType,
    #[error("invalid array definition")]
    InvalidArrayDefinition,
    #[error("invalid inline table definition")]
    InvalidInlineTableDefinition,
    #[error("new lines are not allowed in single line literal strings")]
    NewlineInLiteralString,
    #[error("invalid key")]
    InvalidKey,
    #[error("key already holds a non-table value")]
    KeyConflict,
    #[error("max depth exceeded: {max}")]
    MaxDepthExceeded { max: u16 },
    #[error("max size exceeded: {max}")]
    MaxSizeExceeded { max: usize },
    #[error("unknown conversion mode")]
    UnknownMode,
    #[error("unknown output format")]
    UnknownFormat,
}

/// Main error type for tomlconv
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    pos: Option<Pos>,
    snippet: String,
}

impl Error {
    pub fn new(kind: ErrorKind, snippet: impl Into<String>) -> Self {
        Self {
            kind,
            pos: None,
            snippet: snippet.into(),
        }
    }

    /// Create error at specific position
    pub fn at(kind: ErrorKind, pos: Pos, snippet: impl Into<String>) -> Self {
        Self {
            kind,
            pos: Some(pos),
            snippet: snippet.into(),
        }
    }

    /// Attach a position unless one is already recorded
    pub fn or_at(mut self, pos: Pos) -> Self {
        if self.pos.is_none() {
            self.pos = Some(pos);
        }
        self
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn pos(&self) -> Option<Pos> {
        self.pos
    }

    /// The offending line or value text
    pub fn snippet(&self) -> &str {
        &self.snippet
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pos {
            Some(pos) => write!(f, "error at {pos}: {}", self.kind)?,
            None => write!(f, "error: {}", self.kind)?,
        }
        if !self.snippet.is_empty() {
            write!(f, ": {}", self.snippet)?;
        }
        Ok(())
    }
}

/// Result type alias for tomlconv
pub type Result<T> = std::result::Result<T, Error>;
