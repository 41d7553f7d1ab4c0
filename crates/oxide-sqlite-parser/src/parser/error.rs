//! Parser error types.

use core::fmt;

use serde::Serialize;

use crate::lexer::{Keyword, Position};

/// Where an error occurred: byte offset, 1-based line and column.
pub type Location = Position;

/// What kind of syntax error was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// The input is a valid prefix that was cut short. Only reported in
    /// streaming mode, where more input may still arrive.
    Incomplete,
    /// The input cannot be parsed.
    #[serde(rename = "SyntaxError")]
    Syntax,
    /// Complete statements were followed by text that is not a statement.
    TrailingInput,
}

impl ErrorKind {
    /// Returns the external error name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Incomplete => "Incomplete",
            Self::Syntax => "SyntaxError",
            Self::TrailingInput => "TrailingInput",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Something the parser would have accepted at the failure point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expected {
    /// A specific keyword.
    Keyword(Keyword),
    /// A punctuation token, quoted, e.g. `'('`.
    Token(&'static str),
    /// A named construct, e.g. `expression` or `table name`.
    Label(&'static str),
    /// The end of the input.
    EndOfInput,
}

impl Expected {
    /// Returns the human-readable description.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Keyword(keyword) => keyword.as_str(),
            Self::Token(text) | Self::Label(text) => text,
            Self::EndOfInput => "end of input",
        }
    }
}

/// A formatted syntax error.
///
/// Serializes to `{ name, message, location, found, expected, rule, excerpt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct SyntaxError {
    /// Error kind, serialized as `name`.
    #[serde(rename = "name")]
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Start of the offending token, or the end of input.
    pub location: Location,
    /// Source text of the offending token; `None` at end of input.
    pub found: Option<String>,
    /// What would have been accepted, in the order the parser tried it.
    pub expected: Vec<String>,
    /// The innermost named construct the failure occurred in.
    pub rule: Option<String>,
    /// The failing source line with a caret under the error column.
    pub excerpt: String,
}

impl SyntaxError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the external error name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Returns true if more input could make the source parse.
    #[must_use]
    pub fn is_incomplete(&self) -> bool {
        self.kind == ErrorKind::Incomplete
    }
}
