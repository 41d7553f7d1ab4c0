//! Source location tracking for tokens and AST nodes.

use serde::Serialize;

/// A point in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Byte offset from the start of the document.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl Position {
    /// The first position of a document.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Creates a new position.
    #[must_use]
    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Returns the position reached after `text` when it starts at `self`.
    #[must_use]
    pub fn advance_over(self, text: &str) -> Self {
        let mut pos = self;
        for c in text.chars() {
            pos = pos.advance(c);
        }
        pos
    }

    /// Returns the position after a single character.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + c.len_utf8(),
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

/// Represents a half-open span in the source code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// Start position (inclusive).
    pub start: Position,
    /// End position (exclusive).
    pub end: Position,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Creates an empty span at `pos`.
    #[must_use]
    pub const fn empty(pos: Position) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Merges two spans into one that covers both.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start.offset < other.start.offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.offset > other.end.offset {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// Returns true if `other` lies entirely within this span.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::empty(Position::START)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(offset: usize) -> Position {
        Position::new(offset, 1, offset + 1)
    }

    #[test]
    fn test_span_len() {
        let span = Span::new(at(5), at(10));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_span_is_empty() {
        assert!(Span::empty(at(5)).is_empty());
        assert!(!Span::new(at(5), at(10)).is_empty());
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(at(5), at(10)).merge(Span::new(at(8), at(15)));
        assert_eq!(merged.start.offset, 5);
        assert_eq!(merged.end.offset, 15);
        assert!(merged.contains(&Span::new(at(6), at(9))));
    }

    #[test]
    fn test_position_advance_over() {
        let pos = Position::START.advance_over("ab\ncdé");
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 4);
        assert_eq!(pos.offset, 7);
    }
}
