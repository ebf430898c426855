//! Source positions and position-annotated characters.
//!
//! A [`Position`] is carried by every character the parser consumes, so that
//! delimiters and text stored in the tree can be traced back to the exact
//! place they came from. Positions are zero-based.

use std::fmt;

/// A zero-based source position: absolute character offset, column, and line.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Absolute character offset from the start of the source.
    pub offset: usize,
    /// Column within the current line, reset by newlines.
    pub column: usize,
    /// Line number, incremented by newlines.
    pub line: usize,
}

impl Position {
    /// The position of the first character of a source: `(0, 0, 0)`.
    pub const ORIGIN: Position = Position {
        offset: 0,
        column: 0,
        line: 0,
    };

    /// The position of the character following one with value `c` at `self`.
    ///
    /// A newline resets the column to zero and advances the line; any other
    /// character advances the column. The offset always advances by one.
    #[must_use]
    pub fn advance(self, c: char) -> Position {
        if c == '\n' {
            Position {
                offset: self.offset + 1,
                column: 0,
                line: self.line + 1,
            }
        } else {
            Position {
                offset: self.offset + 1,
                column: self.column + 1,
                line: self.line,
            }
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A single character together with the position it occupied in the source.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct FatChar {
    /// The character value.
    pub value: char,
    /// Where the character sat in the original source.
    pub position: Position,
}

impl FatChar {
    /// Returns `true` if this character is a line feed.
    #[must_use]
    pub fn is_newline(&self) -> bool {
        self.value == '\n'
    }

    /// Returns `true` for any Unicode whitespace, including newlines.
    #[must_use]
    pub fn is_whitespace(&self) -> bool {
        self.value.is_whitespace()
    }
}

impl fmt::Debug for FatChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.value, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin() {
        assert_eq!(Position::ORIGIN.offset, 0);
        assert_eq!(Position::ORIGIN.column, 0);
        assert_eq!(Position::ORIGIN.line, 0);
    }

    #[test]
    fn advance_plain() {
        let p = Position::ORIGIN.advance('a');
        assert_eq!(p, Position { offset: 1, column: 1, line: 0 });
    }

    #[test]
    fn advance_newline_resets_column() {
        let p = Position::ORIGIN.advance('a').advance('\n');
        assert_eq!(p, Position { offset: 2, column: 0, line: 1 });
        let q = p.advance('b');
        assert_eq!(q, Position { offset: 3, column: 1, line: 1 });
    }
}
