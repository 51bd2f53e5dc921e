//! Source positions.

use std::fmt;

use serde::Serialize;

/// A location in the (newline-normalized) input.
///
/// `line` is 1-based. `col` is the 1-based column of the most recently
/// consumed character on that line, so it is `0` right after a line feed
/// and before anything else has been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number of the last consumed character.
    pub col: usize,
}

impl Position {
    /// The position before any input has been consumed.
    pub const START: Self = Self { line: 1, col: 0 };

    /// Create a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
