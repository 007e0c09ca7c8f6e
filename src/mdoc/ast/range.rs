//! Source positions
//!
//! Positions are 1-based line numbers and 1-based columns, as reported by the
//! parser. The default position (0, 0) marks synthesized content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a position in the manual page source (line and column)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Same line, shifted `offset` columns to the right.
    pub fn shifted(self, offset: usize) -> Self {
        Self::new(self.line, self.column + offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(12, 3)), "12:3");
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 1));
        assert!(Position::new(2, 1) < Position::new(2, 4));
    }

    #[test]
    fn test_shifted() {
        assert_eq!(Position::new(4, 2).shifted(5), Position::new(4, 7));
    }
}
