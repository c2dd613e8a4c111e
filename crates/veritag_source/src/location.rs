//! Human-readable line/column positions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 1-indexed line/column position, resolved from a byte offset by
/// [`SourceText::location`](crate::SourceText::location).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The line number (1-indexed).
    pub line: usize,
    /// The byte column within the line (1-indexed).
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let loc = Location { line: 10, column: 5 };
        assert_eq!(format!("{loc}"), "10:5");
    }

    #[test]
    fn ordering_is_line_major() {
        let a = Location { line: 1, column: 40 };
        let b = Location { line: 2, column: 1 };
        assert!(a < b);
    }
}
