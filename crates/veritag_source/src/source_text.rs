//! Immutable source text with line-start indexing for fast line/column lookup.

use crate::location::Location;
use crate::span::Span;
use std::io;
use std::path::{Path, PathBuf};

/// An immutable source string plus the byte offsets of every line start.
///
/// The line index is computed once on construction; all later
/// offset-to-location queries are a binary search.
#[derive(Clone, Debug)]
pub struct SourceText {
    /// The name used for this text in diagnostics (a path, or a synthetic name).
    pub name: PathBuf,
    content: String,
    /// Byte offsets of each line start (the first entry is always 0).
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Creates a `SourceText` from an in-memory string.
    pub fn new(name: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_starts = compute_line_starts(&content);
        Self {
            name: name.into(),
            content,
            line_starts,
        }
    }

    /// Reads a source file from disk.
    pub fn load(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(path.to_path_buf(), content))
    }

    /// Returns the full text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns the length of the text in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns `true` if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of lines (an empty text has one line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    ///
    /// Offsets past the end resolve against the last line.
    pub fn location(&self, offset: usize) -> Location {
        let offset = offset.min(self.content.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        Location {
            line: line_idx + 1,
            column: offset - self.line_starts[line_idx] + 1,
        }
    }

    /// Returns the text covered by `span`.
    ///
    /// # Panics
    ///
    /// Panics if the span is out of range or not on char boundaries.
    pub fn snippet(&self, span: Span) -> &str {
        &self.content[span.start..span.end]
    }

    /// Returns the full line containing `offset`, without its newline.
    pub fn line_containing(&self, offset: usize) -> &str {
        let line_idx = self.location(offset).line - 1;
        let start = self.line_starts[line_idx];
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map_or(self.content.len(), |next| next - 1);
        self.content[start..end].trim_end_matches('\r')
    }
}

/// Computes the byte offsets of each line start in the given content.
fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(i + 1);
        }
    }
    starts
}
