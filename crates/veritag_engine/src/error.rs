//! Error types for tagging, lexicon compilation, and pattern matching.

use thiserror::Error;

/// Errors from tag construction and perspective mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    /// A tag request fell outside `[0, len]` or had `start > stop`.
    #[error("tag range {start}..{stop} is out of bounds for text of length {len}")]
    OutOfRange {
        /// Requested start offset.
        start: usize,
        /// Requested stop offset.
        stop: usize,
        /// Length of the text in bytes.
        len: usize,
    },

    /// A tag boundary fell inside a multi-byte character.
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary {
        /// The offending byte offset.
        offset: usize,
    },

    /// No perspective with the given name exists.
    #[error("unknown perspective '{0}'")]
    UnknownPerspective(String),

    /// More components were given than a compound tag can hold.
    #[error("compound tag takes at most {max} components, got {given}", max = crate::tag::TAG_ARITY)]
    ArityExceeded {
        /// Number of components supplied.
        given: usize,
    },
}

/// Errors in the structure of a pattern.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PatternError {
    /// A `complete` entry's opening tag has no closer in the pair table.
    #[error("pattern '{pattern}' uses {opener} as a group opener but no closer is defined for it")]
    UndefinedCloser {
        /// Name of the pattern containing the entry.
        pattern: String,
        /// Display form of the opening tag.
        opener: String,
    },
}

/// Errors found while compiling a [`Lexicon`](crate::Lexicon) into a tokenizer.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// A keyword, reserved symbol, macro prefix, or comment marker was empty.
    #[error("empty symbol in the {table} table")]
    EmptySymbol {
        /// The table holding the empty entry.
        table: &'static str,
    },

    /// A reserved symbol's match pattern did not compile.
    #[error("invalid match pattern for '{symbol}': {source}")]
    BadPattern {
        /// The symbol whose pattern failed.
        symbol: String,
        /// The underlying regex error.
        source: regex::Error,
    },

    /// A group pair names a symbol that is neither reserved nor a keyword.
    #[error("group pair symbol '{0}' is not a reserved symbol or keyword")]
    UnknownPairSymbol(String),

    /// Two entries of one table share a tag id.
    #[error("duplicate id {id} in the {table} table")]
    DuplicateId {
        /// The table holding the duplicate.
        table: &'static str,
        /// The repeated id.
        id: u32,
    },
}

/// Any error the engine can return from a scan.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A tagging operation failed.
    #[error(transparent)]
    Tag(#[from] TagError),

    /// A pattern was malformed.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// A lexicon failed to compile.
    #[error(transparent)]
    Lexicon(#[from] LexiconError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_out_of_range() {
        let e = TagError::OutOfRange {
            start: 3,
            stop: 12,
            len: 10,
        };
        assert_eq!(
            e.to_string(),
            "tag range 3..12 is out of bounds for text of length 10"
        );
    }

    #[test]
    fn display_arity() {
        let e = TagError::ArityExceeded { given: 5 };
        assert_eq!(e.to_string(), "compound tag takes at most 3 components, got 5");
    }

    #[test]
    fn engine_error_is_transparent() {
        let e: EngineError = PatternError::UndefinedCloser {
            pattern: "portmap".into(),
            opener: "(4, 9)".into(),
        }
        .into();
        assert_eq!(
            e.to_string(),
            "pattern 'portmap' uses (4, 9) as a group opener but no closer is defined for it"
        );
    }
}
