//! Layered text tagging and token-pattern matching.
//!
//! A [`TaggedText`] wraps an immutable [`SourceText`](veritag_source::SourceText)
//! with any number of named [`Perspective`]s, each a gapless run of tagged
//! intervals. A [`Tokenizer`] builds the lexical perspectives from a
//! [`Lexicon`]. A [`Grouper`] then feeds the resulting token stream to a set
//! of [`MatchState`] automata, one per [`Pattern`], and tags each match onto
//! a new perspective, which the next, coarser pass reads as its tokens.

#![warn(missing_docs)]

pub mod cursor;
pub mod error;
pub mod grouper;
pub mod lexicon;
pub mod matcher;
pub mod pattern;
pub mod perspective;
pub mod render;
mod scan;
pub mod tag;
pub mod tagged_text;
pub mod token;
pub mod tokenizer;

pub use cursor::Cursor;
pub use error::{EngineError, LexiconError, PatternError, TagError};
pub use grouper::{Grouper, MatchSet, ScanResult};
pub use lexicon::{Lexicon, Reserved};
pub use matcher::{MatchState, Mismatch, Unterminated};
pub use pattern::{Entry, Guard, Mode, Pattern, TagEntry, Walk};
pub use perspective::{Interval, Perspective};
pub use render::{render_colored, ColorMap};
pub use tag::{category, CompoundTag, GroupPairs, Slot, TagValue, TAG_ARITY};
pub use tagged_text::{TaggedText, TOP};
pub use token::{Match, Token};
pub use tokenizer::Tokenizer;
