//! Read-only tagged views of source text.

use crate::tag::CompoundTag;
use veritag_source::{Location, SourceText, Span};

/// One interval of a perspective: its tag, its text, and its byte span.
///
/// A token borrows only the source text, so it stays valid while the
/// perspectives of the owning [`TaggedText`](crate::TaggedText) change.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token<'s> {
    /// The tag of the interval.
    pub tag: CompoundTag,
    /// The text covered by the interval.
    pub text: &'s str,
    /// The byte span of the interval.
    pub span: Span,
}

impl Token<'_> {
    /// Returns the byte offset of the first character.
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Returns the byte offset one past the last character.
    pub fn stop(&self) -> usize {
        self.span.end
    }

    /// Resolves the token's start to a line/column position.
    pub fn location(&self, source: &SourceText) -> Location {
        source.location(self.span.start)
    }
}

/// A completed pattern match: a non-empty run of tokens in source order.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Match<'s> {
    /// The consumed tokens.
    pub tokens: Vec<Token<'s>>,
}

impl<'s> Match<'s> {
    /// Returns the span from the first token's start to the last token's stop.
    pub fn span(&self) -> Span {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => Span::new(first.span.start, last.span.end),
            _ => Span::default(),
        }
    }

    /// Returns the source text under [`span`](Self::span), including any
    /// skipped tokens that fall inside it.
    pub fn text<'a>(&self, source: &'a SourceText) -> &'a str {
        source.snippet(self.span())
    }

    /// Returns the consumed tokens' text concatenated, without skipped tokens.
    pub fn consumed_text(&self) -> String {
        self.tokens.iter().map(|t| t.text).collect()
    }
}
