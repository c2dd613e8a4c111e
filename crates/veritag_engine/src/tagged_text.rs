//! A source text plus any number of named perspectives over it.

use crate::error::TagError;
use crate::perspective::Perspective;
use crate::tag::CompoundTag;
use crate::token::Token;
use std::collections::BTreeMap;
use veritag_source::SourceText;

/// The perspective every [`TaggedText`] starts with.
pub const TOP: &str = "top";

/// Immutable source text with independently taggable layers.
#[derive(Debug)]
pub struct TaggedText<'s> {
    source: &'s SourceText,
    perspectives: BTreeMap<String, Perspective>,
}

impl<'s> TaggedText<'s> {
    /// Wraps `source` with a single all-generic perspective named [`TOP`].
    pub fn new(source: &'s SourceText) -> Self {
        let mut perspectives = BTreeMap::new();
        perspectives.insert(TOP.to_string(), Perspective::new(source.len()));
        Self {
            source,
            perspectives,
        }
    }

    /// Returns the underlying source.
    pub fn source(&self) -> &'s SourceText {
        self.source
    }

    /// Returns the full text.
    pub fn as_str(&self) -> &'s str {
        self.source.as_str()
    }

    /// Creates (or resets) a fresh all-generic perspective.
    pub fn add_perspective(&mut self, name: &str) -> &mut Perspective {
        let len = self.source.len();
        let slot = self
            .perspectives
            .entry(name.to_string())
            .or_insert_with(|| Perspective::new(len));
        *slot = Perspective::new(len);
        slot
    }

    /// Clones perspective `from` under the name `to`, replacing any existing `to`.
    pub fn copy_perspective(&mut self, from: &str, to: &str) -> Result<(), TagError> {
        let copy = self.perspective(from)?.clone();
        self.perspectives.insert(to.to_string(), copy);
        Ok(())
    }

    /// Returns `true` if a perspective with this name exists.
    pub fn has_perspective(&self, name: &str) -> bool {
        self.perspectives.contains_key(name)
    }

    /// Looks up a perspective by name.
    pub fn perspective(&self, name: &str) -> Result<&Perspective, TagError> {
        self.perspectives
            .get(name)
            .ok_or_else(|| TagError::UnknownPerspective(name.to_string()))
    }

    /// Iterates perspective names in sorted order.
    pub fn perspective_names(&self) -> impl Iterator<Item = &str> {
        self.perspectives.keys().map(String::as_str)
    }

    /// Tags `[start, stop)` of perspective `name` with `label`.
    ///
    /// Offsets must lie on character boundaries within the text.
    pub fn tag(
        &mut self,
        name: &str,
        start: usize,
        stop: usize,
        label: impl Into<CompoundTag>,
    ) -> Result<(), TagError> {
        let text = self.source.as_str();
        if stop <= text.len() && start <= stop {
            for offset in [start, stop] {
                if !text.is_char_boundary(offset) {
                    return Err(TagError::NotCharBoundary { offset });
                }
            }
        }
        self.perspectives
            .get_mut(name)
            .ok_or_else(|| TagError::UnknownPerspective(name.to_string()))?
            .tag(start, stop, label.into())
    }

    /// Iterates the tokens of perspective `name` in order.
    pub fn tokens(&self, name: &str) -> Result<impl Iterator<Item = Token<'s>> + '_, TagError> {
        let text = self.source.as_str();
        Ok(self.perspective(name)?.iter().map(move |iv| Token {
            tag: iv.tag.clone(),
            text: &text[iv.span.start..iv.span.end],
            span: iv.span,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::category::{KEYWORD, RESERVED};

    #[test]
    fn starts_with_top() {
        let src = SourceText::new("t", "wire a;");
        let text = TaggedText::new(&src);
        assert!(text.has_perspective(TOP));
        let toks: Vec<_> = text.tokens(TOP).unwrap().collect();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].text, "wire a;");
    }

    #[test]
    fn tag_and_iterate() {
        let src = SourceText::new("t", "wire a;");
        let mut text = TaggedText::new(&src);
        text.tag(TOP, 0, 4, (KEYWORD, 1u32)).unwrap();
        text.tag(TOP, 6, 7, (RESERVED, 2u32)).unwrap();
        let toks: Vec<&str> = text.tokens(TOP).unwrap().map(|t| t.text).collect();
        assert_eq!(toks, vec!["wire", " a", ";"]);
    }

    #[test]
    fn copies_are_independent() {
        let src = SourceText::new("t", "abc");
        let mut text = TaggedText::new(&src);
        text.copy_perspective(TOP, "next").unwrap();
        text.tag("next", 0, 1, KEYWORD).unwrap();
        assert_eq!(text.perspective(TOP).unwrap().intervals().len(), 1);
        assert_eq!(text.perspective("next").unwrap().intervals().len(), 2);
    }

    #[test]
    fn unknown_perspective() {
        let src = SourceText::new("t", "abc");
        let mut text = TaggedText::new(&src);
        assert_eq!(
            text.copy_perspective("nope", "x"),
            Err(TagError::UnknownPerspective("nope".into()))
        );
        assert!(text.tag("nope", 0, 1, KEYWORD).is_err());
        assert!(text.tokens("nope").is_err());
    }

    #[test]
    fn rejects_split_characters() {
        let src = SourceText::new("t", "aé");
        let mut text = TaggedText::new(&src);
        assert_eq!(
            text.tag(TOP, 0, 2, KEYWORD),
            Err(TagError::NotCharBoundary { offset: 2 })
        );
        text.tag(TOP, 1, 3, KEYWORD).unwrap();
    }

    #[test]
    fn tokens_survive_retagging() {
        let src = SourceText::new("t", "abc");
        let mut text = TaggedText::new(&src);
        let before: Vec<Token<'_>> = text.tokens(TOP).unwrap().collect();
        text.tag(TOP, 0, 1, KEYWORD).unwrap();
        assert_eq!(before[0].text, "abc");
    }

    #[test]
    fn add_perspective_resets() {
        let src = SourceText::new("t", "abc");
        let mut text = TaggedText::new(&src);
        text.tag(TOP, 0, 1, KEYWORD).unwrap();
        let p = text.add_perspective(TOP);
        assert_eq!(p.intervals().len(), 1);
        let names: Vec<&str> = text.perspective_names().collect();
        assert_eq!(names, vec![TOP]);
    }
}
