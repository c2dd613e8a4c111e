//! Colorized rendering of a perspective for terminal display.

use crate::error::TagError;
use crate::tag::{category, CompoundTag};
use crate::tagged_text::TaggedText;
use crossterm::style::{Color, Stylize};

/// An ordered tag-to-color table. The first matching entry wins.
#[derive(Clone, Debug, Default)]
pub struct ColorMap {
    entries: Vec<(CompoundTag, Color)>,
}

impl ColorMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// A map coloring every lexical category except generic text.
    pub fn lexical() -> Self {
        Self::new()
            .with(category::KEYWORD, Color::Green)
            .with(category::RESERVED, Color::Blue)
            .with(category::COMMENT, Color::DarkGrey)
            .with(category::STRING, Color::Yellow)
            .with(category::MACRO, Color::Magenta)
    }

    /// Appends an entry.
    pub fn with(mut self, tag: impl Into<CompoundTag>, color: Color) -> Self {
        self.entries.push((tag.into(), color));
        self
    }

    /// Appends every entry of `other` after this map's own.
    pub fn extend_from(mut self, other: &ColorMap) -> Self {
        self.entries.extend(other.entries.iter().cloned());
        self
    }

    /// Returns the color of the first entry matching `tag`.
    pub fn color_for(&self, tag: &CompoundTag) -> Option<Color> {
        self.entries
            .iter()
            .find(|(t, _)| t.matches(tag))
            .map(|(_, c)| *c)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders perspective `name` with each token styled by `colors`.
///
/// Tokens with no matching color are emitted unchanged, so stripping the
/// escape codes gives back the source text.
pub fn render_colored(
    text: &TaggedText<'_>,
    name: &str,
    colors: &ColorMap,
) -> Result<String, TagError> {
    let mut out = String::with_capacity(text.as_str().len());
    for token in text.tokens(name)? {
        match colors.color_for(&token.tag) {
            Some(color) => out.push_str(&token.text.with(color).to_string()),
            None => out.push_str(token.text),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::tokenizer::{Tokenizer, KEYWORDS};
    use veritag_source::SourceText;

    #[test]
    fn first_matching_color_wins() {
        let map = ColorMap::new()
            .with((category::KEYWORD, 7u32), Color::Red)
            .with(category::KEYWORD, Color::Green);
        assert_eq!(map.color_for(&(category::KEYWORD, 7u32).into()), Some(Color::Red));
        assert_eq!(map.color_for(&(category::KEYWORD, 1u32).into()), Some(Color::Green));
        assert_eq!(map.color_for(&CompoundTag::generic()), None);
    }

    #[test]
    fn plain_text_without_colors() {
        let src = SourceText::new("t", "a and b");
        let tk = Tokenizer::new(Lexicon::new().keyword("and", 1)).unwrap();
        let text = tk.tokenize(&src).unwrap();
        assert_eq!(render_colored(&text, KEYWORDS, &ColorMap::new()).unwrap(), "a and b");
    }

    #[test]
    fn colored_tokens_carry_escapes() {
        let src = SourceText::new("t", "a and b");
        let tk = Tokenizer::new(Lexicon::new().keyword("and", 1)).unwrap();
        let text = tk.tokenize(&src).unwrap();
        let out = render_colored(&text, KEYWORDS, &ColorMap::lexical()).unwrap();
        assert!(out.starts_with("a "));
        assert!(out.contains('\x1b'));
        assert!(out.ends_with(" b"));
    }
}
