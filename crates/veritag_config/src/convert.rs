//! Conversion of configuration sections into engine values.

use crate::error::ConfigError;
use crate::types::{LexiconSection, VeritagConfig};
use crossterm::style::Color;
use veritag_engine::{category, ColorMap, Lexicon, TagValue, Tokenizer};

/// Category names accepted as `[colors]` keys.
pub const CATEGORY_NAMES: [(&str, TagValue); 7] = [
    ("generic", category::GENERIC),
    ("keyword", category::KEYWORD),
    ("comment", category::COMMENT),
    ("string", category::STRING),
    ("reserved", category::RESERVED),
    ("whitespace", category::WHITESPACE),
    ("macro", category::MACRO),
];

/// Looks up a lexical category by its configuration name.
pub fn category_by_name(name: &str) -> Option<TagValue> {
    CATEGORY_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, value)| *value)
}

/// Parses a crossterm color name such as `"green"` or `"dark_grey"`.
pub fn parse_color(name: &str) -> Result<Color, ConfigError> {
    Color::try_from(name)
        .map_err(|()| ConfigError::ValidationError(format!("unknown color '{name}'")))
}

impl LexiconSection {
    /// Builds an engine lexicon, starting from [`Lexicon::new`] defaults.
    pub fn to_lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::new();
        if let Some(quote) = self.quote {
            lexicon = lexicon.quote(quote);
        }
        if let Some(escape) = self.escape {
            lexicon.escape = escape;
        }
        if let Some(marker) = &self.line_comment {
            lexicon.line_comment = (!marker.is_empty()).then(|| marker.clone());
        }
        if let Some(block) = &self.block_comment {
            lexicon.block_comment = match block.as_slice() {
                [open, close] => Some((open.clone(), close.clone())),
                _ => None,
            };
        }
        for (text, id) in &self.keywords {
            lexicon = lexicon.keyword(text.as_str(), *id);
        }
        for (symbol, id) in &self.reserved {
            lexicon = lexicon.reserved(symbol.as_str(), *id);
        }
        for (symbol, custom) in &self.patterns {
            lexicon = lexicon.reserved_pattern(symbol.as_str(), custom.pattern.as_str(), custom.id);
        }
        for (prefix, id) in &self.macros {
            lexicon = lexicon.macro_prefix(prefix.as_str(), *id);
        }
        for [open, close] in &self.pairs {
            lexicon = lexicon.pair(open.as_str(), close.as_str());
        }
        lexicon
    }

    /// Builds and compiles the lexicon.
    pub fn to_tokenizer(&self) -> Result<Tokenizer, ConfigError> {
        Ok(Tokenizer::new(self.to_lexicon())?)
    }
}

impl VeritagConfig {
    /// Returns the configured colors layered over [`ColorMap::lexical`].
    ///
    /// Configured categories take precedence over the defaults.
    pub fn color_map(&self) -> Result<ColorMap, ConfigError> {
        let mut map = ColorMap::new();
        for (name, color) in &self.colors {
            let value = category_by_name(name).ok_or_else(|| {
                ConfigError::ValidationError(format!("unknown category '{name}' in [colors]"))
            })?;
            map = map.with(value, parse_color(color)?);
        }
        Ok(map.extend_from(&ColorMap::lexical()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;
    use veritag_engine::CompoundTag;

    #[test]
    fn category_names_resolve() {
        assert_eq!(category_by_name("keyword"), Some(category::KEYWORD));
        assert_eq!(category_by_name("macro"), Some(category::MACRO));
        assert_eq!(category_by_name("signal"), None);
    }

    #[test]
    fn color_names_parse() {
        assert_eq!(parse_color("green").unwrap(), Color::Green);
        assert_eq!(parse_color("dark_grey").unwrap(), Color::DarkGrey);
        assert!(parse_color("chartreuse-ish").is_err());
    }

    #[test]
    fn lexicon_section_overrides_defaults() {
        let config = load_config_from_str(
            r##"
[lexicon]
line_comment = "#"
block_comment = []
keywords = { and = 1 }
reserved = { "(" = 1, ")" = 2 }
pairs = [["(", ")"]]
"##,
        )
        .unwrap();
        let lexicon = config.lexicon.unwrap().to_lexicon();
        assert_eq!(lexicon.quote, '"');
        assert_eq!(lexicon.line_comment.as_deref(), Some("#"));
        assert!(lexicon.block_comment.is_none());
        assert_eq!(lexicon.keyword_id("and"), Some(1));
        assert_eq!(lexicon.reserved_id(")"), Some(2));
        assert_eq!(lexicon.pairs.len(), 1);
    }

    #[test]
    fn empty_line_comment_disables_it() {
        let config = load_config_from_str("[lexicon]\nline_comment = \"\"\n").unwrap();
        assert!(config.lexicon.unwrap().to_lexicon().line_comment.is_none());
    }

    #[test]
    fn custom_patterns_become_reserved_entries() {
        let config = load_config_from_str(
            "[lexicon.patterns]\n\"@*\" = { id = 7, pattern = '@\\s*\\*' }\n",
        )
        .unwrap();
        let lexicon = config.lexicon.unwrap().to_lexicon();
        let entry = &lexicon.reserved[0];
        assert_eq!(entry.symbol, "@*");
        assert_eq!(entry.id, 7);
        assert_eq!(entry.pattern.as_deref(), Some(r"@\s*\*"));
    }

    #[test]
    fn unknown_pair_symbol_fails_to_compile() {
        let config = load_config_from_str("[lexicon]\npairs = [[\"<\", \">\"]]\n").unwrap();
        let err = config.lexicon.unwrap().to_tokenizer().err().unwrap();
        assert!(matches!(err, ConfigError::Lexicon(_)));
    }

    #[test]
    fn configured_colors_take_precedence() {
        let config = load_config_from_str("[colors]\nkeyword = \"red\"\n").unwrap();
        let map = config.color_map().unwrap();
        let kw: CompoundTag = (category::KEYWORD, 3u32).into();
        assert_eq!(map.color_for(&kw), Some(Color::Red));
        let comment: CompoundTag = category::COMMENT.into();
        assert_eq!(map.color_for(&comment), Some(Color::DarkGrey));
    }

    #[test]
    fn default_color_map_is_lexical() {
        let map = VeritagConfig::default().color_map().unwrap();
        assert_eq!(map.len(), ColorMap::lexical().len());
    }
}
