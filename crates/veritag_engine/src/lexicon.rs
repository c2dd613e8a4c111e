//! Tokenizer configuration: markers, symbol tables, and group pairs.

use crate::error::LexiconError;
use crate::tag::TagValue;
use std::collections::BTreeSet;

/// A reserved symbol and how to find it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reserved {
    /// The literal symbol text.
    pub symbol: String,
    /// The id stored in the tag's second slot.
    pub id: TagValue,
    /// A regex to match instead of the escaped symbol text.
    pub pattern: Option<String>,
}

/// Everything the tokenizer needs to know about a language's surface syntax.
///
/// Keyword, reserved, and macro tables map text to an id that ends up in the
/// second slot of the token's tag, e.g. `(KEYWORD, id)`. Group pairs are
/// given by symbol text and resolved to tags when the tokenizer is built.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Lexicon {
    /// The string delimiter.
    pub quote: char,
    /// The escape character inside strings.
    pub escape: char,
    /// The marker that starts a comment running to the end of the line.
    pub line_comment: Option<String>,
    /// Opening and closing markers of a multi-line comment.
    pub block_comment: Option<(String, String)>,
    /// Keywords, matched only at word boundaries.
    pub keywords: Vec<(String, TagValue)>,
    /// Reserved symbols, tried longest first.
    pub reserved: Vec<Reserved>,
    /// Prefixes that turn the rest of their line into a macro token.
    pub macros: Vec<(String, TagValue)>,
    /// Opener/closer symbol pairs for balanced groups.
    pub pairs: Vec<(String, String)>,
}

impl Lexicon {
    /// Creates a lexicon with C-style quotes and comments and empty tables.
    pub fn new() -> Self {
        Self {
            quote: '"',
            escape: '\\',
            line_comment: Some("//".to_string()),
            block_comment: Some(("/*".to_string(), "*/".to_string())),
            keywords: Vec::new(),
            reserved: Vec::new(),
            macros: Vec::new(),
            pairs: Vec::new(),
        }
    }

    /// Sets the string delimiter.
    pub fn quote(mut self, quote: char) -> Self {
        self.quote = quote;
        self
    }

    /// Sets the line comment marker.
    pub fn line_comment(mut self, marker: impl Into<String>) -> Self {
        self.line_comment = Some(marker.into());
        self
    }

    /// Sets the block comment markers.
    pub fn block_comment(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.block_comment = Some((open.into(), close.into()));
        self
    }

    /// Disables both comment forms.
    pub fn without_comments(mut self) -> Self {
        self.line_comment = None;
        self.block_comment = None;
        self
    }

    /// Adds a keyword.
    pub fn keyword(mut self, text: impl Into<String>, id: TagValue) -> Self {
        self.keywords.push((text.into(), id));
        self
    }

    /// Adds a reserved symbol matched literally.
    pub fn reserved(mut self, symbol: impl Into<String>, id: TagValue) -> Self {
        self.reserved.push(Reserved {
            symbol: symbol.into(),
            id,
            pattern: None,
        });
        self
    }

    /// Adds a reserved symbol matched by a custom regex.
    pub fn reserved_pattern(
        mut self,
        symbol: impl Into<String>,
        pattern: impl Into<String>,
        id: TagValue,
    ) -> Self {
        self.reserved.push(Reserved {
            symbol: symbol.into(),
            id,
            pattern: Some(pattern.into()),
        });
        self
    }

    /// Adds a macro prefix.
    pub fn macro_prefix(mut self, prefix: impl Into<String>, id: TagValue) -> Self {
        self.macros.push((prefix.into(), id));
        self
    }

    /// Adds an opener/closer pair by symbol text.
    pub fn pair(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.pairs.push((open.into(), close.into()));
        self
    }

    /// Looks up a reserved symbol's id by its text.
    pub fn reserved_id(&self, symbol: &str) -> Option<TagValue> {
        self.reserved
            .iter()
            .find(|r| r.symbol == symbol)
            .map(|r| r.id)
    }

    /// Looks up a keyword's id by its text.
    pub fn keyword_id(&self, text: &str) -> Option<TagValue> {
        self.keywords
            .iter()
            .find(|(k, _)| k == text)
            .map(|(_, id)| *id)
    }

    /// Checks for empty symbols and duplicate ids.
    pub fn validate(&self) -> Result<(), LexiconError> {
        if self.line_comment.as_deref() == Some("") {
            return Err(LexiconError::EmptySymbol {
                table: "line comment",
            });
        }
        if let Some((open, close)) = &self.block_comment {
            if open.is_empty() || close.is_empty() {
                return Err(LexiconError::EmptySymbol {
                    table: "block comment",
                });
            }
        }
        check_table("keyword", self.keywords.iter().map(|(t, id)| (t.as_str(), *id)))?;
        check_table(
            "reserved",
            self.reserved.iter().map(|r| (r.symbol.as_str(), r.id)),
        )?;
        check_table("macro", self.macros.iter().map(|(t, id)| (t.as_str(), *id)))?;
        Ok(())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn check_table<'a>(
    table: &'static str,
    entries: impl Iterator<Item = (&'a str, TagValue)>,
) -> Result<(), LexiconError> {
    let mut ids = BTreeSet::new();
    for (text, id) in entries {
        if text.is_empty() {
            return Err(LexiconError::EmptySymbol { table });
        }
        if !ids.insert(id) {
            return Err(LexiconError::DuplicateId { table, id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_lookup() {
        let lex = Lexicon::new()
            .keyword("and", 4)
            .reserved("(", 9)
            .reserved_pattern("@*", r"@\s*\*", 11)
            .pair("(", ")");
        assert_eq!(lex.keyword_id("and"), Some(4));
        assert_eq!(lex.reserved_id("("), Some(9));
        assert_eq!(lex.reserved_id(")"), None);
        assert_eq!(lex.reserved[1].pattern.as_deref(), Some(r"@\s*\*"));
        assert!(lex.validate().is_ok());
    }

    #[test]
    fn duplicate_id_rejected() {
        let lex = Lexicon::new().keyword("and", 4).keyword("or", 4);
        assert!(matches!(
            lex.validate(),
            Err(LexiconError::DuplicateId {
                table: "keyword",
                id: 4
            })
        ));
    }

    #[test]
    fn same_id_in_different_tables_is_fine() {
        let lex = Lexicon::new().keyword("and", 4).reserved("+", 4);
        assert!(lex.validate().is_ok());
    }

    #[test]
    fn empty_symbol_rejected() {
        let lex = Lexicon::new().reserved("", 1);
        assert!(matches!(
            lex.validate(),
            Err(LexiconError::EmptySymbol { table: "reserved" })
        ));
        let lex = Lexicon::new().block_comment("(*", "");
        assert!(lex.validate().is_err());
    }

    #[test]
    fn without_comments() {
        let lex = Lexicon::new().without_comments();
        assert!(lex.line_comment.is_none());
        assert!(lex.block_comment.is_none());
    }
}
