//! The fixed sequence of lexical tagging passes.
//!
//! Each pass clones the previous perspective under its own name and tags
//! only spans that are still `(GENERIC)`, so earlier classifications are
//! never revisited:
//!
//! | perspective  | tags                                  |
//! |--------------|---------------------------------------|
//! | `comments`   | line and block comments               |
//! | `macros`     | macro lines                           |
//! | `strings`    | quoted strings                        |
//! | `whitespace` | whitespace runs                       |
//! | `reserved`   | reserved symbols, longest first       |
//! | `keywords`   | keywords at word boundaries           |
//!
//! The `keywords` perspective is the token stream for pattern matching.

use crate::error::{LexiconError, TagError};
use crate::lexicon::Lexicon;
use crate::scan;
use crate::tag::{category, CompoundTag, GroupPairs, TagValue};
use crate::tagged_text::{TaggedText, TOP};
use regex::Regex;
use std::ops::Range;
use tracing::debug;
use veritag_source::SourceText;

/// Perspective holding comments.
pub const COMMENTS: &str = "comments";
/// Perspective adding macro lines.
pub const MACROS: &str = "macros";
/// Perspective adding quoted strings.
pub const STRINGS: &str = "strings";
/// Perspective adding whitespace.
pub const WHITESPACE: &str = "whitespace";
/// Perspective adding reserved symbols.
pub const RESERVED: &str = "reserved";
/// The final, fully classified perspective.
pub const KEYWORDS: &str = "keywords";

/// Every perspective the tokenizer produces, in pass order.
pub const PASSES: [&str; 6] = [COMMENTS, MACROS, STRINGS, WHITESPACE, RESERVED, KEYWORDS];

/// A compiled [`Lexicon`].
pub struct Tokenizer {
    lexicon: Lexicon,
    macros: Vec<(String, TagValue)>,
    reserved: Vec<(Regex, TagValue)>,
    keywords: Vec<(Regex, TagValue)>,
    whitespace: Regex,
    pairs: GroupPairs,
}

impl Tokenizer {
    /// Validates and compiles a lexicon.
    pub fn new(lexicon: Lexicon) -> Result<Self, LexiconError> {
        lexicon.validate()?;

        let mut reserved = lexicon.reserved.clone();
        reserved.sort_by_key(|r| std::cmp::Reverse(r.symbol.len()));
        let reserved = reserved
            .into_iter()
            .map(|r| {
                let source = r.pattern.unwrap_or_else(|| regex::escape(&r.symbol));
                compile(&r.symbol, &source).map(|re| (re, r.id))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let keywords = lexicon
            .keywords
            .iter()
            .map(|(kw, id)| compile(kw, &format!(r"\b{}\b", regex::escape(kw))).map(|re| (re, *id)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut macros = lexicon.macros.clone();
        macros.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));

        let mut pairs = GroupPairs::new();
        for (open, close) in &lexicon.pairs {
            pairs.insert(symbol_tag(&lexicon, open)?, symbol_tag(&lexicon, close)?);
        }

        Ok(Self {
            whitespace: compile("whitespace", r"\s+")?,
            lexicon,
            macros,
            reserved,
            keywords,
            pairs,
        })
    }

    /// Returns the lexicon this tokenizer was built from.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns the opener/closer table resolved from the lexicon's pairs.
    pub fn pairs(&self) -> &GroupPairs {
        &self.pairs
    }

    /// Runs every pass over `source`, leaving all intermediate perspectives
    /// in the returned text.
    pub fn tokenize<'s>(&self, source: &'s SourceText) -> Result<TaggedText<'s>, TagError> {
        let mut text = TaggedText::new(source);
        self.tag_comments(&mut text)?;
        self.tag_macros(&mut text)?;
        self.tag_strings(&mut text)?;
        self.tag_whitespace(&mut text)?;
        self.tag_reserved(&mut text)?;
        self.tag_keywords(&mut text)?;
        Ok(text)
    }

    fn tag_comments(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(TOP, COMMENTS)?;
        let lex = &self.lexicon;
        let block = lex
            .block_comment
            .as_ref()
            .map(|(o, c)| (o.as_str(), c.as_str()));
        let n = tag_generic(text, COMMENTS, &category::COMMENT.into(), |s| {
            scan::comment_ranges(s, lex.quote, lex.escape, lex.line_comment.as_deref(), block)
        })?;
        debug!(pass = COMMENTS, tagged = n, "tokenizer pass");
        Ok(n)
    }

    fn tag_macros(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(COMMENTS, MACROS)?;
        let mut n = 0;
        for (prefix, id) in &self.macros {
            let label = (category::MACRO, *id).into();
            n += tag_generic(text, MACROS, &label, |s| {
                scan::prefixed_line_ranges(s, prefix, self.lexicon.quote, self.lexicon.escape)
            })?;
        }
        debug!(pass = MACROS, tagged = n, "tokenizer pass");
        Ok(n)
    }

    fn tag_strings(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(MACROS, STRINGS)?;
        let n = tag_generic(text, STRINGS, &category::STRING.into(), |s| {
            scan::quoted_ranges(s, self.lexicon.quote, self.lexicon.escape)
        })?;
        debug!(pass = STRINGS, tagged = n, "tokenizer pass");
        Ok(n)
    }

    fn tag_whitespace(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(STRINGS, WHITESPACE)?;
        let n = tag_generic(text, WHITESPACE, &category::WHITESPACE.into(), |s| {
            regex_ranges(&self.whitespace, s)
        })?;
        debug!(pass = WHITESPACE, tagged = n, "tokenizer pass");
        Ok(n)
    }

    fn tag_reserved(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(WHITESPACE, RESERVED)?;
        let mut n = 0;
        // One symbol at a time so a longer symbol is never split by a shorter one.
        for (re, id) in &self.reserved {
            let label = (category::RESERVED, *id).into();
            n += tag_generic(text, RESERVED, &label, |s| regex_ranges(re, s))?;
        }
        debug!(pass = RESERVED, tagged = n, "tokenizer pass");
        Ok(n)
    }

    fn tag_keywords(&self, text: &mut TaggedText<'_>) -> Result<usize, TagError> {
        text.copy_perspective(RESERVED, KEYWORDS)?;
        let mut n = 0;
        for (re, id) in &self.keywords {
            let label = (category::KEYWORD, *id).into();
            n += tag_generic(text, KEYWORDS, &label, |s| regex_ranges(re, s))?;
        }
        debug!(pass = KEYWORDS, tagged = n, "tokenizer pass");
        Ok(n)
    }
}

/// Applies `label` to every range `find` reports inside each generic span.
fn tag_generic(
    text: &mut TaggedText<'_>,
    name: &str,
    label: &CompoundTag,
    mut find: impl FnMut(&str) -> Vec<Range<usize>>,
) -> Result<usize, TagError> {
    let spans = text.perspective(name)?.generic_spans();
    let src = text.as_str();
    let mut n = 0;
    for span in spans {
        for r in find(&src[span.start..span.end]) {
            text.tag(name, span.start + r.start, span.start + r.end, label.clone())?;
            n += 1;
        }
    }
    Ok(n)
}

fn regex_ranges(re: &Regex, s: &str) -> Vec<Range<usize>> {
    re.find_iter(s)
        .map(|m| m.range())
        .filter(|r| !r.is_empty())
        .collect()
}

fn compile(symbol: &str, source: &str) -> Result<Regex, LexiconError> {
    Regex::new(source).map_err(|source| LexiconError::BadPattern {
        symbol: symbol.to_string(),
        source,
    })
}

/// Resolves a pair symbol to the tag the tokenizer will give it.
fn symbol_tag(lexicon: &Lexicon, symbol: &str) -> Result<CompoundTag, LexiconError> {
    if let Some(id) = lexicon.reserved_id(symbol) {
        return Ok((category::RESERVED, id).into());
    }
    if let Some(id) = lexicon.keyword_id(symbol) {
        return Ok((category::KEYWORD, id).into());
    }
    Err(LexiconError::UnknownPairSymbol(symbol.to_string()))
}
