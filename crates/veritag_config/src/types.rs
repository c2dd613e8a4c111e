//! Configuration types deserialized from `veritag.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The top-level configuration parsed from `veritag.toml`.
///
/// Every section is optional; an empty file is a valid configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VeritagConfig {
    /// A replacement lexicon for the `tokens` command.
    #[serde(default)]
    pub lexicon: Option<LexiconSection>,
    /// Lexical category name to color name (e.g. `keyword = "green"`).
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

/// The `[lexicon]` table.
///
/// Tables mapping text to a tag id use the text as the TOML key:
///
/// ```toml
/// [lexicon]
/// keywords = { and = 1, or = 2 }
/// reserved = { "+" = 1, "(" = 2, ")" = 3 }
/// pairs = [["(", ")"]]
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconSection {
    /// String delimiter; defaults to `"`.
    #[serde(default)]
    pub quote: Option<char>,
    /// Escape character inside strings; defaults to `\`.
    #[serde(default)]
    pub escape: Option<char>,
    /// Line comment marker. An empty string disables line comments.
    #[serde(default)]
    pub line_comment: Option<String>,
    /// Block comment `[open, close]`. An empty list disables block comments.
    #[serde(default)]
    pub block_comment: Option<Vec<String>>,
    /// Keyword text to id.
    #[serde(default)]
    pub keywords: BTreeMap<String, u32>,
    /// Reserved symbol to id.
    #[serde(default)]
    pub reserved: BTreeMap<String, u32>,
    /// Reserved symbols matched by a custom regular expression.
    #[serde(default)]
    pub patterns: BTreeMap<String, PatternSymbol>,
    /// Macro prefix to id.
    #[serde(default)]
    pub macros: BTreeMap<String, u32>,
    /// Opener/closer symbol pairs.
    #[serde(default)]
    pub pairs: Vec<[String; 2]>,
}

/// A reserved symbol with its own match expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSymbol {
    /// The reserved-symbol id.
    pub id: u32,
    /// The regular expression matching the symbol.
    pub pattern: String,
}
