//! Serializable records for token and match listings.

use serde::Serialize;
use veritag_diagnostics::Diagnostic;
use veritag_engine::Token;
use veritag_source::SourceText;
use veritag_verilog::ParseOutput;

/// One token of a perspective.
#[derive(Debug, Serialize)]
pub struct TokenRecord<'a> {
    /// 1-indexed line of the first character.
    pub line: usize,
    /// 1-indexed byte column of the first character.
    pub column: usize,
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// Display form of the tag, e.g. `(1, 3)`.
    pub tag: String,
    /// The covered text.
    pub text: &'a str,
}

impl<'a> TokenRecord<'a> {
    /// Builds the record for `token`.
    pub fn new(token: &Token<'a>, source: &SourceText) -> Self {
        let loc = token.location(source);
        Self {
            line: loc.line,
            column: loc.column,
            start: token.start(),
            end: token.stop(),
            tag: token.tag.to_string(),
            text: token.text,
        }
    }

    /// Formats the record as one `line:col tag text` line.
    pub fn to_line(&self) -> String {
        format!("{}:{}\t{}\t{:?}", self.line, self.column, self.tag, self.text)
    }
}

/// One completed match of one automaton.
#[derive(Debug, Serialize)]
pub struct MatchRecord<'a> {
    /// The layer the match was projected onto.
    pub layer: &'a str,
    /// The automaton that produced it.
    pub name: &'a str,
    /// Display form of the projected tag.
    pub tag: String,
    /// 1-indexed line of the first token.
    pub line: usize,
    /// 1-indexed byte column of the first token.
    pub column: usize,
    /// Byte offset of the first token.
    pub start: usize,
    /// Byte offset one past the last token.
    pub end: usize,
    /// The source text under the match, skipped tokens included.
    pub text: &'a str,
}

impl MatchRecord<'_> {
    /// Formats the record as one `pass name tag line:col text` line.
    pub fn to_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}:{}\t{:?}",
            self.layer, self.name, self.tag, self.line, self.column, self.text
        )
    }
}

/// Flattens every pass into records, ordered by pass and then by position.
pub fn match_records<'a>(out: &'a ParseOutput<'_>, source: &'a SourceText) -> Vec<MatchRecord<'a>> {
    let mut records = Vec::new();
    for pass in &out.passes {
        let mut layer: Vec<MatchRecord<'a>> = pass
            .matches
            .iter()
            .flat_map(|(name, set)| {
                set.matches.iter().map(move |m| {
                    let span = m.span();
                    let loc = source.location(span.start);
                    MatchRecord {
                        layer: pass.layer,
                        name,
                        tag: set.tag.to_string(),
                        line: loc.line,
                        column: loc.column,
                        start: span.start,
                        end: span.end,
                        text: m.text(source),
                    }
                })
            })
            .collect();
        layer.sort_by_key(|r| r.start);
        records.extend(layer);
    }
    records
}

/// The JSON document printed by `veritag parse --format json`.
#[derive(Debug, Serialize)]
pub struct ParseReport<'a> {
    /// The parsed file.
    pub file: String,
    /// Every match of every pass.
    pub matches: Vec<MatchRecord<'a>>,
    /// Mismatch and unterminated-group diagnostics.
    pub diagnostics: &'a [Diagnostic],
}

#[cfg(test)]
mod tests {
    use super::*;
    use veritag_diagnostics::DiagnosticSink;
    use veritag_engine::tokenizer::KEYWORDS;
    use veritag_verilog::{VerilogStructuralParser, LAYER0, LAYER1};

    #[test]
    fn token_line_escapes_text() {
        let src = SourceText::new("t.v", "wire x;\n");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        let lines: Vec<String> = out
            .text
            .tokens(KEYWORDS)
            .unwrap()
            .map(|t| TokenRecord::new(&t, &src).to_line())
            .collect();
        assert_eq!(lines.first().map(String::as_str), Some("1:1\t(1, 3)\t\"wire\""));
        assert_eq!(lines.last().map(String::as_str), Some("1:8\t(5)\t\"\\n\""));
    }

    #[test]
    fn records_follow_pass_then_position() {
        let src = SourceText::new("t.v", "assign a = b;\nwire c;\n");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        let records = match_records(&out, &src);
        let layer0: Vec<(&str, &str)> = records
            .iter()
            .filter(|r| r.layer == LAYER0)
            .map(|r| (r.name, r.text))
            .collect();
        assert_eq!(layer0, vec![("assigns", "assign a = b;"), ("wiredecs", "wire c;")]);
        let first_layer1 = records.iter().position(|r| r.layer == LAYER1);
        let last_layer0 = records.iter().rposition(|r| r.layer == LAYER0);
        if let (Some(first), Some(last)) = (first_layer1, last_layer0) {
            assert!(last < first);
        }
        let wire = records.iter().find(|r| r.name == "wiredecs").unwrap();
        assert_eq!((wire.line, wire.column), (2, 1));
        assert_eq!(wire.to_line(), "layer0\twiredecs\t(16, 2)\t2:1\t\"wire c;\"");
    }

    #[test]
    fn report_serializes_to_json() {
        let src = SourceText::new("t.v", "wire c;");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        let report = ParseReport {
            file: "t.v".into(),
            matches: match_records(&out, &src),
            diagnostics: &[],
        };
        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["file"], "t.v");
        assert_eq!(json["matches"][0]["name"], "wiredecs");
        assert_eq!(json["matches"][0]["start"], 0);
        assert_eq!(json["matches"][0]["end"], 7);
        assert!(json["diagnostics"].as_array().unwrap().is_empty());
    }
}
