//! Runs many pattern automata over one token stream and projects the results
//! as a new, coarser perspective.

use crate::error::{EngineError, PatternError, TagError};
use crate::matcher::{MatchState, Mismatch, Unterminated};
use crate::pattern::Pattern;
use crate::tag::{CompoundTag, GroupPairs};
use crate::tagged_text::TaggedText;
use crate::token::{Match, Token};
use crate::tokenizer::Tokenizer;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use veritag_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use veritag_source::SourceText;

/// Every match of one automaton in one scan.
#[derive(Clone, Debug)]
pub struct MatchSet<'s> {
    /// The tag the matches were projected with.
    pub tag: CompoundTag,
    /// The matches in stream order.
    pub matches: Vec<Match<'s>>,
}

/// The result of one scan, keyed by automaton name.
pub type ScanResult<'s> = BTreeMap<String, MatchSet<'s>>;

/// A set of named automata sharing one tokenizer and one token stream.
pub struct Grouper {
    tokenizer: Arc<Tokenizer>,
    pairs: GroupPairs,
    matchers: Vec<MatchState>,
    skip: Vec<CompoundTag>,
}

impl Grouper {
    /// Creates a grouper whose pair table starts as the tokenizer's.
    pub fn new(tokenizer: Arc<Tokenizer>) -> Self {
        let pairs = tokenizer.pairs().clone();
        Self {
            tokenizer,
            pairs,
            matchers: Vec::new(),
            skip: Vec::new(),
        }
    }

    /// Returns the shared tokenizer.
    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    /// Returns the pair table used by `complete` entries.
    pub fn pairs(&self) -> &GroupPairs {
        &self.pairs
    }

    /// Adds an automaton. Projection order follows registration order.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        tag: impl Into<CompoundTag>,
        pattern: Pattern,
    ) -> &mut Self {
        self.matchers.push(MatchState::new(name, tag, pattern));
        self
    }

    /// Adds an opener/closer pair beyond those of the tokenizer, e.g. for
    /// tags produced by an earlier pass.
    pub fn pair(
        &mut self,
        opener: impl Into<CompoundTag>,
        closer: impl Into<CompoundTag>,
    ) -> &mut Self {
        self.pairs.insert(opener, closer);
        self
    }

    /// Hides tokens matching `tag` from every automaton.
    pub fn skip(&mut self, tag: impl Into<CompoundTag>) -> &mut Self {
        self.skip.push(tag.into());
        self
    }

    /// Returns the registered automata.
    pub fn matchers(&self) -> &[MatchState] {
        &self.matchers
    }

    /// Checks every `complete` entry against the pair table up front.
    pub fn validate(&self) -> Result<(), PatternError> {
        self.matchers
            .iter()
            .try_for_each(|m| m.pattern().validate(m.name(), &self.pairs))
    }

    /// Runs the tokenizer over `source`.
    pub fn tokenize<'s>(&self, source: &'s SourceText) -> Result<TaggedText<'s>, TagError> {
        self.tokenizer.tokenize(source)
    }

    /// Feeds every token of perspective `input` to every automaton, then
    /// copies `input` to `output` and tags each match's span there.
    ///
    /// Guard mismatches and unclosed groups are reported to `sink` as
    /// warnings; the scan carries on past them.
    pub fn scan<'s>(
        &mut self,
        text: &mut TaggedText<'s>,
        input: &str,
        output: &str,
        sink: &DiagnosticSink,
    ) -> Result<ScanResult<'s>, EngineError> {
        let tokens = self.stream(text, input)?;
        let source = text.source();
        for m in &mut self.matchers {
            m.reset();
        }
        for (i, token) in tokens.iter().enumerate() {
            for m in &mut self.matchers {
                if let Some(mismatch) = m.feed(i, token, &self.pairs)? {
                    report_mismatch(source, &tokens, &mismatch, sink);
                }
            }
        }
        for m in &mut self.matchers {
            if let Some(open) = m.finish() {
                report_unterminated(source, &tokens, &open, sink);
            }
        }
        self.project(text, &tokens, input, output)
    }

    /// Like [`scan`](Self::scan), but each automaton walks the stream on its
    /// own rayon task. The result is identical.
    pub fn scan_parallel<'s>(
        &mut self,
        text: &mut TaggedText<'s>,
        input: &str,
        output: &str,
        sink: &DiagnosticSink,
    ) -> Result<ScanResult<'s>, EngineError> {
        let tokens = self.stream(text, input)?;
        let source = text.source();
        let pairs = &self.pairs;
        self.matchers
            .par_iter_mut()
            .try_for_each(|m| -> Result<(), PatternError> {
                m.reset();
                for (i, token) in tokens.iter().enumerate() {
                    if let Some(mismatch) = m.feed(i, token, pairs)? {
                        report_mismatch(source, &tokens, &mismatch, sink);
                    }
                }
                if let Some(open) = m.finish() {
                    report_unterminated(source, &tokens, &open, sink);
                }
                Ok(())
            })?;
        self.project(text, &tokens, input, output)
    }

    fn stream<'s>(&self, text: &TaggedText<'s>, input: &str) -> Result<Vec<Token<'s>>, TagError> {
        Ok(text
            .tokens(input)?
            .filter(|t| !self.skip.iter().any(|s| t.tag.matches(s)))
            .collect())
    }

    fn project<'s>(
        &mut self,
        text: &mut TaggedText<'s>,
        tokens: &[Token<'s>],
        input: &str,
        output: &str,
    ) -> Result<ScanResult<'s>, EngineError> {
        text.copy_perspective(input, output)?;
        let mut result = ScanResult::new();
        let mut total = 0;
        for m in &mut self.matchers {
            let matches: Vec<Match<'s>> = m
                .take_completed()
                .into_iter()
                .map(|run| Match {
                    tokens: run.into_iter().map(|i| tokens[i].clone()).collect(),
                })
                .collect();
            for found in &matches {
                let span = found.span();
                text.tag(output, span.start, span.end, m.tag().clone())?;
            }
            total += matches.len();
            result.insert(
                m.name().to_string(),
                MatchSet {
                    tag: m.tag().clone(),
                    matches,
                },
            );
        }
        debug!(input, output, tokens = tokens.len(), matches = total, "grouper pass");
        Ok(result)
    }
}

fn report_mismatch(
    source: &SourceText,
    tokens: &[Token<'_>],
    mismatch: &Mismatch,
    sink: &DiagnosticSink,
) {
    let token = &tokens[mismatch.token];
    let loc = source.location(token.span.start);
    warn!(pattern = %mismatch.pattern, %loc, text = token.text, "syntax mismatch");
    sink.emit(
        Diagnostic::from_code(
            DiagnosticCode::SYNTAX_MISMATCH,
            format!("unexpected `{}` in {}", token.text.trim(), mismatch.pattern),
            token.span,
        )
        .with_note(format!("expected {}, found {}", mismatch.expected, token.tag)),
    );
}

fn report_unterminated(
    source: &SourceText,
    tokens: &[Token<'_>],
    open: &Unterminated,
    sink: &DiagnosticSink,
) {
    let token = &tokens[open.opener];
    let loc = source.location(token.span.start);
    warn!(pattern = %open.pattern, %loc, "unterminated group");
    sink.emit(
        Diagnostic::from_code(
            DiagnosticCode::UNTERMINATED_GROUP,
            format!("unterminated `{}` in {}", token.text.trim(), open.pattern),
            token.span,
        )
        .with_note(format!("expected {} before end of input", open.expected)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Lexicon;
    use crate::tag::category::{COMMENT, GENERIC, KEYWORD, RESERVED, WHITESPACE};
    use crate::tag::TagValue;
    use crate::tokenizer::KEYWORDS;

    const LPAREN: TagValue = 1;
    const RPAREN: TagValue = 2;
    const SEMI: TagValue = 3;
    const EQ: TagValue = 4;
    const LET: TagValue = 1;
    const STMT: TagValue = 16;
    const GROUP: TagValue = 17;

    fn tokenizer() -> Arc<Tokenizer> {
        let lex = Lexicon::new()
            .keyword("let", LET)
            .reserved("(", LPAREN)
            .reserved(")", RPAREN)
            .reserved(";", SEMI)
            .reserved("=", EQ)
            .pair("(", ")");
        Arc::new(Tokenizer::new(lex).unwrap())
    }

    fn grouper() -> Grouper {
        let mut g = Grouper::new(tokenizer());
        g.skip(COMMENT)
            .add(
                "let",
                (STMT, LET),
                Pattern::new()
                    .must((KEYWORD, LET))
                    .must(WHITESPACE)
                    .must(GENERIC)
                    .can(WHITESPACE)
                    .must((RESERVED, EQ))
                    .collect((RESERVED, SEMI))
                    .guard(|t| t.tag.category() == Some(KEYWORD)),
            )
            .add("group", GROUP, Pattern::new().complete((RESERVED, LPAREN)));
        g
    }

    #[test]
    fn scan_collects_and_projects() {
        let src = SourceText::new("t", "let a = (b);\nlet c=d;");
        let mut g = grouper();
        let mut text = g.tokenize(&src).unwrap();
        let sink = DiagnosticSink::new();
        let result = g.scan(&mut text, KEYWORDS, "layer0", &sink).unwrap();

        let lets: Vec<&str> = result["let"].matches.iter().map(|m| m.text(&src)).collect();
        assert_eq!(lets, vec!["let a = (b);", "let c=d;"]);
        assert_eq!(result["group"].matches.len(), 1);
        assert!(sink.is_empty());

        // `group` is registered after `let`, so its tag wins inside the first statement.
        let layer: Vec<(String, String)> = text
            .tokens("layer0")
            .unwrap()
            .map(|t| (t.text.to_string(), t.tag.to_string()))
            .collect();
        assert_eq!(
            layer,
            vec![
                ("let a = ".into(), "(16, 1)".into()),
                ("(b)".into(), "(17)".into()),
                (";".into(), "(16, 1)".into()),
                ("\n".into(), "(5)".into()),
                ("let c=d;".into(), "(16, 1)".into()),
            ]
        );
        // The input perspective is untouched.
        assert!(text.perspective(KEYWORDS).unwrap().intervals().len() > 10);
    }

    #[test]
    fn skipped_tokens_are_invisible() {
        let src = SourceText::new("t", "let /* c */ a = b;");
        let mut g = grouper();
        let mut text = g.tokenize(&src).unwrap();
        let result = g
            .scan(&mut text, KEYWORDS, "layer0", &DiagnosticSink::new())
            .unwrap();
        // The comment sits between two whitespace tokens; with it hidden the
        // pattern sees `let`, ` `, ` `, `a` and fails on the second space.
        assert!(result["let"].matches.is_empty());

        let src = SourceText::new("t", "let a/* c */= b;");
        let mut text = g.tokenize(&src).unwrap();
        let result = g
            .scan(&mut text, KEYWORDS, "layer0", &DiagnosticSink::new())
            .unwrap();
        assert_eq!(result["let"].matches[0].consumed_text(), "let a= b;");
        assert_eq!(result["let"].matches[0].text(&src), "let a/* c */= b;");
    }

    #[test]
    fn mismatch_becomes_warning() {
        let src = SourceText::new("t", "let a = b\nlet c = d;");
        let mut g = grouper();
        let mut text = g.tokenize(&src).unwrap();
        let sink = DiagnosticSink::new();
        let result = g.scan(&mut text, KEYWORDS, "layer0", &sink).unwrap();

        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::SYNTAX_MISMATCH);
        assert_eq!(src.location(diags[0].span.start).line, 2);
        // The second statement is still found.
        assert_eq!(result["let"].matches.len(), 1);
        assert_eq!(result["let"].matches[0].text(&src), "let c = d;");
    }

    #[test]
    fn unterminated_group_becomes_warning() {
        let src = SourceText::new("t", "x = (a");
        let mut g = grouper();
        let mut text = g.tokenize(&src).unwrap();
        let sink = DiagnosticSink::new();
        let result = g.scan(&mut text, KEYWORDS, "layer0", &sink).unwrap();
        assert!(result["group"].matches.is_empty());
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::UNTERMINATED_GROUP);
        assert_eq!(diags[0].span.start, 4);
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let src = SourceText::new("t", "let a = (b);\nlet c = ((d));\n(e");
        let mut g = grouper();

        let mut seq_text = g.tokenize(&src).unwrap();
        let seq_sink = DiagnosticSink::new();
        let seq = g.scan(&mut seq_text, KEYWORDS, "out", &seq_sink).unwrap();

        let mut par_text = g.tokenize(&src).unwrap();
        let par_sink = DiagnosticSink::new();
        let par = g
            .scan_parallel(&mut par_text, KEYWORDS, "out", &par_sink)
            .unwrap();

        for (name, set) in &seq {
            assert_eq!(set.matches, par[name].matches, "automaton {name}");
        }
        assert_eq!(
            seq_text.perspective("out").unwrap(),
            par_text.perspective("out").unwrap()
        );
        assert_eq!(seq_sink.take_all().len(), par_sink.take_all().len());
    }

    #[test]
    fn rescanning_starts_fresh() {
        let src = SourceText::new("t", "let a = b;");
        let mut g = grouper();
        for _ in 0..2 {
            let mut text = g.tokenize(&src).unwrap();
            let result = g
                .scan(&mut text, KEYWORDS, "layer0", &DiagnosticSink::new())
                .unwrap();
            assert_eq!(result["let"].matches.len(), 1);
        }
    }

    #[test]
    fn validate_and_extra_pairs() {
        let mut g = Grouper::new(tokenizer());
        g.add("stmt", STMT, Pattern::new().complete((STMT, LET)));
        assert!(g.validate().is_err());
        g.pair((STMT, LET), (STMT, 99u32));
        assert!(g.validate().is_ok());
    }

    #[test]
    fn unknown_input_perspective() {
        let src = SourceText::new("t", "x");
        let mut g = grouper();
        let mut text = g.tokenize(&src).unwrap();
        let err = g
            .scan(&mut text, "nope", "out", &DiagnosticSink::new())
            .unwrap_err();
        assert!(matches!(err, EngineError::Tag(TagError::UnknownPerspective(_))));
    }
}
