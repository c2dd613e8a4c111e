//! The three-pass structural parser.

use crate::lexicon::verilog_lexicon;
use crate::patterns;
use std::sync::Arc;
use tracing::debug;
use veritag_diagnostics::DiagnosticSink;
use veritag_engine::tokenizer::KEYWORDS;
use veritag_engine::{category, EngineError, Grouper, ScanResult, TaggedText, Tokenizer};
use veritag_source::SourceText;

/// Statement layer: declarations, assigns, ports and block openers.
pub const LAYER0: &str = "layer0";
/// Assignment layer: assignments inside blocks and delayed openers.
pub const LAYER1: &str = "layer1";
/// Block layer: module instantiations and whole `begin ... end` blocks.
pub const LAYER2: &str = "layer2";

struct Pass {
    input: &'static str,
    output: &'static str,
    grouper: Grouper,
}

/// The matches one pass produced, named after its output layer.
#[derive(Debug)]
pub struct PassResult<'s> {
    /// The perspective the pass wrote.
    pub layer: &'static str,
    /// Completed matches keyed by automaton name.
    pub matches: ScanResult<'s>,
}

/// Everything a parse produced.
#[derive(Debug)]
pub struct ParseOutput<'s> {
    /// The lexical perspectives plus one perspective per pass.
    pub text: TaggedText<'s>,
    /// Per-pass matches, in pass order.
    pub passes: Vec<PassResult<'s>>,
}

impl<'s> ParseOutput<'s> {
    /// Returns the result of the pass that wrote `layer`.
    pub fn pass(&self, layer: &str) -> Option<&PassResult<'s>> {
        self.passes.iter().find(|p| p.layer == layer)
    }
}

/// Recognizes Verilog structure in three [`Grouper`] passes over one
/// tokenizer.
///
/// Comments are hidden from every pass. Syntax mismatches are reported to
/// the sink given to [`parse`](Self::parse) and never stop the parse.
pub struct VerilogStructuralParser {
    tokenizer: Arc<Tokenizer>,
    passes: Vec<Pass>,
    parallel: bool,
}

impl VerilogStructuralParser {
    /// Builds the tokenizer and every pass, checking all `complete` entries
    /// against their pair tables.
    pub fn new() -> Result<Self, EngineError> {
        let tokenizer = Arc::new(Tokenizer::new(verilog_lexicon())?);
        let builders: [(&'static str, &'static str, fn(&mut Grouper)); 3] = [
            (KEYWORDS, LAYER0, patterns::statements),
            (LAYER0, LAYER1, patterns::assignments),
            (LAYER1, LAYER2, patterns::blocks),
        ];
        let mut passes = Vec::with_capacity(builders.len());
        for (input, output, build) in builders {
            let mut grouper = Grouper::new(Arc::clone(&tokenizer));
            grouper.skip(category::COMMENT);
            build(&mut grouper);
            grouper.validate()?;
            passes.push(Pass {
                input,
                output,
                grouper,
            });
        }
        Ok(Self {
            tokenizer,
            passes,
            parallel: false,
        })
    }

    /// Runs the automata of each pass on separate rayon tasks.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the shared tokenizer.
    pub fn tokenizer(&self) -> &Arc<Tokenizer> {
        &self.tokenizer
    }

    /// Returns the output layer of every pass, in order.
    pub fn layers(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.passes.iter().map(|p| p.output)
    }

    /// Tokenizes `source` and runs every pass in order.
    pub fn parse<'s>(
        &mut self,
        source: &'s SourceText,
        sink: &DiagnosticSink,
    ) -> Result<ParseOutput<'s>, EngineError> {
        let mut text = self.tokenizer.tokenize(source)?;
        let mut results = Vec::with_capacity(self.passes.len());
        for pass in &mut self.passes {
            let matches = if self.parallel {
                pass.grouper
                    .scan_parallel(&mut text, pass.input, pass.output, sink)?
            } else {
                pass.grouper.scan(&mut text, pass.input, pass.output, sink)?
            };
            results.push(PassResult {
                layer: pass.output,
                matches,
            });
        }
        debug!(file = %source.name.display(), passes = results.len(), "parsed");
        Ok(ParseOutput {
            text,
            passes: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{block, statement, structure};
    use veritag_engine::CompoundTag;

    fn texts<'s>(out: &ParseOutput<'s>, src: &'s SourceText, layer: &str, name: &str) -> Vec<&'s str> {
        out.pass(layer).unwrap().matches[name]
            .matches
            .iter()
            .map(|m| m.text(src))
            .collect()
    }

    #[test]
    fn builds_and_lists_layers() {
        let parser = VerilogStructuralParser::new().unwrap();
        assert_eq!(parser.layers().collect::<Vec<_>>(), vec![LAYER0, LAYER1, LAYER2]);
    }

    #[test]
    fn every_layer_is_a_perspective() {
        let src = SourceText::new("t.v", "wire x;\n");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        for layer in [LAYER0, LAYER1, LAYER2] {
            assert!(out.text.perspective(layer).unwrap().is_complete());
        }
        assert_eq!(out.passes.len(), 3);
    }

    #[test]
    fn comments_are_invisible_to_patterns() {
        let src = SourceText::new("t.v", "wire x /* bus */;");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        assert_eq!(texts(&out, &src, LAYER0, "wiredecs"), vec!["wire x /* bus */;"]);
    }

    #[test]
    fn bare_begin_end_block() {
        let src = SourceText::new("t.v", "initial begin\n  x = 1;\n  begin y = 2; end\nend\n");
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        assert_eq!(texts(&out, &src, LAYER1, "blocking"), vec!["x = 1;", "y = 2;"]);
        let blocks = texts(&out, &src, LAYER2, "blocks");
        assert_eq!(blocks, vec!["initial begin\n  x = 1;\n  begin y = 2; end\nend"]);
        let layer2 = out.text.perspective(LAYER2).unwrap();
        let sequential: CompoundTag = (structure::BLOCK, block::SEQUENTIAL).into();
        assert_eq!(layer2.ranges_of(&sequential).count(), 1);
    }

    #[test]
    fn module_header_overwrites_its_ports() {
        let src = SourceText::new(
            "t.v",
            "module counter #(parameter W = 8) (\n  input wire clk,\n  output reg [W-1:0] q\n);\nendmodule\n",
        );
        let mut parser = VerilogStructuralParser::new().unwrap();
        let out = parser.parse(&src, &DiagnosticSink::new()).unwrap();
        let headers = texts(&out, &src, LAYER0, "modules");
        assert_eq!(headers.len(), 1);
        assert!(headers[0].ends_with(");"));
        assert_eq!(texts(&out, &src, LAYER0, "ports").len(), 2);
        let layer0 = out.text.perspective(LAYER0).unwrap();
        let ports: CompoundTag = (structure::STATEMENT, statement::PORTS).into();
        assert_eq!(layer0.ranges_of(&ports).count(), 0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let src = SourceText::new(
            "t.v",
            "module m;\n  reg a;\n  always @(posedge clk) begin a <= b; end\nendmodule\n",
        );
        let sink = DiagnosticSink::new();
        let mut seq = VerilogStructuralParser::new().unwrap();
        let mut par = VerilogStructuralParser::new().unwrap().parallel(true);
        let a = seq.parse(&src, &sink).unwrap();
        let b = par.parse(&src, &sink).unwrap();
        for layer in [LAYER0, LAYER1, LAYER2] {
            assert_eq!(
                a.text.perspective(layer).unwrap(),
                b.text.perspective(layer).unwrap()
            );
        }
    }
}
