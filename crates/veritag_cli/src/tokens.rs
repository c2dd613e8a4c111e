//! `veritag tokens`: print one perspective of a file.

use crate::report::TokenRecord;
use crate::{input, GlobalArgs, ReportFormat, TokensArgs};
use tracing::debug;
use veritag_config::VeritagConfig;
use veritag_diagnostics::DiagnosticSink;
use veritag_engine::{render_colored, ColorMap, TaggedText};
use veritag_source::SourceText;
use veritag_verilog::{structure_colors, VerilogStructuralParser};

/// Runs the `veritag tokens` command.
///
/// With a `[lexicon]` in the configuration only the lexical perspectives of
/// that lexicon exist; otherwise the Verilog parser runs and its layers can
/// be printed too.
pub fn run(args: &TokensArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = input::load_config(global)?;
    let source = input::read_source(&args.file)?;
    let (text, colors) = tag_source(&config, &source)?;

    match args.format {
        ReportFormat::Text if args.list => {
            for token in text.tokens(&args.perspective)? {
                println!("{}", TokenRecord::new(&token, &source).to_line());
            }
        }
        ReportFormat::Text => {
            let colors = if global.color { colors } else { ColorMap::new() };
            print!("{}", render_colored(&text, &args.perspective, &colors)?);
        }
        ReportFormat::Json => {
            let records: Vec<TokenRecord<'_>> = text
                .tokens(&args.perspective)?
                .map(|t| TokenRecord::new(&t, &source))
                .collect();
            let json =
                serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
    Ok(0)
}

/// Builds every perspective available for `source` under `config`, with the
/// color map that suits them.
fn tag_source<'s>(
    config: &VeritagConfig,
    source: &'s SourceText,
) -> Result<(TaggedText<'s>, ColorMap), Box<dyn std::error::Error>> {
    let colors = config.color_map()?;
    match &config.lexicon {
        Some(lexicon) => {
            debug!("tokenizing with configured lexicon");
            let text = lexicon.to_tokenizer()?.tokenize(source)?;
            Ok((text, colors))
        }
        None => {
            // Parse diagnostics are reported by `veritag parse`.
            let sink = DiagnosticSink::new();
            let out = VerilogStructuralParser::new()?.parse(source, &sink)?;
            Ok((out.text, colors.extend_from(&structure_colors())))
        }
    }
}
