//! `veritag parse`: run the structural parser and list every match.

use crate::report::{match_records, ParseReport};
use crate::{input, GlobalArgs, ParseArgs, ReportFormat};
use veritag_diagnostics::{DiagnosticRenderer, DiagnosticSink, Severity, TerminalRenderer};
use veritag_verilog::VerilogStructuralParser;

/// Runs the `veritag parse` command.
///
/// Returns exit code 0 unless an error-severity diagnostic was reported.
pub fn run(args: &ParseArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let source = input::read_source(&args.file)?;
    let sink = DiagnosticSink::new();
    let mut parser = VerilogStructuralParser::new()?.parallel(args.parallel);
    let out = parser.parse(&source, &sink)?;

    let diagnostics = sink.diagnostics();
    let records = match_records(&out, &source);

    match args.format {
        ReportFormat::Text => {
            for record in &records {
                println!("{}", record.to_line());
            }
            let renderer = TerminalRenderer::new(global.color, 80);
            for diag in &diagnostics {
                if global.quiet && !diag.severity.is_error() {
                    continue;
                }
                eprintln!("{}", renderer.render(diag, &source));
            }
        }
        ReportFormat::Json => {
            let report = ParseReport {
                file: args.file.display().to_string(),
                matches: records,
                diagnostics: &diagnostics,
            };
            let json =
                serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }

    let warning_count = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} warning(s)",
            sink.error_count(),
            warning_count
        );
    }

    if sink.has_errors() {
        Ok(1)
    } else {
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn global() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: None,
        }
    }

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("top.v");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn parse_clean_module() {
        let tmp = TempDir::new().unwrap();
        let file = write(
            tmp.path(),
            "module top(input a, output b);\n  assign b = a;\nendmodule\n",
        );
        for parallel in [false, true] {
            for format in [ReportFormat::Text, ReportFormat::Json] {
                let args = ParseArgs {
                    file: file.clone(),
                    format,
                    parallel,
                };
                assert_eq!(run(&args, &global()).unwrap(), 0);
            }
        }
    }

    #[test]
    fn mismatches_are_warnings_not_failures() {
        let tmp = TempDir::new().unwrap();
        let file = write(tmp.path(), "wire x\nassign y = z;\n");
        let args = ParseArgs {
            file,
            format: ReportFormat::Text,
            parallel: false,
        };
        assert_eq!(run(&args, &global()).unwrap(), 0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let args = ParseArgs {
            file: tmp.path().join("gone.v"),
            format: ReportFormat::Text,
            parallel: false,
        };
        assert!(run(&args, &global()).is_err());
    }
}
