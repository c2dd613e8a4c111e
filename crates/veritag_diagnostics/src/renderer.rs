//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use crossterm::style::Stylize;
use veritag_source::SourceText;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic against the text it was reported for.
    fn render(&self, diag: &Diagnostic, source: &SourceText) -> String;
}

/// Renders diagnostics in a rustc-style terminal format.
///
/// ```text
/// warning[W101]: unexpected `endmodule` in `declaration`
///   --> top.v:3:1
///    |
///  3 | endmodule
///    | ^^^^^^^^^
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// The terminal width; longer source lines are truncated.
    pub width: u16,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, width: u16) -> Self {
        Self { color, width }
    }

    fn header(&self, diag: &Diagnostic) -> String {
        let head = format!("{}[{}]", diag.severity, diag.code);
        if !self.color {
            return head;
        }
        match diag.severity {
            Severity::Error => head.red().bold().to_string(),
            Severity::Warning => head.yellow().bold().to_string(),
            Severity::Note => head.cyan().bold().to_string(),
        }
    }

    fn gutter(&self, text: &str) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source: &SourceText) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}: {}\n", self.header(diag), diag.message));

        if diag.span.start <= source.len() {
            let loc = source.location(diag.span.start);
            out.push_str(&format!(
                "  {} {}:{loc}\n",
                self.gutter("-->"),
                source.name.display()
            ));

            let line_num = loc.line.to_string();
            let padding = " ".repeat(line_num.len());
            let line = source.line_containing(diag.span.start);
            let shown: String = line.chars().take(self.width as usize).collect();

            // Underline stops at the end of the displayed line.
            let col = loc.column - 1;
            let room = shown.len().saturating_sub(col).max(1);
            let carets = "^".repeat(diag.span.len().clamp(1, room));
            let carets = if self.color {
                carets.yellow().bold().to_string()
            } else {
                carets
            };

            out.push_str(&format!("{} {}\n", padding, self.gutter("|")));
            out.push_str(&format!("{} {} {shown}\n", self.gutter(&line_num), self.gutter("|")));
            out.push_str(&format!(
                "{} {} {}{carets}\n",
                padding,
                self.gutter("|"),
                " ".repeat(col)
            ));
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use veritag_source::Span;

    #[test]
    fn render_warning_with_span() {
        let source = SourceText::new("top.v", "wire a;\nwire b endmodule\n");
        let diag = Diagnostic::warning(
            DiagnosticCode::SYNTAX_MISMATCH,
            "unexpected `endmodule`",
            Span::new(15, 24),
        );
        let output = TerminalRenderer::new(false, 80).render(&diag, &source);

        assert!(output.contains("warning[W101]: unexpected `endmodule`"));
        assert!(output.contains("--> top.v:2:8"));
        assert!(output.contains("2 | wire b endmodule"));
        assert!(output.contains("  |        ^^^^^^^^^"));
    }

    #[test]
    fn render_notes_and_help() {
        let source = SourceText::new("t.v", "x");
        let diag = Diagnostic::warning(
            DiagnosticCode::UNTERMINATED_GROUP,
            "unterminated group",
            Span::new(0, 1),
        )
        .with_note("opened here")
        .with_help("add the closing symbol");
        let output = TerminalRenderer::new(false, 80).render(&diag, &source);
        assert!(output.contains("= note: opened here"));
        assert!(output.contains("= help: add the closing symbol"));
    }

    #[test]
    fn colored_output_has_escape_codes() {
        let source = SourceText::new("t.v", "x");
        let diag = Diagnostic::warning(DiagnosticCode::SYNTAX_MISMATCH, "m", Span::new(0, 1));
        let plain = TerminalRenderer::new(false, 80).render(&diag, &source);
        let colored = TerminalRenderer::new(true, 80).render(&diag, &source);
        assert!(!plain.contains('\x1b'));
        assert!(colored.contains('\x1b'));
    }
}
