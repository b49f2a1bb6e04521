//! Terminal rendering of diagnostics.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use plc_source::SourceDb;

/// Formats diagnostics for an output target.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// Renders diagnostics in a rustc-like layout.
///
/// ```text
/// error[P002]: instance inst_7 is defined twice
///   --> design.nodes:12:8
///    |
/// 12 | X1Y2Z0 SEQ inst_7
///    |            ^^^^^^ first defined on line 3
///    |
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, severity: Severity) -> String {
        if !self.color {
            return text.to_string();
        }
        let ansi = match severity {
            Severity::Error => "1;31",
            Severity::Warning => "1;33",
            Severity::Note => "1;36",
        };
        format!("\x1b[{ansi}m{text}\x1b[0m")
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();
        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(&header, diag.severity),
            diag.message
        ));

        if let (Some(resolved), Some(file)) = (
            source_db.resolve_span(diag.primary_span),
            source_db.file(diag.primary_span.file),
        ) {
            out.push_str(&format!("  --> {resolved}\n"));

            let line_num = resolved.start_line.to_string();
            let padding = " ".repeat(line_num.len());
            let line_content = file.line_text(diag.primary_span.start);
            out.push_str(&format!("{padding} |\n"));
            out.push_str(&format!("{line_num} | {line_content}\n"));

            let span_len = diag.primary_span.len().max(1) as usize;
            let col_padding = " ".repeat((resolved.start_col as usize).saturating_sub(1));
            let label = diag
                .label
                .as_ref()
                .map(|l| format!(" {l}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "{padding} | {col_padding}{}{label}\n",
                "^".repeat(span_len)
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
