//! Structured diagnostic messages.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use plc_source::Span;
use serde::{Deserialize, Serialize};

/// One reported problem.
///
/// Loader diagnostics point at the offending token through `primary_span`;
/// check diagnostics use [`Span::DUMMY`] and name the tile, instance or net
/// in the message and notes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of problem.
    pub code: DiagnosticCode,
    /// The main message.
    pub message: String,
    /// Where the problem was found, or [`Span::DUMMY`].
    pub primary_span: Span,
    /// Text printed under the caret line.
    pub label: Option<String>,
    /// Explanatory footnotes (`= note: ...`).
    pub notes: Vec<String>,
    /// Actionable suggestions (`= help: ...`).
    pub help: Vec<String>,
}

impl Diagnostic {
    fn with_severity(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            primary_span: span,
            label: None,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Error, code, message, span)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, span: Span) -> Self {
        Self::with_severity(Severity::Warning, code, message, span)
    }

    /// Sets the caret label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Adds a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error() {
        let diag = Diagnostic::error(
            DiagnosticCode::TYPE_MISMATCH,
            "inst_4 (DSP) cannot be placed on tile X3Y0",
            Span::DUMMY,
        );
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code.to_string(), "T001");
        assert!(diag.label.is_none());
    }

    #[test]
    fn builder_methods() {
        let diag = Diagnostic::warning(DiagnosticCode::MODEL_CHANGED, "model changed", Span::DUMMY)
            .with_label("was LUT4")
            .with_note("the node file declares LUT4")
            .with_help("keep the model of every instance");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.label.as_deref(), Some("was LUT4"));
        assert_eq!(diag.notes.len(), 1);
        assert_eq!(diag.help.len(), 1);
    }
}
