//! Accumulator for diagnostics emitted by loaders and checks.

use crate::diagnostic::Diagnostic;
use std::cell::{Cell, RefCell};

/// Collects diagnostics for a whole checker session.
///
/// The checker is single-threaded; the sink uses interior mutability so
/// loaders and checks can report through a shared reference while they
/// borrow the data model.
#[derive(Default)]
pub struct DiagnosticSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
    error_count: Cell<usize>,
}

/// The error count at some earlier point, used to tell whether a single
/// command raised errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl DiagnosticSink {
    /// Creates a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.error_count.set(self.error_count.get() + 1);
        }
        self.diagnostics.borrow_mut().push(diag);
    }

    /// Returns `true` if any error has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.get() > 0
    }

    /// Returns the number of errors emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.get()
    }

    /// Marks the current error count.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.error_count.get())
    }

    /// Returns how many errors were emitted since `mark`.
    pub fn errors_since(&self, mark: Checkpoint) -> usize {
        self.error_count.get() - mark.0
    }

    /// Takes all accumulated diagnostics, leaving the sink empty.
    ///
    /// The error count is not reset.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Returns a snapshot of all accumulated diagnostics without draining.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use plc_source::Span;

    fn make_error() -> Diagnostic {
        Diagnostic::error(DiagnosticCode::REGION_OVERFLOW, "too many clocks", Span::DUMMY)
    }

    fn make_warning() -> Diagnostic {
        Diagnostic::warning(DiagnosticCode::MODEL_CHANGED, "model changed", Span::DUMMY)
    }

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(sink.take_all().is_empty());
    }

    #[test]
    fn warnings_do_not_count() {
        let sink = DiagnosticSink::new();
        sink.emit(make_warning());
        assert!(!sink.has_errors());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn checkpoints_isolate_commands() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        let mark = sink.checkpoint();
        assert_eq!(sink.errors_since(mark), 0);
        sink.emit(make_warning());
        sink.emit(make_error());
        sink.emit(make_error());
        assert_eq!(sink.errors_since(mark), 2);
        assert_eq!(sink.error_count(), 3);
    }

    #[test]
    fn take_all_drains_but_keeps_count() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        sink.emit(make_warning());
        assert_eq!(sink.take_all().len(), 2);
        assert!(sink.take_all().is_empty());
        assert_eq!(sink.error_count(), 1);
    }
}
