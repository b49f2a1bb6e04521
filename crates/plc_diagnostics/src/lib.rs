//! Diagnostic creation, accumulation, and terminal rendering.
//!
//! Loaders and checks report every problem they find as a structured
//! [`Diagnostic`] into a [`DiagnosticSink`] instead of stopping at the first
//! one. The command driver renders the accumulated diagnostics with the
//! [`TerminalRenderer`] and decides success from the sink's error count.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::{Checkpoint, DiagnosticSink};
