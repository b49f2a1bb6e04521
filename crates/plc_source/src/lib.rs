//! Input file management and span tracking for diagnostics.
//!
//! Every architecture and design file read by the checker is loaded into the
//! [`SourceDb`]. Loaders walk a file's [`Record`]s, the non-blank,
//! non-comment lines split into whitespace-separated [`Token`]s, and attach
//! each token's [`Span`] to any diagnostic they emit so the renderer can point
//! at `file:line:col`.

#![warn(missing_docs)]

pub mod source_db;
pub mod source_file;
pub mod span;

pub use source_db::{ResolvedSpan, SourceDb};
pub use source_file::{Record, SourceFile, Token};
pub use span::{FileId, Span};
