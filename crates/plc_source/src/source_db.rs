//! Central database of every input file read during a checker session.

use crate::source_file::SourceFile;
use crate::span::{FileId, Span};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Owns all loaded input text and resolves spans for diagnostics.
pub struct SourceDb {
    files: Vec<SourceFile>,
}

/// A span resolved to 1-indexed line/column coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpan {
    /// The path of the file.
    pub file_path: PathBuf,
    /// The starting line number.
    pub start_line: u32,
    /// The starting column number.
    pub start_col: u32,
    /// The ending line number.
    pub end_line: u32,
    /// The ending column number.
    pub end_col: u32,
}

impl fmt::Display for ResolvedSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file_path.display(),
            self.start_line,
            self.start_col
        )
    }
}

impl SourceDb {
    /// Creates an empty source database.
    pub fn new() -> Self {
        Self { files: Vec::new() }
    }

    /// Reads a file from disk and returns its [`FileId`].
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds an in-memory file; `name` is shown in diagnostics.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        let id = FileId::from_raw(self.files.len() as u32);
        self.files.push(SourceFile::new(id, name.into(), content));
        id
    }

    /// Returns the file for `id`, or `None` for the dummy or an unknown ID.
    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.as_raw() as usize)
    }

    /// Returns the file for `id`.
    ///
    /// # Panics
    ///
    /// Panics if the `FileId` was not produced by this database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.as_raw() as usize]
    }

    /// Resolves a [`Span`] to line/column coordinates.
    ///
    /// Returns `None` for dummy spans.
    pub fn resolve_span(&self, span: Span) -> Option<ResolvedSpan> {
        let file = self.file(span.file)?;
        let (start_line, start_col) = file.line_col(span.start);
        let (end_line, end_col) = file.line_col(span.end.saturating_sub(1).max(span.start));
        Some(ResolvedSpan {
            file_path: file.path.clone(),
            start_line,
            start_col,
            end_line,
            end_col,
        })
    }

    /// Returns the text covered by a [`Span`], or `""` for dummy spans.
    pub fn snippet(&self, span: Span) -> &str {
        self.file(span.file)
            .map_or("", |file| file.snippet(span.start, span.end))
    }
}

impl Default for SourceDb {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_token_span() {
        let mut db = SourceDb::new();
        let id = db.add_source("arch.scl", "SITEMAP 2 2\nX0Y1 PLB\n".to_string());
        let record = db.get_file(id).records().nth(1).unwrap();
        let resolved = db.resolve_span(record.span_of(1)).unwrap();
        assert_eq!(resolved.file_path, PathBuf::from("arch.scl"));
        assert_eq!((resolved.start_line, resolved.start_col), (2, 6));
        assert_eq!(resolved.end_col, 8);
        assert_eq!(resolved.to_string(), "arch.scl:2:6");
    }

    #[test]
    fn dummy_span_does_not_resolve() {
        let db = SourceDb::new();
        assert!(db.resolve_span(Span::DUMMY).is_none());
        assert_eq!(db.snippet(Span::DUMMY), "");
    }

    #[test]
    fn files_get_distinct_ids() {
        let mut db = SourceDb::new();
        let a = db.add_source("a.lib", "CELL A".to_string());
        let b = db.add_source("b.lib", "CELL B".to_string());
        assert_ne!(a, b);
        assert_eq!(db.snippet(Span::new(b, 5, 6)), "B");
    }

    #[test]
    fn load_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("design.timing");
        std::fs::write(&path, "inst_0 I_1\n").unwrap();

        let mut db = SourceDb::new();
        let id = db.load_file(&path).unwrap();
        assert_eq!(db.get_file(id).content, "inst_0 I_1\n");
        assert!(db.load_file(&dir.path().join("missing")).is_err());
    }
}
