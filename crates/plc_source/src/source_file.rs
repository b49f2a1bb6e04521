//! A loaded input file with line indexing and record tokenization.

use crate::span::{FileId, Span};
use std::path::PathBuf;

/// An input file loaded into the [`SourceDb`](crate::SourceDb).
pub struct SourceFile {
    /// The identifier of this file.
    pub id: FileId,
    /// Path of the file, or a synthetic name for in-memory inputs.
    pub path: PathBuf,
    /// The full text content of the file.
    pub content: String,
    line_starts: Vec<u32>,
}

/// A whitespace-separated token together with its location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The token text.
    pub text: &'a str,
    /// Where the token sits in its file.
    pub span: Span,
}

/// One meaningful line of an input file.
///
/// Blank lines and lines whose first non-blank character is `#` never become
/// records.
#[derive(Clone, Debug)]
pub struct Record<'a> {
    /// 1-indexed line number.
    pub line: u32,
    /// Span of the whole line without its terminator.
    pub span: Span,
    /// The line's tokens in order.
    pub tokens: Vec<Token<'a>>,
}

impl<'a> Record<'a> {
    /// Returns the text of token `index`, if present.
    pub fn text(&self, index: usize) -> Option<&'a str> {
        self.tokens.get(index).map(|t| t.text)
    }

    /// Returns the span of token `index`, falling back to the whole line.
    pub fn span_of(&self, index: usize) -> Span {
        self.tokens.get(index).map_or(self.span, |t| t.span)
    }

    /// Returns the first token's text (the keyword of most formats).
    pub fn keyword(&self) -> &'a str {
        self.text(0).unwrap_or("")
    }

    /// Returns the number of tokens on the line.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if the line has no tokens (never the case for records
    /// produced by [`SourceFile::records`]).
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl SourceFile {
    /// Creates a new `SourceFile` with precomputed line starts.
    pub fn new(id: FileId, path: PathBuf, content: String) -> Self {
        let line_starts = compute_line_starts(&content);
        Self {
            id,
            path,
            content,
            line_starts,
        }
    }

    /// Converts a byte offset into 1-indexed (line, column) coordinates.
    pub fn line_col(&self, byte_offset: u32) -> (u32, u32) {
        let line_idx = match self.line_starts.binary_search(&byte_offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line = (line_idx as u32) + 1;
        let col = byte_offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Returns the text of the line containing `byte_offset`, without its terminator.
    pub fn line_text(&self, byte_offset: u32) -> &str {
        let (line, _) = self.line_col(byte_offset);
        let start = self.line_starts[(line - 1) as usize] as usize;
        let end = self.content[start..]
            .find('\n')
            .map_or(self.content.len(), |pos| start + pos);
        self.content[start..end].trim_end_matches('\r')
    }

    /// Returns a substring of the file content between byte offsets.
    pub fn snippet(&self, start: u32, end: u32) -> &str {
        &self.content[start as usize..end as usize]
    }

    /// Iterates the meaningful lines of the file as tokenized records.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> + '_ {
        self.line_starts
            .iter()
            .enumerate()
            .filter_map(move |(idx, &start)| {
                let rest = &self.content[start as usize..];
                let len = rest.find('\n').unwrap_or(rest.len());
                let text = rest[..len].trim_end_matches('\r');
                let trimmed = text.trim_start();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return None;
                }
                Some(Record {
                    line: idx as u32 + 1,
                    span: Span::new(self.id, start, start + text.len() as u32),
                    tokens: tokenize(self.id, start, text),
                })
            })
    }
}

fn tokenize(file: FileId, line_start: u32, text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut begin = None;
    for (i, ch) in text.char_indices() {
        match (ch.is_whitespace(), begin) {
            (false, None) => begin = Some(i),
            (true, Some(b)) => {
                tokens.push(make_token(file, line_start, text, b, i));
                begin = None;
            }
            _ => {}
        }
    }
    if let Some(b) = begin {
        tokens.push(make_token(file, line_start, text, b, text.len()));
    }
    tokens
}

fn make_token(file: FileId, line_start: u32, text: &str, begin: usize, end: usize) -> Token<'_> {
    Token {
        text: &text[begin..end],
        span: Span::new(file, line_start + begin as u32, line_start + end as u32),
    }
}

fn compute_line_starts(content: &str) -> Vec<u32> {
    let mut starts = vec![0u32];
    for (i, byte) in content.bytes().enumerate() {
        if byte == b'\n' {
            starts.push((i + 1) as u32);
        }
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_file(content: &str) -> SourceFile {
        SourceFile::new(
            FileId::from_raw(0),
            PathBuf::from("design.nodes"),
            content.to_string(),
        )
    }

    #[test]
    fn line_col_resolution() {
        let f = make_file("abc\ndef\nghi");
        assert_eq!(f.line_col(0), (1, 1));
        assert_eq!(f.line_col(5), (2, 2));
        assert_eq!(f.line_col(8), (3, 1));
    }

    #[test]
    fn records_skip_comments_and_blanks() {
        let f = make_file("# header\n\nX0Y0Z0 LUT4 inst_0\n   \n  # indented comment\nX1Y0Z3 SEQ inst_1 FIXED\n");
        let records: Vec<_> = f.records().collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].line, 3);
        assert_eq!(records[0].keyword(), "X0Y0Z0");
        assert_eq!(records[1].line, 6);
        assert_eq!(records[1].len(), 4);
        assert_eq!(records[1].text(3), Some("FIXED"));
        assert_eq!(records[1].text(4), None);
    }

    #[test]
    fn token_spans_point_into_content() {
        let f = make_file("net net_1 2\n  inst_3   O_0\n");
        let records: Vec<_> = f.records().collect();
        let pin = records[1].tokens[1];
        assert_eq!(pin.text, "O_0");
        assert_eq!(f.snippet(pin.span.start, pin.span.end), "O_0");
        assert_eq!(f.line_col(pin.span.start), (2, 12));
    }

    #[test]
    fn missing_token_span_falls_back_to_line() {
        let f = make_file("SITEMAP 4\n");
        let record = f.records().next().unwrap();
        assert_eq!(record.span_of(2), record.span);
    }

    #[test]
    fn crlf_lines() {
        let f = make_file("CELL LUT2\r\nEND_CELL\r\n");
        let records: Vec<_> = f.records().collect();
        assert_eq!(records[0].text(1), Some("LUT2"));
        assert_eq!(records[1].keyword(), "END_CELL");
        assert_eq!(f.line_text(records[0].span.start), "CELL LUT2");
    }

    #[test]
    fn empty_file_has_no_records() {
        let f = make_file("");
        assert_eq!(f.records().count(), 0);
        assert_eq!(f.line_col(0), (1, 1));
    }
}
