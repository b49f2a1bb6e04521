//! Where lookup tables come from.

use crate::error::FluteError;
use crate::lut::{parse_lut, LutTable};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::path::PathBuf;

/// A provider of FLUTE lookup tables.
pub trait LutSource {
    /// Loads tables for degrees `4..=max_degree`.
    fn load(&self, max_degree: usize) -> Result<LutTable, FluteError>;

    /// A short human-readable description for log lines.
    fn describe(&self) -> String;
}

/// Reads the `powv` and `post` tables from disk.
#[derive(Debug, Clone)]
pub struct FileLutSource {
    powv: PathBuf,
    post: PathBuf,
}

impl FileLutSource {
    /// Creates a source reading the two given files.
    pub fn new(powv: impl Into<PathBuf>, post: impl Into<PathBuf>) -> Self {
        Self {
            powv: powv.into(),
            post: post.into(),
        }
    }

    fn read(path: &PathBuf) -> Result<Vec<u8>, FluteError> {
        std::fs::read(path).map_err(|source| FluteError::Io {
            path: path.clone(),
            source,
        })
    }
}

impl LutSource for FileLutSource {
    fn load(&self, max_degree: usize) -> Result<LutTable, FluteError> {
        let powv = Self::read(&self.powv)?;
        let post = Self::read(&self.post)?;
        parse_lut(&powv, &post, max_degree)
    }

    fn describe(&self) -> String {
        format!("files {} and {}", self.powv.display(), self.post.display())
    }
}

/// Tables carried as base64 text, appended chunk by chunk.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedLutSource {
    powv: String,
    post: String,
}

impl EmbeddedLutSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a chunk of the base64 `powv` table.
    pub fn add_powv_chunk(&mut self, chunk: &str) {
        self.powv.extend(chunk.chars().filter(|c| !c.is_ascii_whitespace()));
    }

    /// Appends a chunk of the base64 `post` table.
    pub fn add_post_chunk(&mut self, chunk: &str) {
        self.post.extend(chunk.chars().filter(|c| !c.is_ascii_whitespace()));
    }

    /// Whether both tables have received data.
    pub fn is_complete(&self) -> bool {
        !self.powv.is_empty() && !self.post.is_empty()
    }
}

impl LutSource for EmbeddedLutSource {
    fn load(&self, max_degree: usize) -> Result<LutTable, FluteError> {
        if !self.is_complete() {
            return Err(FluteError::Unavailable("embedded tables are empty".to_string()));
        }
        let powv = STANDARD.decode(&self.powv)?;
        let post = STANDARD.decode(&self.post)?;
        parse_lut(&powv, &post, max_degree)
    }

    fn describe(&self) -> String {
        format!("embedded tables ({} + {} base64 chars)", self.powv.len(), self.post.len())
    }
}

/// Loads from two sources and fails unless they agree group for group.
pub struct CheckedLutSource {
    primary: Box<dyn LutSource>,
    reference: Box<dyn LutSource>,
}

impl CheckedLutSource {
    /// Wraps `primary`, verified against `reference`.
    pub fn new(primary: Box<dyn LutSource>, reference: Box<dyn LutSource>) -> Self {
        Self { primary, reference }
    }
}

impl LutSource for CheckedLutSource {
    fn load(&self, max_degree: usize) -> Result<LutTable, FluteError> {
        let table = self.primary.load(max_degree)?;
        table.check_against(&self.reference.load(max_degree)?)?;
        Ok(table)
    }

    fn describe(&self) -> String {
        format!("{} checked against {}", self.primary.describe(), self.reference.describe())
    }
}
