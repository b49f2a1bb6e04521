//! Error types for lookup-table loading.

use std::path::PathBuf;

/// Errors raised while obtaining or decoding FLUTE lookup tables.
#[derive(Debug, thiserror::Error)]
pub enum FluteError {
    /// A LUT file could not be read.
    #[error("failed to read LUT file {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Embedded LUT text is not valid base64.
    #[error("invalid base64 LUT data: {0}")]
    Decode(#[from] base64::DecodeError),

    /// LUT content does not follow the table layout.
    #[error("malformed LUT data for degree {degree}: {detail}")]
    Format {
        /// Degree section being read.
        degree: usize,
        /// What was wrong.
        detail: String,
    },

    /// Two LUT sources disagree.
    #[error("LUT sources disagree at degree {degree}, group {group}")]
    Mismatch {
        /// Degree of the differing group.
        degree: usize,
        /// Index of the differing group.
        group: usize,
    },

    /// A LUT source has no data to load.
    #[error("no LUT data available: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format_error() {
        let err = FluteError::Format {
            degree: 5,
            detail: "missing header".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed LUT data for degree 5: missing header"
        );
    }

    #[test]
    fn display_mismatch() {
        let err = FluteError::Mismatch { degree: 7, group: 12 };
        assert_eq!(err.to_string(), "LUT sources disagree at degree 7, group 12");
    }
}
