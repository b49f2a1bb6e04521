//! Errors that abort a check or report.

use plc_common::InternalError;
use plc_flute::FluteError;

/// Failures other than placement violations.
///
/// Violations are diagnostics; these are the conditions under which a report
/// cannot be produced at all.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// The Steiner-tree engine could not load its tables.
    #[error(transparent)]
    Flute(#[from] FluteError),

    /// The device or design changed shape mid-report.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_io() {
        let err = CheckError::from(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.to_string(), "failed to write report: closed");
    }

    #[test]
    fn flute_errors_pass_through() {
        let err = CheckError::from(FluteError::Unavailable("no tables".to_string()));
        assert_eq!(err.to_string(), "no LUT data available: no tables");
    }

    #[test]
    fn internal_errors_pass_through() {
        let err = CheckError::from(InternalError::new("tile X0Y0 vanished"));
        assert_eq!(err.to_string(), "internal checker error: tile X0Y0 vanished");
    }
}
