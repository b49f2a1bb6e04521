//! Errors that abort a command outside the diagnostic flow.

use plc_check::CheckError;
use plc_config::ConfigError;
use plc_flute::FluteError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the session itself rather than by the inputs it checks.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An auxiliary file (such as a base64 table chunk file) could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The Steiner tree engine failed, usually while loading its tables.
    #[error(transparent)]
    Flute(#[from] FluteError),

    /// A check or report failed to write its output.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}
