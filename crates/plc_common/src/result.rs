//! Internal error type for broken invariants.

/// Result of an operation that can only fail through a bug in the checker.
pub type PlcResult<T> = Result<T, InternalError>;

/// A broken internal invariant.
///
/// Problems in the input files are diagnostics; this error means the checker
/// itself lost track of its own data, such as a tile disappearing between
/// projection and reporting.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal checker error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
