//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `checker.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A configuration value is out of range or inconsistent.
    #[error("validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation_error() {
        let err = ConfigError::ValidationError("flute.accuracy must be in 1..=9".to_string());
        assert_eq!(
            err.to_string(),
            "validation error: flute.accuracy must be in 1..=9"
        );
    }

    #[test]
    fn display_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = ConfigError::from(io_err);
        assert!(err.to_string().starts_with("failed to read configuration:"));
    }
}
