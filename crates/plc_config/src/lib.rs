//! Parsing and validation of `checker.toml` configuration files.
//!
//! Every setting has a default equal to the device limits and FLUTE settings
//! the checker was built around, so running without a configuration file
//! is the normal case.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
