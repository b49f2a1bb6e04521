//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::{CheckerConfig, LutSourceKind};
use std::path::Path;

/// File name looked up next to the command script when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "checker.toml";

/// Loads and validates a configuration file.
pub fn load_config(path: &Path) -> Result<CheckerConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<CheckerConfig, ConfigError> {
    let config: CheckerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &CheckerConfig) -> Result<(), ConfigError> {
    let flute = &config.flute;
    if !(1..=9).contains(&flute.accuracy) {
        return Err(ConfigError::ValidationError(format!(
            "flute.accuracy must be in 1..=9, got {}",
            flute.accuracy
        )));
    }
    let needs_embedded = matches!(
        flute.lut_source,
        LutSourceKind::Embedded | LutSourceKind::Checked
    );
    if needs_embedded && (flute.powv_base64.is_empty() || flute.post_base64.is_empty()) {
        return Err(ConfigError::ValidationError(
            "flute.powv_base64 and flute.post_base64 are required by this lut_source".to_string(),
        ));
    }

    let limits = &config.limits;
    if limits.max_tile_pin_inputs + limits.max_tile_pin_outputs == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_tile_pin_inputs and limits.max_tile_pin_outputs cannot both be 0"
                .to_string(),
        ));
    }

    let fraction = config.report.pin_density_top_fraction;
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(ConfigError::ValidationError(format!(
            "report.pin_density_top_fraction must be in (0, 1], got {fraction}"
        )));
    }
    Ok(())
}
