//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::SystemConfig;

/// Copy as much of `text` as fits into an error payload.
fn bounded_message(text: &str) -> heapless::String<128> {
    let mut msg = heapless::String::new();
    for ch in text.chars() {
        if msg.push(ch).is_err() {
            break;
        }
    }
    msg
}

/// Load and validate an actuator configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed, or validated.
///
/// # Example
///
/// ```rust,ignore
/// use ble_actuator::load_config;
///
/// let config = load_config("actuator.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(ConfigError::IoError(bounded_message(&e.to_string()))))?;

    let config = parse_config(&content)?;
    info!(
        "loaded config '{}' from {}",
        config.motor.name.as_str(),
        path.display()
    );
    Ok(config)
}

/// Parse and validate an actuator configuration from TOML text.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config: SystemConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(bounded_message(e.message()))))?;

    super::validation::validate_config(&config)?;
    Ok(config)
}
