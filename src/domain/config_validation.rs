//! Session configuration validation.
//!
//! Checks config values before a session runs, so a typo in a flag fails
//! loudly instead of silently falling back to a default.

use crate::domain::error::ObjregError;
use crate::ports::config_port::ConfigPort;

pub fn validate_session_config(config: &dyn ConfigPort) -> Result<(), ObjregError> {
    validate_flag(config, "session", "stop_on_error")?;
    validate_flag(config, "session", "echo")?;
    validate_flag(config, "fixings", "force_overwrite")?;
    validate_base_path(config)?;
    Ok(())
}

fn validate_flag(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ObjregError> {
    match config.get_string(section, key) {
        None => Ok(()),
        Some(value) => match value.to_lowercase().as_str() {
            "true" | "yes" | "1" | "false" | "no" | "0" => Ok(()),
            _ => Err(ObjregError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("'{value}' is not a boolean"),
            }),
        },
    }
}

fn validate_base_path(config: &dyn ConfigPort) -> Result<(), ObjregError> {
    match config.get_string("fixings", "base_path") {
        Some(value) if value.trim().is_empty() => Err(ObjregError::ConfigInvalid {
            section: "fixings".to_string(),
            key: "base_path".to_string(),
            reason: "base_path must not be empty".to_string(),
        }),
        _ => Ok(()),
    }
}
