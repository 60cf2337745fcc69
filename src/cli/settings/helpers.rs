//! Helper functions for settings operations.

use crate::core::config::ConfigError;

use super::error::SettingError;

pub fn config_error(err: ConfigError) -> SettingError {
    SettingError::ConfigError(err.to_string())
}

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no, 1/0 (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

pub fn success_unset(key: &str, default_display: &str) -> String {
    format!("✅ Unset {key} (will use default: {default_display})")
}
