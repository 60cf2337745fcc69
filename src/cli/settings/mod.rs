//! Settings management for the CLI `set`/`unset` commands.
//!
//! Each configuration key has a [`SettingHandler`]; handlers edit an
//! in-memory [`Config`] and the functions here load and persist the file
//! around them.

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;


pub use error::SettingError;
pub use registry::SettingRegistry;

use std::path::Path;

use crate::core::config::Config;
use helpers::config_error;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Validate `args` and store the value; returns the message to display.
    fn apply(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the stored value; returns the message to display.
    fn clear(&self, config: &mut Config) -> String;

    /// Format the current value for display in `chartchat set` output.
    fn format(&self, config: &Config) -> String;
}

/// Set `key` in the config file at `path`. Nothing is written when the
/// value is rejected.
pub fn set_at_path(
    registry: &SettingRegistry,
    path: &Path,
    key: &str,
    args: &[String],
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let mut config = Config::load_from_path(path).map_err(config_error)?;
    let message = handler.apply(args, &mut config)?;
    config.save_to_path(path).map_err(config_error)?;
    Ok(message)
}

pub fn unset_at_path(
    registry: &SettingRegistry,
    path: &Path,
    key: &str,
) -> Result<String, SettingError> {
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    Config::mutate_at_path(path, |config| handler.clear(config)).map_err(config_error)
}

/// `chartchat set [key [value...]]`: without a value, print the configuration.
pub fn run_set(key: Option<String>, value: Vec<String>) -> Result<(), SettingError> {
    let registry = SettingRegistry::new();
    let path = Config::config_path().map_err(config_error)?;

    match key {
        Some(key) if !value.is_empty() || registry.get(&key).is_none() => {
            let message = set_at_path(&registry, &path, &key, &value)?;
            println!("{message}");
        }
        _ => {
            let config = Config::load_from_path(&path).map_err(config_error)?;
            for line in registry.describe(&config) {
                println!("{line}");
            }
        }
    }
    Ok(())
}

pub fn run_unset(key: String) -> Result<(), SettingError> {
    let registry = SettingRegistry::new();
    let path = Config::config_path().map_err(config_error)?;
    let message = unset_at_path(&registry, &path, &key)?;
    println!("{message}");
    Ok(())
}
