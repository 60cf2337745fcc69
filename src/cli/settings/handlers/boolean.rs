//! Boolean setting handlers for on/off settings.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{format_bool, parse_bool, success_set, success_unset};
use crate::cli::settings::SettingHandler;
use crate::core::config::Config;

/// Data-driven handler for boolean (on/off) settings.
pub struct BooleanHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default_display: &'static str,
    get: fn(&Config) -> Option<bool>,
    set_field: fn(&mut Config, Option<bool>),
}

impl SettingHandler for BooleanHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn apply(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        }

        let input = args.join(" ");
        let value = parse_bool(&input).ok_or(SettingError::InvalidBoolean(input))?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, format_bool(value)))
    }

    fn clear(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        success_unset(self.key, self.default_display)
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {}", self.key, format_bool(value)),
            None => format!("  {}: (unset, default: {})", self.key, self.default_display),
        }
    }
}

/// Create a handler for the `charts` setting.
pub fn charts_handler() -> BooleanHandler {
    BooleanHandler {
        key: "charts",
        hint: "To turn chart rendering on or off, specify on or off:",
        example: "chartchat set charts off",
        default_display: "on",
        get: |c| c.charts,
        set_field: |c, v| c.charts = v,
    }
}
