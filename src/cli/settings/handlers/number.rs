//! Numeric setting handlers with a lower bound.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{success_set, success_unset};
use crate::cli::settings::SettingHandler;
use crate::core::config::defaults::{
    DEFAULT_CHART_HEIGHT, DEFAULT_REQUEST_TIMEOUT_SECS, MIN_CHART_HEIGHT,
};
use crate::core::config::Config;

/// Data-driven handler for whole-number settings.
pub struct NumberHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    unit: &'static str,
    min: u64,
    max: u64,
    default: u64,
    get: fn(&Config) -> Option<u64>,
    set_field: fn(&mut Config, Option<u64>),
}

impl NumberHandler {
    fn parse(&self, input: &str) -> Result<u64, SettingError> {
        let invalid = |reason: String| SettingError::InvalidValue {
            key: self.key,
            reason,
        };
        let value: u64 = input
            .trim()
            .parse()
            .map_err(|_| invalid(format!("'{input}' is not a whole number")))?;
        if value < self.min || value > self.max {
            return Err(invalid(format!(
                "must be between {} and {}",
                self.min, self.max
            )));
        }
        Ok(value)
    }

    fn display(&self, value: u64) -> String {
        format!("{value}{}", self.unit)
    }
}

impl SettingHandler for NumberHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn apply(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: self.hint,
                example: self.example,
            });
        };

        let value = self.parse(input)?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, &self.display(value)))
    }

    fn clear(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        success_unset(self.key, &self.display(self.default))
    }

    fn format(&self, config: &Config) -> String {
        match (self.get)(config) {
            Some(value) => format!("  {}: {}", self.key, self.display(value)),
            None => format!(
                "  {}: (unset, default: {})",
                self.key,
                self.display(self.default)
            ),
        }
    }
}

/// Create a handler for the `request-timeout` setting, in seconds.
pub fn request_timeout_handler() -> NumberHandler {
    NumberHandler {
        key: "request-timeout",
        hint: "To set the request timeout, specify a number of seconds:",
        example: "chartchat set request-timeout 120",
        unit: "s",
        min: 1,
        max: 3600,
        default: DEFAULT_REQUEST_TIMEOUT_SECS,
        get: |c| c.request_timeout_secs,
        set_field: |c, v| c.request_timeout_secs = v,
    }
}

/// Create a handler for the `chart-height` setting, in rows.
pub fn chart_height_handler() -> NumberHandler {
    NumberHandler {
        key: "chart-height",
        hint: "To set the chart height, specify a number of rows:",
        example: "chartchat set chart-height 16",
        unit: "",
        min: u64::from(MIN_CHART_HEIGHT),
        max: 200,
        default: u64::from(DEFAULT_CHART_HEIGHT),
        get: |c| c.chart_height.map(u64::from),
        set_field: |c, v| c.chart_height = v.and_then(|v| u16::try_from(v).ok()),
    }
}
