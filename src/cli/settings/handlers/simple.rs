//! Handlers for single-value string settings.

use crate::cli::settings::error::SettingError;
use crate::cli::settings::helpers::{success_set, success_unset};
use crate::cli::settings::SettingHandler;
use crate::core::config::defaults::{DEFAULT_API_URL, DEFAULT_THEME};
use crate::core::config::Config;
use crate::ui::theme::Theme;
use crate::utils::url::validate_api_url;

/// Handler for the `api-url` setting.
pub struct ApiUrlHandler;

impl SettingHandler for ApiUrlHandler {
    fn key(&self) -> &'static str {
        "api-url"
    }

    fn apply(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let Some(input) = args.first() else {
            return Err(SettingError::MissingArgs {
                hint: "To set the answering service URL, specify it:",
                example: "chartchat set api-url http://localhost:8000",
            });
        };

        let url = validate_api_url(input).map_err(|reason| SettingError::InvalidValue {
            key: "api-url",
            reason,
        })?;
        let message = success_set("api-url", &url);
        config.api_url = Some(url);
        Ok(message)
    }

    fn clear(&self, config: &mut Config) -> String {
        config.api_url = None;
        success_unset("api-url", DEFAULT_API_URL)
    }

    fn format(&self, config: &Config) -> String {
        match &config.api_url {
            Some(url) => format!("  api-url: {url}"),
            None => format!("  api-url: (unset, default: {DEFAULT_API_URL})"),
        }
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn apply(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        if args.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set a theme, specify the theme name:",
                example: "chartchat set theme light",
            });
        }

        let input = args.join(" ");
        if !Theme::is_known(&input) {
            return Err(SettingError::UnknownTheme { input });
        }
        let theme = input.to_ascii_lowercase();
        let message = success_set("theme", &theme);
        config.theme = Some(theme);
        Ok(message)
    }

    fn clear(&self, config: &mut Config) -> String {
        config.theme = None;
        success_unset("theme", DEFAULT_THEME)
    }

    fn format(&self, config: &Config) -> String {
        match &config.theme {
            Some(theme) => format!("  theme: {theme}"),
            None => format!("  theme: (unset, default: {DEFAULT_THEME})"),
        }
    }
}
