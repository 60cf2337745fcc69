use std::time::Duration;

use crate::core::config::data::Config;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_CHART_HEIGHT: u16 = 12;
pub const MIN_CHART_HEIGHT: u16 = 6;

/// Environment variable that overrides the configured API URL.
pub const API_URL_ENV: &str = "CHARTCHAT_API_URL";

impl Config {
    /// Resolve the API URL: explicit override, then environment, then file, then default.
    pub fn resolve_api_url(&self, cli_override: Option<&str>) -> String {
        let env_value = std::env::var(API_URL_ENV).ok();
        self.resolve_api_url_with_env(cli_override, env_value.as_deref())
    }

    pub(crate) fn resolve_api_url_with_env(
        &self,
        cli_override: Option<&str>,
        env_value: Option<&str>,
    ) -> String {
        [cli_override, env_value, self.api_url.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string()
    }

    pub fn request_timeout(&self) -> Duration {
        let secs = self
            .request_timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    pub fn theme_name(&self) -> &str {
        self.theme.as_deref().unwrap_or(DEFAULT_THEME)
    }

    pub fn charts_enabled(&self) -> bool {
        self.charts.unwrap_or(true)
    }

    pub fn chart_height(&self) -> u16 {
        self.chart_height
            .unwrap_or(DEFAULT_CHART_HEIGHT)
            .max(MIN_CHART_HEIGHT)
    }
}
