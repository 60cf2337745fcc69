//! Registry of setting handlers.

use std::collections::HashMap;

use super::handlers::{
    charts_handler, chart_height_handler, request_timeout_handler, ApiUrlHandler, ThemeHandler,
};
use super::SettingHandler;
use crate::core::config::Config;

/// Registry of all available setting handlers.
pub struct SettingRegistry {
    handlers: HashMap<&'static str, Box<dyn SettingHandler>>,
    /// Keys in display order for `chartchat set` output.
    display_order: Vec<&'static str>,
}

impl SettingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: HashMap::new(),
            display_order: Vec::new(),
        };

        registry.register(Box::new(ApiUrlHandler));
        registry.register(Box::new(request_timeout_handler()));
        registry.register(Box::new(ThemeHandler));
        registry.register(Box::new(charts_handler()));
        registry.register(Box::new(chart_height_handler()));

        registry
    }

    fn register(&mut self, handler: Box<dyn SettingHandler>) {
        let key = handler.key();
        self.display_order.push(key);
        self.handlers.insert(key, handler);
    }

    pub fn get(&self, key: &str) -> Option<&dyn SettingHandler> {
        self.handlers.get(key).map(|h| h.as_ref())
    }

    pub fn keys_display_order(&self) -> &[&'static str] {
        &self.display_order
    }

    /// One line per key describing its current value.
    pub fn describe(&self, config: &Config) -> Vec<String> {
        let mut lines = vec!["Current configuration:".to_string()];
        lines.extend(
            self.display_order
                .iter()
                .filter_map(|key| self.get(key))
                .map(|handler| handler.format(config)),
        );
        lines
    }
}

impl Default for SettingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
