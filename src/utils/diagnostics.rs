//! Diagnostic logging through `tracing`.
//!
//! The interactive UI owns the terminal, so its diagnostics go to a file in
//! the cache directory; one-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "chartchat.log";

/// Map the `-v` count to a filter unless `RUST_LOG` is set.
pub fn env_filter(verbose_level: u8) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(filter_directive(verbose_level))
}

fn filter_directive(verbose_level: u8) -> &'static str {
    match verbose_level {
        0 => "warn,chartchat=info",
        1 => "info,chartchat=debug",
        _ => "debug,chartchat=trace",
    }
}

pub fn log_file_path() -> PathBuf {
    ProjectDirs::from("org", "chartchat", "chartchat")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
        .join(LOG_FILE_NAME)
}

/// Send diagnostics to a file so they never draw over the UI. Returns the
/// file in use, or `None` when it could not be opened (logging stays off).
pub fn setup_logging_for_terminal_ui(verbose_level: u8) -> Option<PathBuf> {
    let path = log_file_path();
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose_level))
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}

pub fn setup_logging_to_stderr(verbose_level: u8) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
