use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the answering service (e.g., "http://localhost:8000")
    pub api_url: Option<String>,
    /// Seconds to wait for an answer before giving up
    pub request_timeout_secs: Option<u64>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
    /// Draw charts attached to answers; when off a one-line placeholder is shown
    pub charts: Option<bool>,
    /// Height in rows of line and bar charts in the transcript
    pub chart_height: Option<u16>,
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
