use crate::core::config::data::{path_display, Config};
use directories::ProjectDirs;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Errors that can occur when loading or saving configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// The platform offers no configuration directory (no home directory).
    NoConfigDir,

    /// Failed to read the configuration file from disk.
    Read {
        /// Path to the configuration file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the configuration file as valid TOML.
    Parse {
        /// Path to the configuration file with invalid TOML.
        path: PathBuf,
        /// The TOML deserialization error.
        source: toml::de::Error,
    },

    /// Failed to write the configuration file.
    Write {
        path: PathBuf,
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "Failed to determine config directory"),
            ConfigError::Read { path, source } => {
                write!(f, "Failed to read config at {}: {}", path_display(path), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config at {}: {}", path_display(path), source)
            }
            ConfigError::Write { path, source } => {
                write!(f, "Failed to write config at {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for ConfigError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            ConfigError::NoConfigDir => None,
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Write { source, .. } => Some(source.as_ref()),
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_from_path(&Self::config_path()?)
    }

    /// Load the file at `path`, apply `f`, and persist the result.
    pub fn mutate_at_path<F, T>(path: &Path, f: F) -> Result<T, ConfigError>
    where
        F: FnOnce(&mut Config) -> T,
    {
        let mut config = Self::load_from_path(path)?;
        let result = f(&mut config);
        config.save_to_path(path)?;
        Ok(result)
    }

    pub fn load_from_path(config_path: &Path) -> Result<Config, ConfigError> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            path: config_path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })
    }

    pub fn save_to_path(&self, config_path: &Path) -> Result<(), ConfigError> {
        let write_error = |source: Box<dyn StdError + Send + Sync>| ConfigError::Write {
            path: config_path.to_path_buf(),
            source,
        };

        let parent = config_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty());

        if let Some(dir) = parent {
            fs::create_dir_all(dir).map_err(|err| write_error(Box::new(err)))?;
        }

        let contents = toml::to_string_pretty(self).map_err(|err| write_error(Box::new(err)))?;
        let mut temp_file = match parent {
            Some(dir) => NamedTempFile::new_in(dir),
            None => NamedTempFile::new(),
        }
        .map_err(|err| write_error(Box::new(err)))?;

        temp_file
            .write_all(contents.as_bytes())
            .and_then(|_| temp_file.as_file_mut().sync_all())
            .map_err(|err| write_error(Box::new(err)))?;
        temp_file
            .persist(config_path)
            .map_err(|err| write_error(Box::new(err)))?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("org", "chartchat", "chartchat").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
