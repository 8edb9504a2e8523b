//! Runtime configuration.

use std::path::PathBuf;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "EVENT_DESK_DATA_DIR";

/// Data directory used when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Where collections are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// Uses `EVENT_DESK_DATA_DIR` when set and non-empty, otherwise `./data`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup(DATA_DIR_ENV) {
            Some(dir) if !dir.trim().is_empty() => Self {
                data_dir: PathBuf::from(dir),
            },
            _ => Self::default(),
        }
    }

    /// Override the data directory.
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}
