//! Application configuration.
//!
//! # Responsibility
//! - Read optional JSON configuration for table paths, clock and logging.
//! - Resolve unset values to defaults.
//!
//! # Invariants
//! - Every field is optional in the file; a missing file is not an error for
//!   callers that use `AppConfig::default()`.
//! - A configured `now` must parse as a timestamp before the clock is used.

use crate::logging::default_log_level;
use crate::model::time::{parse_timestamp, Clock, TimestampParseError};
use crate::repo::csv_store::TablePaths;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const DEFAULT_LOG_DIR_NAME: &str = "remindlog-logs";

/// Configuration loading error.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Runtime settings shared by the CLI and embedding callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Input table locations.
    pub tables: TablePaths,
    /// Pinned reference instant; the system clock is used when unset.
    pub now: Option<String>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: Option<String>,
    /// Absolute directory for rolling log files.
    pub log_dir: Option<String>,
}

impl AppConfig {
    /// Reads configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolves the configured clock.
    pub fn clock(&self) -> Result<Clock, TimestampParseError> {
        match self.now.as_deref() {
            Some(value) => parse_timestamp(value).map(Clock::Fixed),
            None => Ok(Clock::System),
        }
    }

    /// Configured log level, or the build-mode default.
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Configured log directory, or `<temp_dir>/remindlog-logs`.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME))
    }
}
