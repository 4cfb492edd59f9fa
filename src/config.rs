use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use hashdup_core::PivotStrategy;
use serde::{Deserialize, Serialize};

use crate::error::{DriverError, Result};

/// Looked up in the working directory when no config path is given.
pub const DEFAULT_CONFIG_FILE: &str = "hashdup.toml";
/// Environment variable naming a config file; may come from `.env`.
pub const CONFIG_ENV: &str = "HASHDUP_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!(
                "unknown output format '{other}', expected 'text' or 'json'"
            )),
        }
    }
}

/// Which number is printed next to each duplicated hash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// occurrences beyond the first (k - 1)
    #[default]
    Repeats,
    /// all occurrences (k)
    Occurrences,
}

impl FromStr for CountMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "repeats" => Ok(Self::Repeats),
            "occurrences" => Ok(Self::Occurrences),
            other => Err(format!(
                "unknown count mode '{other}', expected 'repeats' or 'occurrences'"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// Optional settings file. Every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub pivot: PivotStrategy,
    pub format: OutputFormat,
    pub count: CountMode,
    pub dump_sorted: bool,
    pub log_level: LogLevel,
}

impl Config {
    /// Parse a config file that must exist.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| config_error(path, e))?;
        let config = toml::from_str(&content).map_err(|e| config_error(path, e))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config for this run.
    ///
    /// An explicit path (argument, then `HASHDUP_CONFIG`) must load. Without
    /// one, `hashdup.toml` in `dir` is used when present, defaults otherwise.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::from_file(default_path)
        } else {
            log::trace!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }
}

fn config_error(path: &Path, reason: impl Display) -> DriverError {
    DriverError::Config {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
