//! Quiz configuration.
//!
//! Defaults can be set in a TOML file and overridden through the environment;
//! command-line flags are applied on top by the CLI.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::QuizSettings;
use crate::error::ConfigError;

/// Overrides the problems file path.
pub const ENV_PROBLEMS_FILE: &str = "TIMEQUIZ_PROBLEMS_FILE";
/// Overrides the time limit in seconds.
pub const ENV_TIME_LIMIT: &str = "TIMEQUIZ_TIME_LIMIT";

/// Top-level timequiz configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Problems file to load.
    #[serde(default = "default_problems_file")]
    pub problems_file: PathBuf,
    /// Countdown for the whole quiz, in seconds.
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: u64,
    /// Shuffle question order.
    #[serde(default)]
    pub shuffle: bool,
    /// Column delimiter, a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// Seed for a reproducible shuffle.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_problems_file() -> PathBuf {
    PathBuf::from("problems.csv")
}
fn default_time_limit() -> u64 {
    30
}
fn default_delimiter() -> String {
    ",".to_string()
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            problems_file: default_problems_file(),
            time_limit_secs: default_time_limit(),
            shuffle: false,
            delimiter: default_delimiter(),
            seed: None,
        }
    }
}

impl QuizConfig {
    /// The configured delimiter as a byte.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        parse_delimiter(&self.delimiter)
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_secs(self.time_limit_secs)
    }

    pub fn settings(&self) -> QuizSettings {
        QuizSettings {
            time_limit: self.time_limit(),
        }
    }

    /// Apply `TIMEQUIZ_*` overrides using `lookup` to read variables.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_PROBLEMS_FILE).filter(|p| !p.is_empty()) {
            self.problems_file = PathBuf::from(path);
        }

        if let Some(value) = lookup(ENV_TIME_LIMIT) {
            self.time_limit_secs = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIME_LIMIT,
                value: value.clone(),
            })?;
        }

        Ok(())
    }
}

/// Parse a single-character ASCII delimiter.
pub fn parse_delimiter(s: &str) -> Result<u8, ConfigError> {
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(ConfigError::InvalidDelimiter(s.to_string())),
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `timequiz.toml` in the current directory
/// 2. `~/.config/timequiz/config.toml`
///
/// Environment variable overrides: `TIMEQUIZ_PROBLEMS_FILE`, `TIMEQUIZ_TIME_LIMIT`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig, ConfigError> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => return Err(ConfigError::NotFound(p.to_path_buf())),
        None => default_config_path(),
    };

    let mut config = match config_path {
        Some(path) => read_config(&path)?,
        None => QuizConfig::default(),
    };

    config.apply_env_overrides(|name| std::env::var(name).ok())?;
    config.delimiter_byte()?;

    Ok(config)
}

fn read_config(path: &Path) -> Result<QuizConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from("timequiz.toml");
    if local.exists() {
        return Some(local);
    }
    dirs_path()
        .map(|dir| dir.join("config.toml"))
        .filter(|global| global.exists())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("timequiz"))
}
