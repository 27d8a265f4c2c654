pub mod run;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use timequiz_core::config::{load_config_from, parse_delimiter, QuizConfig};

/// Values given on the command line, applied over the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    pub file: Option<PathBuf>,
    pub time_limit: Option<u64>,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub delimiter: Option<String>,
}

/// Load configuration and apply command-line overrides.
pub fn resolve_config(config_path: Option<&Path>, overrides: Overrides) -> Result<QuizConfig> {
    let mut config = load_config_from(config_path).context("failed to load configuration")?;

    if let Some(file) = overrides.file {
        config.problems_file = file;
    }
    if let Some(secs) = overrides.time_limit {
        config.time_limit_secs = secs;
    }
    if overrides.shuffle {
        config.shuffle = true;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if let Some(delimiter) = overrides.delimiter {
        parse_delimiter(&delimiter)?;
        config.delimiter = delimiter;
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
