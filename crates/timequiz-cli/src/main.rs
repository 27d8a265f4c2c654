//! timequiz CLI — a timed question/answer quiz on the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "timequiz",
    version,
    about = "Timed question/answer quiz on the terminal"
)]
struct Cli {
    /// Problems file with `question,answer` rows [default: problems.csv]
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<PathBuf>,

    /// Time limit for the whole quiz, in seconds [default: 30]
    #[arg(short = 't', long = "time-limit", value_name = "SECONDS")]
    time_limit: Option<u64>,

    /// Shuffle question order
    #[arg(short = 's', long)]
    shuffle: bool,

    /// Seed for a reproducible shuffle
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Column delimiter, a single ASCII character [default: ,]
    #[arg(short = 'd', long, value_name = "CHAR")]
    delimiter: Option<String>,

    /// Format of the final result
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Check the problems file and exit without running the quiz
    #[arg(long)]
    validate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn log_directive() -> Directive {
    match "timequiz=warn".parse() {
        Ok(directive) => directive,
        Err(_) => LevelFilter::WARN.into(),
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_directive()))
        .init();

    let cli = Cli::parse();

    let overrides = commands::Overrides {
        file: cli.file,
        time_limit: cli.time_limit,
        shuffle: cli.shuffle,
        seed: cli.seed,
        delimiter: cli.delimiter,
    };

    let result = match commands::resolve_config(cli.config.as_deref(), overrides) {
        Ok(config) if cli.validate => commands::validate::execute(&config),
        Ok(config) => commands::run::execute(&config, cli.format).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
