//! Error types for loading problems files, reading answers and configuration.
//!
//! A timeout is not an error: it is a normal terminal state of the quiz and
//! is reported through [`crate::model::Termination::TimedOut`].

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Which column of a problems-file row was at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Prompt,
    Answer,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Prompt => write!(f, "prompt"),
            Field::Answer => write!(f, "answer"),
        }
    }
}

/// Failures while loading a problems file. All of them are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to open problems file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// A row could not be parsed as delimited text.
    #[error("malformed row at line {line} of {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        source: csv::Error,
    },

    /// A row did not have exactly two columns.
    #[error(
        "expected 2 columns (prompt, answer) at line {line} of {}, found {found}",
        .path.display()
    )]
    ColumnCount {
        path: PathBuf,
        line: u64,
        found: usize,
    },

    /// The prompt or the answer of a row was empty.
    #[error("empty {field} at line {line} of {}", .path.display())]
    EmptyField {
        path: PathBuf,
        line: u64,
        field: Field,
    },
}

impl LoadError {
    /// The 1-based line of the offending row, if the error is row-specific.
    pub fn line(&self) -> Option<u64> {
        match self {
            LoadError::Open { .. } => None,
            LoadError::Malformed { line, .. }
            | LoadError::ColumnCount { line, .. }
            | LoadError::EmptyField { line, .. } => Some(*line),
        }
    }
}

/// Fatal failures while setting up or running the quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The question order does not match the loaded records.
    #[error("question order covers {planned} questions but {records} were loaded")]
    PlanMismatch { records: usize, planned: usize },

    /// Reading the "press enter" line failed.
    #[error("failed to read start confirmation: {0}")]
    StartAborted(#[source] io::Error),

    /// Reading an answer failed mid-quiz.
    #[error("failed to read answer for question {question}: {source}")]
    AnswerRead { question: usize, source: io::Error },
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    InvalidDelimiter(String),

    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },
}
