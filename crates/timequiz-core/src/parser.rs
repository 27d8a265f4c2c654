//! Problems-file loader.
//!
//! Reads headerless two-column delimited text (`prompt,answer`) into an
//! ordered list of [`Record`]s. Quoting follows the usual CSV rules, so a
//! prompt may contain the delimiter when quoted.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};

use crate::error::{Field, LoadError};
use crate::model::Record;

/// Default column delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Load records from `path` with the default delimiter.
pub fn load_records(path: &Path) -> Result<Vec<Record>, LoadError> {
    RecordLoader::default().load(path)
}

/// Configurable problems-file loader.
#[derive(Debug, Clone, Copy)]
pub struct RecordLoader {
    delimiter: u8,
}

impl Default for RecordLoader {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl RecordLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Open and parse a problems file.
    pub fn load(&self, path: &Path) -> Result<Vec<Record>, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let records = self.parse(file, path)?;
        tracing::debug!(path = %path.display(), count = records.len(), "loaded problems file");
        Ok(records)
    }

    /// Parse records from any reader. `source_path` is only used in errors.
    pub fn parse<R: Read>(&self, input: R, source_path: &Path) -> Result<Vec<Record>, LoadError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(input);

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let fallback_line = index as u64 + 1;
            let row = row.map_err(|err| row_error(source_path, fallback_line, err))?;
            let line = row.position().map_or(fallback_line, |p| p.line());

            if is_blank(&row) {
                continue;
            }

            records.push(record_from_row(&row, source_path, line)?);
        }

        Ok(records)
    }
}

fn is_blank(row: &StringRecord) -> bool {
    row.len() == 1 && row[0].trim().is_empty()
}

fn record_from_row(row: &StringRecord, path: &Path, line: u64) -> Result<Record, LoadError> {
    if row.len() != 2 {
        return Err(LoadError::ColumnCount {
            path: path.to_path_buf(),
            line,
            found: row.len(),
        });
    }

    let prompt = row[0].trim();
    if prompt.is_empty() {
        return Err(empty_field(path, line, Field::Prompt));
    }

    let record = Record::new(prompt, &row[1]);
    if record.expected_answer.is_empty() {
        return Err(empty_field(path, line, Field::Answer));
    }

    Ok(record)
}

fn empty_field(path: &Path, line: u64, field: Field) -> LoadError {
    LoadError::EmptyField {
        path: path.to_path_buf(),
        line,
        field,
    }
}

fn row_error(path: &Path, fallback_line: u64, err: csv::Error) -> LoadError {
    let path: PathBuf = path.to_path_buf();
    if err.is_io_error() {
        return LoadError::Open {
            path,
            source: io::Error::from(err),
        };
    }
    let line = err.position().map_or(fallback_line, |p| p.line());
    LoadError::Malformed {
        path,
        line,
        source: err,
    }
}

/// A warning from problems-file validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// 0-based record index (if applicable).
    pub record: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check loaded records for issues that do not prevent a quiz from running.
pub fn validate_records(records: &[Record]) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if records.is_empty() {
        warnings.push(ValidationWarning {
            record: None,
            message: "problems file contains no questions".into(),
        });
    }

    let mut seen = HashSet::new();
    for (index, record) in records.iter().enumerate() {
        if !seen.insert(record.prompt.to_lowercase()) {
            warnings.push(ValidationWarning {
                record: Some(index),
                message: format!("duplicate question: {}", record.prompt),
            });
        }
    }

    warnings
}
