//! The `timequiz --validate` flow.

use anyhow::Result;

use timequiz_core::config::QuizConfig;
use timequiz_core::parser::{validate_records, RecordLoader};

pub fn execute(config: &QuizConfig) -> Result<()> {
    let loader = RecordLoader::new().with_delimiter(config.delimiter_byte()?);
    let records = loader.load(&config.problems_file)?;

    println!(
        "Problems file: {} ({} questions)",
        config.problems_file.display(),
        records.len()
    );

    let warnings = validate_records(&records);
    for w in &warnings {
        let prefix = w
            .record
            .map(|index| format!("  [#{}]", index + 1))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Problems file valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
