//! The default `timequiz` flow: load, plan, ask, report.

use std::fmt;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use timequiz_core::config::QuizConfig;
use timequiz_core::engine::QuizEngine;
use timequiz_core::parser::RecordLoader;
use timequiz_core::plan::QuizPlan;
use timequiz_core::report::{summary_line, QuizReporter, QuizSummary};
use timequiz_core::source::LineReaderSource;

use crate::OutputFormat;

/// Console progress reporter.
///
/// Prompts go to stdout, except when stdout is reserved for a
/// machine-readable result.
struct ConsoleReporter {
    to_stderr: bool,
}

impl ConsoleReporter {
    fn for_format(format: OutputFormat) -> Self {
        Self {
            to_stderr: format == OutputFormat::Json,
        }
    }

    fn emit(&self, args: fmt::Arguments<'_>) {
        // Nothing useful to do if the terminal is gone.
        if self.to_stderr {
            let mut err = io::stderr().lock();
            let _ = err.write_fmt(args);
            let _ = err.flush();
        } else {
            let mut out = io::stdout().lock();
            let _ = out.write_fmt(args);
            let _ = out.flush();
        }
    }
}

impl QuizReporter for ConsoleReporter {
    fn on_ready(&self, total: usize, time_limit: Duration) {
        self.emit(format_args!(
            "{total} questions, {} seconds for the whole quiz.\nPress ENTER when you're ready: \n",
            time_limit.as_secs()
        ));
    }

    fn on_quiz_start(&self) {
        self.emit(format_args!("Quiz is started!\n"));
    }

    fn on_question(&self, number: usize, total: usize, prompt: &str) {
        self.emit(format_args!("Question #{number}/{total}: {prompt}\nYour answer: "));
    }

    fn on_answer(&self, _: usize, _: bool) {}

    fn on_time_expired(&self) {
        self.emit(format_args!("\nTime expired!\n"));
    }
}

pub async fn execute(config: &QuizConfig, format: OutputFormat) -> Result<()> {
    let loader = RecordLoader::new().with_delimiter(config.delimiter_byte()?);
    let records = loader.load(&config.problems_file)?;

    let plan = QuizPlan::new(records.len(), config.shuffle, config.seed);
    let engine = QuizEngine::new(records, plan, config.settings())?;

    let mut source = LineReaderSource::stdin().context("failed to start reading standard input")?;
    let outcome = engine
        .run(&mut source, &ConsoleReporter::for_format(format))
        .await?;

    match format {
        OutputFormat::Text => println!("\n{}", summary_line(&outcome.state)),
        OutputFormat::Json => println!("{}", QuizSummary::from(&outcome).to_json()?),
    }

    Ok(())
}
