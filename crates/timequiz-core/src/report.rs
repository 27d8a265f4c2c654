//! Scoring output and progress reporting.

use std::time::Duration;

use serde::Serialize;

use crate::model::{QuizOutcome, RunState, Termination};

/// One-line tally of a run.
pub fn summary_line(state: &RunState) -> String {
    format!(
        "Your result is {} correct answers of {} answered of {} total questions!",
        state.correct_answers(),
        state.answered_questions(),
        state.total_questions()
    )
}

/// Machine-readable summary of a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub correct: usize,
    pub answered: usize,
    pub total: usize,
    pub termination: Termination,
}

impl From<&QuizOutcome> for QuizSummary {
    fn from(outcome: &QuizOutcome) -> Self {
        Self {
            correct: outcome.state.correct_answers(),
            answered: outcome.state.answered_questions(),
            total: outcome.state.total_questions(),
            termination: outcome.termination,
        }
    }
}

impl QuizSummary {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Progress callbacks from the prompt loop.
pub trait QuizReporter: Send + Sync {
    /// The quiz is waiting for the start confirmation.
    fn on_ready(&self, total: usize, time_limit: Duration);
    /// The deadline has been armed.
    fn on_quiz_start(&self);
    /// `number` is 1-based.
    fn on_question(&self, number: usize, total: usize, prompt: &str);
    fn on_answer(&self, number: usize, correct: bool);
    fn on_time_expired(&self);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl QuizReporter for NoopReporter {
    fn on_ready(&self, _: usize, _: Duration) {}
    fn on_quiz_start(&self) {}
    fn on_question(&self, _: usize, _: usize, _: &str) {}
    fn on_answer(&self, _: usize, _: bool) {}
    fn on_time_expired(&self) {}
}
