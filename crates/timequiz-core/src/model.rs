//! Core data model types for timequiz.
//!
//! Records are loaded once and never mutated. The run state is owned by the
//! prompt loop for the duration of a quiz and handed to the reporter at the
//! end.

use serde::Serialize;

/// Trim surrounding whitespace and lowercase.
///
/// Applied to expected answers at load time and to user answers before
/// comparison, so matching is a plain equality check.
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One question and its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Text shown to the user.
    pub prompt: String,
    /// Normalized expected answer.
    pub expected_answer: String,
}

impl Record {
    /// Build a record, normalizing the expected answer.
    pub fn new(prompt: impl Into<String>, expected_answer: &str) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer: normalize_answer(expected_answer),
        }
    }

    /// Whether a raw user response matches the expected answer.
    pub fn is_correct(&self, raw_answer: &str) -> bool {
        normalize_answer(raw_answer) == self.expected_answer
    }
}

/// Counters for a single quiz run.
///
/// `correct_answers <= answered_questions <= total_questions` holds at all
/// times; `total_questions` is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    total_questions: usize,
    answered_questions: usize,
    correct_answers: usize,
}

impl RunState {
    pub fn new(total_questions: usize) -> Self {
        Self {
            total_questions,
            answered_questions: 0,
            correct_answers: 0,
        }
    }

    /// Count one answered question.
    pub fn record_answer(&mut self, correct: bool) {
        debug_assert!(self.answered_questions < self.total_questions);
        self.answered_questions += 1;
        if correct {
            self.correct_answers += 1;
        }
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    pub fn answered_questions(&self) -> usize {
        self.answered_questions
    }

    pub fn correct_answers(&self) -> usize {
        self.correct_answers
    }
}

/// The terminal state a quiz reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every planned question was answered before the deadline.
    Completed,
    /// The deadline fired first.
    TimedOut,
}

/// Final state of a quiz run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub state: RunState,
    pub termination: Termination,
}

impl QuizOutcome {
    pub fn timed_out(&self) -> bool {
        self.termination == Termination::TimedOut
    }
}
