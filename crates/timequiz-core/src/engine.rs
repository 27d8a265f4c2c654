//! The timed prompt loop.
//!
//! A quiz moves through `WaitingForStart -> Running -> {Completed, TimedOut}`.
//! One deadline is armed when the quiz starts and covers every remaining
//! question; it is never reset between questions. Each answer read is raced
//! against that deadline, and the read is dropped if the deadline wins.

use std::io;
use std::time::Duration;

use crate::error::QuizError;
use crate::model::{QuizOutcome, Record, RunState, Termination};
use crate::plan::QuizPlan;
use crate::report::QuizReporter;
use crate::source::AnswerSource;

/// Default countdown for the whole quiz.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(30);

/// Settings for a single run.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    /// Countdown for the whole quiz, armed once after the start line.
    pub time_limit: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }
}

/// Runs one quiz over a fixed set of records in a fixed order.
pub struct QuizEngine {
    records: Vec<Record>,
    plan: QuizPlan,
    settings: QuizSettings,
}

impl QuizEngine {
    /// Fails if `plan` does not cover exactly the given records.
    pub fn new(
        records: Vec<Record>,
        plan: QuizPlan,
        settings: QuizSettings,
    ) -> Result<Self, QuizError> {
        if plan.len() != records.len() {
            return Err(QuizError::PlanMismatch {
                records: records.len(),
                planned: plan.len(),
            });
        }
        Ok(Self {
            records,
            plan,
            settings,
        })
    }

    /// Wait for the start line, then ask every planned question until the
    /// plan is exhausted or the deadline fires.
    ///
    /// When the deadline and an answer are ready at the same time the
    /// deadline wins. If the input ends mid-quiz no further answer can
    /// arrive, so the loop waits out the deadline.
    pub async fn run(
        &self,
        source: &mut dyn AnswerSource,
        reporter: &dyn QuizReporter,
    ) -> Result<QuizOutcome, QuizError> {
        let total = self.records.len();
        let mut state = RunState::new(total);

        reporter.on_ready(total, self.settings.time_limit);
        match source.next_line().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(QuizError::StartAborted(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "input closed before the quiz started",
                )))
            }
            Err(e) => return Err(QuizError::StartAborted(e)),
        }

        let deadline = tokio::time::sleep(self.settings.time_limit);
        tokio::pin!(deadline);
        tracing::info!(
            questions = total,
            time_limit_secs = self.settings.time_limit.as_secs_f64(),
            "quiz started"
        );
        tracing::debug!(order = ?self.plan.order(), "question order");
        reporter.on_quiz_start();

        for (position, index) in self.plan.iter().enumerate() {
            let number = position + 1;
            let record = &self.records[index];
            reporter.on_question(number, total, &record.prompt);

            let line = tokio::select! {
                biased;
                () = &mut deadline => return Ok(expire(state, reporter)),
                line = source.next_line() => line,
            };

            match line {
                Ok(Some(raw)) => {
                    let correct = record.is_correct(&raw);
                    state.record_answer(correct);
                    tracing::debug!(question = number, record = index, correct, "answer received");
                    reporter.on_answer(number, correct);
                }
                Ok(None) => {
                    tracing::debug!(question = number, "input closed, waiting for the deadline");
                    deadline.as_mut().await;
                    return Ok(expire(state, reporter));
                }
                Err(e) => {
                    return Err(QuizError::AnswerRead {
                        question: number,
                        source: e,
                    })
                }
            }
        }

        tracing::info!(
            answered = state.answered_questions(),
            correct = state.correct_answers(),
            "quiz completed"
        );
        Ok(QuizOutcome {
            state,
            termination: Termination::Completed,
        })
    }
}

fn expire(state: RunState, reporter: &dyn QuizReporter) -> QuizOutcome {
    tracing::info!(
        answered = state.answered_questions(),
        total = state.total_questions(),
        "time expired"
    );
    reporter.on_time_expired();
    QuizOutcome {
        state,
        termination: Termination::TimedOut,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::report::NoopReporter;
    use crate::source::ScriptedSource;

    /// Records every callback for assertions.
    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }

        fn push(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl QuizReporter for RecordingReporter {
        fn on_ready(&self, total: usize, _: Duration) {
            self.push(format!("ready {total}"));
        }
        fn on_quiz_start(&self) {
            self.push("start".into());
        }
        fn on_question(&self, number: usize, total: usize, prompt: &str) {
            self.push(format!("q{number}/{total} {prompt}"));
        }
        fn on_answer(&self, number: usize, correct: bool) {
            self.push(format!("a{number} {correct}"));
        }
        fn on_time_expired(&self) {
            self.push("expired".into());
        }
    }

    fn sample_records() -> Vec<Record> {
        vec![
            Record::new("2+2", "4"),
            Record::new("capital of France", "paris"),
        ]
    }

    fn engine(records: Vec<Record>, secs: u64) -> QuizEngine {
        let plan = QuizPlan::identity(records.len());
        QuizEngine::new(
            records,
            plan,
            QuizSettings {
                time_limit: Duration::from_secs(secs),
            },
        )
        .unwrap()
    }

    fn counts(outcome: &QuizOutcome) -> (usize, usize, usize) {
        (
            outcome.state.correct_answers(),
            outcome.state.answered_questions(),
            outcome.state.total_questions(),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn all_answered_in_time() {
        let quiz = engine(sample_records(), 30);
        let mut source = ScriptedSource::new().answer("").answer("4").answer("Paris");
        let reporter = RecordingReporter::default();

        let outcome = quiz.run(&mut source, &reporter).await.unwrap();
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(counts(&outcome), (2, 2, 2));
        assert_eq!(
            reporter.events(),
            vec![
                "ready 2",
                "start",
                "q1/2 2+2",
                "a1 true",
                "q2/2 capital of France",
                "a2 true",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn wrong_answers_count_as_answered() {
        let quiz = engine(sample_records(), 30);
        let mut source = ScriptedSource::new().answer("go").answer(" 4 ").answer("Lyon");

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert_eq!(counts(&outcome), (1, 2, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn silent_user_times_out_with_nothing_answered() {
        let quiz = engine(sample_records(), 1);
        let mut source = ScriptedSource::new().answer("").silence();
        let reporter = RecordingReporter::default();

        let start = tokio::time::Instant::now();
        let outcome = quiz.run(&mut source, &reporter).await.unwrap();
        assert!(outcome.timed_out());
        assert_eq!(counts(&outcome), (0, 0, 2));
        assert!(start.elapsed() >= Duration::from_secs(1));
        assert_eq!(reporter.events().last().map(String::as_str), Some("expired"));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_shared_across_questions() {
        // Each answer alone fits in the limit, but together they do not.
        let records = vec![
            Record::new("a", "1"),
            Record::new("b", "2"),
            Record::new("c", "3"),
        ];
        let quiz = engine(records, 10);
        let mut source = ScriptedSource::new()
            .answer("")
            .answer_after(Duration::from_secs(4), "1")
            .answer_after(Duration::from_secs(4), "2")
            .answer_after(Duration::from_secs(4), "3");

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert!(outcome.timed_out());
        assert_eq!(counts(&outcome), (2, 2, 3));
    }

    #[tokio::test(start_paused = true)]
    async fn waiting_for_start_does_not_consume_the_countdown() {
        let quiz = engine(sample_records(), 5);
        let mut source = ScriptedSource::new()
            .answer_after(Duration::from_secs(60), "")
            .answer_after(Duration::from_secs(2), "4")
            .answer_after(Duration::from_secs(2), "paris");

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(counts(&outcome), (2, 2, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_wins_a_tie() {
        let quiz = engine(sample_records(), 3);
        let mut source = ScriptedSource::new()
            .answer("")
            .answer_after(Duration::from_secs(3), "4");

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert!(outcome.timed_out());
        assert_eq!(counts(&outcome), (0, 0, 2));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_time_limit_expires_before_first_answer() {
        let quiz = engine(sample_records(), 0);
        let mut source = ScriptedSource::new()
            .answer("")
            .answer_after(Duration::from_secs(1), "4");

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert!(outcome.timed_out());
        assert_eq!(outcome.state.answered_questions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_quiz_completes_without_questions() {
        let quiz = engine(Vec::new(), 30);
        let mut source = ScriptedSource::new().answer("");
        let reporter = RecordingReporter::default();

        let outcome = quiz.run(&mut source, &reporter).await.unwrap();
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(counts(&outcome), (0, 0, 0));
        assert_eq!(reporter.events(), vec!["ready 0", "start"]);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_mid_quiz_waits_for_deadline() {
        let quiz = engine(sample_records(), 20);
        let mut source = ScriptedSource::new().answer("").answer("4");

        let start = tokio::time::Instant::now();
        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert!(outcome.timed_out());
        assert_eq!(counts(&outcome), (1, 1, 2));
        assert!(start.elapsed() >= Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn closed_input_before_start_is_fatal() {
        let quiz = engine(sample_records(), 30);
        let mut source = ScriptedSource::new();
        let reporter = RecordingReporter::default();

        let err = quiz.run(&mut source, &reporter).await.unwrap_err();
        assert!(matches!(err, QuizError::StartAborted(_)));
        assert_eq!(reporter.events(), vec!["ready 2"]);
    }

    #[tokio::test(start_paused = true)]
    async fn start_read_failure_is_fatal() {
        let quiz = engine(sample_records(), 30);
        let mut source = ScriptedSource::new().fail(io::ErrorKind::Other);

        let err = quiz.run(&mut source, &NoopReporter).await.unwrap_err();
        assert!(matches!(err, QuizError::StartAborted(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn answer_read_failure_is_fatal() {
        let quiz = engine(sample_records(), 30);
        let mut source = ScriptedSource::new()
            .answer("")
            .answer("4")
            .fail(io::ErrorKind::InvalidData);

        let err = quiz.run(&mut source, &NoopReporter).await.unwrap_err();
        match err {
            QuizError::AnswerRead { question, source } => {
                assert_eq!(question, 2);
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn questions_follow_the_plan() {
        let records = vec![
            Record::new("first", "1"),
            Record::new("second", "2"),
            Record::new("third", "3"),
        ];
        let plan = QuizPlan::new(3, true, Some(11));
        let expected: Vec<String> = plan
            .iter()
            .enumerate()
            .map(|(i, idx)| format!("q{}/3 {}", i + 1, records[idx].prompt))
            .collect();
        let answers: Vec<String> = plan.iter().map(|idx| records[idx].expected_answer.clone()).collect();

        let quiz = QuizEngine::new(records, plan, QuizSettings::default()).unwrap();
        let mut source = answers
            .iter()
            .fold(ScriptedSource::new().answer(""), |s, a| s.answer(a));
        let reporter = RecordingReporter::default();

        let outcome = quiz.run(&mut source, &reporter).await.unwrap();
        assert_eq!(counts(&outcome), (3, 3, 3));
        let asked: Vec<String> = reporter
            .events()
            .into_iter()
            .filter(|e| e.starts_with('q'))
            .collect();
        assert_eq!(asked, expected);
    }

    #[test]
    fn plan_must_cover_every_record() {
        let too_long = QuizEngine::new(
            vec![Record::new("a", "1")],
            QuizPlan::identity(2),
            QuizSettings::default(),
        );
        assert!(matches!(
            too_long,
            Err(QuizError::PlanMismatch {
                records: 1,
                planned: 2
            })
        ));

        let too_short = QuizEngine::new(sample_records(), QuizPlan::identity(1), QuizSettings::default());
        assert!(matches!(
            too_short,
            Err(QuizError::PlanMismatch {
                records: 2,
                planned: 1
            })
        ));
    }

    #[tokio::test]
    async fn reads_from_a_line_reader() {
        use crate::source::LineReaderSource;
        use std::io::Cursor;

        let quiz = engine(sample_records(), 30);
        let mut source = LineReaderSource::spawn(Cursor::new(b"\n4\n  PARIS\n".to_vec())).unwrap();

        let outcome = quiz.run(&mut source, &NoopReporter).await.unwrap();
        assert_eq!(outcome.termination, Termination::Completed);
        assert_eq!(counts(&outcome), (2, 2, 2));
    }
}
