//! Answer sources for the prompt loop.
//!
//! The engine only sees the [`AnswerSource`] trait. Production input comes
//! from [`LineReaderSource`], which reads on a dedicated thread so that a
//! pending read can be abandoned when the deadline fires; tests drive the
//! engine with [`ScriptedSource`] on virtual time.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader};
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// A stream of answer lines.
#[async_trait]
pub trait AnswerSource: Send {
    /// Wait for the next line of input, without its line terminator.
    ///
    /// `Ok(None)` means the input is exhausted. The returned future may be
    /// dropped before it completes; no line is lost when that happens.
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

// ---------------------------------------------------------------------------
// Reader thread
// ---------------------------------------------------------------------------

/// Lines read from a blocking reader on a background thread.
///
/// The thread is detached and never cancelled. A read still pending when the
/// quiz ends is simply left behind and dies with the process.
pub struct LineReaderSource {
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl LineReaderSource {
    /// Start reading lines from `reader` on a new thread.
    pub fn spawn<R>(reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("answer-reader".into())
            .spawn(move || {
                for line in reader.lines() {
                    let failed = line.is_err();
                    if tx.send(line).is_err() || failed {
                        break;
                    }
                }
            })?;
        Ok(Self { lines: rx })
    }

    /// Read answers from standard input.
    pub fn stdin() -> io::Result<Self> {
        Self::spawn(BufReader::new(io::stdin()))
    }
}

#[async_trait]
impl AnswerSource for LineReaderSource {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.lines.recv().await.transpose()
    }
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// One scripted response.
#[derive(Debug)]
pub enum ScriptStep {
    /// Produce `text` after `after` has elapsed.
    Answer { after: Duration, text: String },
    /// Never respond.
    Silence,
    /// Fail with an I/O error of this kind.
    Fail(io::ErrorKind),
}

/// A source that replays scripted responses, for testing the engine.
///
/// Once the script is exhausted it reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    steps: VecDeque<ScriptStep>,
    reads: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond immediately with `text`.
    pub fn answer(self, text: &str) -> Self {
        self.answer_after(Duration::ZERO, text)
    }

    /// Respond with `text` once `after` has elapsed.
    pub fn answer_after(mut self, after: Duration, text: &str) -> Self {
        self.steps.push_back(ScriptStep::Answer {
            after,
            text: text.to_string(),
        });
        self
    }

    pub fn silence(mut self) -> Self {
        self.steps.push_back(ScriptStep::Silence);
        self
    }

    pub fn fail(mut self, kind: io::ErrorKind) -> Self {
        self.steps.push_back(ScriptStep::Fail(kind));
        self
    }

    /// Number of reads started so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Scripted steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

#[async_trait]
impl AnswerSource for ScriptedSource {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.reads += 1;
        match self.steps.pop_front() {
            None => Ok(None),
            Some(ScriptStep::Answer { after, text }) => {
                if !after.is_zero() {
                    tokio::time::sleep(after).await;
                }
                Ok(Some(text))
            }
            Some(ScriptStep::Silence) => std::future::pending().await,
            Some(ScriptStep::Fail(kind)) => Err(io::Error::new(kind, "scripted failure")),
        }
    }
}
