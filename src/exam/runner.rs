// src/exam/runner.rs

use std::{collections::BTreeMap, sync::Arc};

use tokio::sync::{mpsc, oneshot, watch};

use crate::{
    config::EXAM_TIME_SECONDS,
    exam::{
        gateway::{PersistenceBoundary, SubmissionGateway, SubmitError},
        review::{QuestionReview, review},
        session::{ExamSession, FinishReason, SessionError, SessionSnapshot},
        timer::{CountdownTimer, TICK_PERIOD},
    },
    models::{
        attempt::{AttemptResult, PersistedAttempt},
        question::Question,
    },
    storage::StoreError,
    utils::time::format_duration,
};

#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("failed to load questions: {0}")]
    Load(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Everything the display layer needs once an exam is over.
#[derive(Debug, Clone)]
pub struct ExamOutcome {
    pub result: AttemptResult,
    pub reason: FinishReason,
    pub questions: Vec<Question>,
    pub answers: BTreeMap<usize, usize>,
    /// `Err` when the attempt could not be saved; `result` is still valid.
    pub submission: Result<PersistedAttempt, SubmitError>,
}

impl ExamOutcome {
    pub fn review(&self) -> Vec<QuestionReview> {
        review(&self.questions, &self.answers)
    }

    pub fn passed(&self) -> bool {
        self.result.passed()
    }

    /// Time spent as `Xm Ys`.
    pub fn time_spent_label(&self) -> String {
        format_duration(self.result.time_spent_seconds.max(0) as u32)
    }

    pub fn is_saved(&self) -> bool {
        self.submission.is_ok()
    }
}

enum Command {
    Select {
        option: usize,
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    GoTo(usize),
    Next,
    Previous,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Tick,
    Finish,
}

/// Drives one exam session.
///
/// User actions and timer ticks share a single queue and are applied in
/// arrival order by one task that owns the session.
pub struct ExamRunner;

impl ExamRunner {
    /// Loads the question bank through `boundary` and starts an exam over it.
    pub async fn load(
        boundary: Arc<dyn PersistenceBoundary>,
        total_time_seconds: u32,
    ) -> Result<ExamHandle, StartError> {
        let questions = boundary.list_questions().await?;
        let handle = Self::start(questions, total_time_seconds, SubmissionGateway::new(boundary))?;
        Ok(handle)
    }

    /// [`ExamRunner::load`] with the standard one-hour budget.
    pub async fn load_default(
        boundary: Arc<dyn PersistenceBoundary>,
    ) -> Result<ExamHandle, StartError> {
        Self::load(boundary, EXAM_TIME_SECONDS).await
    }

    /// Starts the session and its countdown.
    ///
    /// The exam lives as long as some [`ExamHandle`] does. Dropping every
    /// handle before the end abandons it: the countdown stops and nothing
    /// is submitted.
    pub fn start(
        questions: Vec<Question>,
        total_time_seconds: u32,
        gateway: SubmissionGateway,
    ) -> Result<ExamHandle, SessionError> {
        let session = ExamSession::new(questions, total_time_seconds)?;
        let (commands, queue) = mpsc::unbounded_channel();
        let (outcome_tx, outcome) = watch::channel(None);

        tracing::info!(
            questions = session.questions().len(),
            total_time = total_time_seconds,
            "Exam session started"
        );

        let ticks = commands.downgrade();
        let timer = CountdownTimer::start(TICK_PERIOD, move || {
            ticks
                .upgrade()
                .is_some_and(|tx| tx.send(Command::Tick).is_ok())
        });

        tokio::spawn(run(session, timer, queue, gateway, outcome_tx));

        Ok(ExamHandle { commands, outcome })
    }
}

async fn run(
    mut session: ExamSession,
    timer: CountdownTimer,
    mut queue: mpsc::UnboundedReceiver<Command>,
    gateway: SubmissionGateway,
    outcome_tx: watch::Sender<Option<Arc<ExamOutcome>>>,
) {
    let reason = loop {
        let Some(command) = queue.recv().await else {
            tracing::warn!("Exam abandoned before it finished, nothing submitted");
            return;
        };

        match command {
            Command::Select { option, reply } => {
                let _ = reply.send(session.select_option(option));
            }
            Command::GoTo(index) => session.go_to(index),
            Command::Next => session.next(),
            Command::Previous => session.previous(),
            Command::Snapshot(reply) => {
                let _ = reply.send(session.snapshot());
            }
            Command::Tick => {
                if session.tick() == 0 {
                    tracing::info!("Exam time expired");
                    break FinishReason::TimeExpired;
                }
            }
            Command::Finish => break FinishReason::Submitted,
        }
    };

    timer.cancel();
    // Anything still queued is dropped; pending selections observe a finished session.
    drop(queue);

    let Some(result) = session.finish(reason) else {
        return;
    };

    let submission = gateway.submit(&result).await;

    let outcome = ExamOutcome {
        result,
        reason,
        questions: session.questions().to_vec(),
        answers: session.answers().clone(),
        submission,
    };
    outcome_tx.send_replace(Some(Arc::new(outcome)));
}

/// The display layer's side of a running exam.
#[derive(Clone)]
pub struct ExamHandle {
    commands: mpsc::UnboundedSender<Command>,
    outcome: watch::Receiver<Option<Arc<ExamOutcome>>>,
}

impl ExamHandle {
    /// Answers the current question.
    pub async fn select_option(&self, option: usize) -> Result<(), SessionError> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Select { option, reply })
            .map_err(|_| SessionError::SessionFinished)?;
        response.await.map_err(|_| SessionError::SessionFinished)?
    }

    pub fn go_to(&self, index: usize) {
        let _ = self.commands.send(Command::GoTo(index));
    }

    pub fn next(&self) {
        let _ = self.commands.send(Command::Next);
    }

    pub fn previous(&self) {
        let _ = self.commands.send(Command::Previous);
    }

    /// Current view of the session, or `None` once it has finished.
    pub async fn snapshot(&self) -> Option<SessionSnapshot> {
        let (reply, response) = oneshot::channel();
        self.commands.send(Command::Snapshot(reply)).ok()?;
        response.await.ok()
    }

    /// Requests a manual finish. A no-op if the exam is already over.
    pub fn finish(&self) {
        let _ = self.commands.send(Command::Finish);
    }

    pub fn is_finished(&self) -> bool {
        self.commands.is_closed()
    }

    /// Waits for the exam to end and its attempt to be submitted.
    pub async fn outcome(&self) -> Option<Arc<ExamOutcome>> {
        let mut outcome = self.outcome.clone();
        outcome.wait_for(|o| o.is_some()).await.ok()?;
        outcome.borrow().clone()
    }

    pub async fn finish_and_wait(&self) -> Option<Arc<ExamOutcome>> {
        self.finish();
        self.outcome().await
    }
}
