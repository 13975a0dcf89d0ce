// src/exam/session.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::TIME_LOW_THRESHOLD_SECONDS,
    exam::scoring,
    models::{attempt::AttemptResult, question::Question},
    utils::time::format_clock,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("an exam needs at least one question")]
    EmptyQuestionBank,

    #[error("question {id} is malformed: {reason}")]
    InvalidQuestion { id: i32, reason: String },

    #[error("option {option} is out of range for question {question} ({available} options)")]
    InvalidSelection {
        question: usize,
        option: usize,
        available: usize,
    },

    #[error("the exam session has already finished")]
    SessionFinished,
}

/// Why a session left the active state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Submitted,
    TimeExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Active,
    Finished {
        reason: FinishReason,
        result: AttemptResult,
    },
}

/// The in-progress state of one exam taken by one user.
#[derive(Debug, Clone)]
pub struct ExamSession {
    questions: Vec<Question>,
    current_index: usize,
    answers: BTreeMap<usize, usize>,
    total_time_seconds: u32,
    time_remaining_seconds: u32,
    started_at: DateTime<Utc>,
    state: SessionState,
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub total_questions: usize,
    pub current_question: Question,
    pub selected_option: Option<usize>,
    pub answered: Vec<bool>,
    pub answered_count: usize,
    pub progress_percent: u32,
    pub time_remaining_seconds: u32,
    /// Countdown as `m:ss`.
    pub clock: String,
    pub time_low: bool,
    pub finished: bool,
}

impl ExamSession {
    /// Starts an active session over a fixed question set.
    ///
    /// Every question must have at least two options and a correct answer
    /// that points at one of them.
    pub fn new(questions: Vec<Question>, total_time_seconds: u32) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuestionBank);
        }

        for q in &questions {
            if q.options.len() < 2 {
                return Err(SessionError::InvalidQuestion {
                    id: q.id,
                    reason: format!("has {} option(s), at least 2 required", q.options.len()),
                });
            }
            if q.correct_index().is_none() {
                return Err(SessionError::InvalidQuestion {
                    id: q.id,
                    reason: format!(
                        "correct answer {} is outside its {} options",
                        q.correct_answer,
                        q.options.len()
                    ),
                });
            }
        }

        Ok(Self {
            questions,
            current_index: 0,
            answers: BTreeMap::new(),
            total_time_seconds,
            time_remaining_seconds: total_time_seconds,
            started_at: Utc::now(),
            state: SessionState::Active,
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn selected_option(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).copied()
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining_seconds
    }

    pub fn total_time(&self) -> u32 {
        self.total_time_seconds
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active)
    }

    /// The scored result, once the session has finished.
    pub fn result(&self) -> Option<&AttemptResult> {
        match &self.state {
            SessionState::Active => None,
            SessionState::Finished { result, .. } => Some(result),
        }
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        match &self.state {
            SessionState::Active => None,
            SessionState::Finished { reason, .. } => Some(*reason),
        }
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// Answered questions as a rounded percentage of the whole exam.
    pub fn progress_percent(&self) -> u32 {
        scoring::percentage(self.answers.len() as u32, self.questions.len() as u32)
    }

    pub fn is_time_low(&self) -> bool {
        self.time_remaining_seconds < TIME_LOW_THRESHOLD_SECONDS
    }

    /// Records `option` as the answer to the current question, replacing any
    /// earlier choice.
    pub fn select_option(&mut self, option: usize) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::SessionFinished);
        }

        let available = self.current_question().option_count();
        if option >= available {
            tracing::error!(
                question = self.current_index,
                option,
                available,
                "Rejected out-of-range option selection"
            );
            return Err(SessionError::InvalidSelection {
                question: self.current_index,
                option,
                available,
            });
        }

        self.answers.insert(self.current_index, option);
        Ok(())
    }

    /// Moves to `index`, clamped to the question range. No-op once finished.
    pub fn go_to(&mut self, index: usize) {
        if !self.is_active() {
            return;
        }
        self.current_index = index.min(self.questions.len() - 1);
    }

    pub fn next(&mut self) {
        self.go_to(self.current_index.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.current_index.saturating_sub(1));
    }

    /// Counts one second off the clock, flooring at zero.
    ///
    /// Returns the remaining time. Finishing on expiry is left to the caller
    /// driving the clock.
    pub fn tick(&mut self) -> u32 {
        if self.is_active() {
            self.time_remaining_seconds = self.time_remaining_seconds.saturating_sub(1);
        }
        self.time_remaining_seconds
    }

    /// Ends the session and scores it.
    ///
    /// Only the first call produces a result; later calls return `None`.
    pub fn finish(&mut self, reason: FinishReason) -> Option<AttemptResult> {
        if !self.is_active() {
            tracing::debug!(?reason, "Ignoring finish on an already finished session");
            return None;
        }

        let spent = scoring::time_spent(self.total_time_seconds, self.time_remaining_seconds);
        let result = scoring::score(&self.questions, &self.answers, spent);
        self.state = SessionState::Finished { reason, result };

        tracing::info!(
            ?reason,
            score = result.score,
            correct = result.correct_count,
            total = result.total_questions,
            time_spent = result.time_spent_seconds,
            "Exam session finished"
        );

        Some(result)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current_index,
            total_questions: self.questions.len(),
            current_question: self.current_question().clone(),
            selected_option: self.selected_option(self.current_index),
            answered: (0..self.questions.len())
                .map(|idx| self.answers.contains_key(&idx))
                .collect(),
            answered_count: self.answered_count(),
            progress_percent: self.progress_percent(),
            time_remaining_seconds: self.time_remaining_seconds,
            clock: format_clock(self.time_remaining_seconds),
            time_low: self.is_time_low(),
            finished: !self.is_active(),
        }
    }
}
