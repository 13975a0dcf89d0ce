// src/models/attempt.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::config::PASSING_SCORE_PERCENTAGE;

/// Outcome of one finished exam session.
///
/// Also the body of `POST /api/attempts`, so it is validated on both sides of
/// the wire with [`AttemptResult::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptResult {
    /// Percentage in [0, 100].
    pub score: i32,
    pub total_questions: i32,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub time_spent_seconds: i32,
}

/// A rule broken by an attempt payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidAttempt {
    pub field: Option<&'static str>,
    pub message: String,
}

impl InvalidAttempt {
    fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }
}

impl AttemptResult {
    /// Checks the counting and rounding invariants of a scored attempt.
    pub fn check(&self) -> Result<(), InvalidAttempt> {
        let non_negative = [
            ("score", self.score),
            ("totalQuestions", self.total_questions),
            ("correctCount", self.correct_count),
            ("wrongCount", self.wrong_count),
            ("timeSpentSeconds", self.time_spent_seconds),
        ];
        for (field, value) in non_negative {
            if value < 0 {
                return Err(InvalidAttempt::field(field, format!("{field} must not be negative")));
            }
        }

        if self.total_questions == 0 {
            return Err(InvalidAttempt::field(
                "totalQuestions",
                "totalQuestions must be at least 1",
            ));
        }

        if self.score > 100 {
            return Err(InvalidAttempt::field("score", "score must be between 0 and 100"));
        }

        if self.correct_count.checked_add(self.wrong_count) != Some(self.total_questions) {
            return Err(InvalidAttempt {
                field: None,
                message: "correctCount + wrongCount must equal totalQuestions".to_string(),
            });
        }

        let expected = crate::exam::scoring::percentage(
            self.correct_count as u32,
            self.total_questions as u32,
        );
        if self.score != expected as i32 {
            return Err(InvalidAttempt::field(
                "score",
                format!(
                    "score must be {expected} for {} of {} correct",
                    self.correct_count, self.total_questions
                ),
            ));
        }

        Ok(())
    }

    pub fn passed(&self) -> bool {
        self.score >= PASSING_SCORE_PERCENTAGE
    }
}

/// Represents the 'attempts' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAttempt {
    pub id: i32,
    pub score: i32,
    pub total_questions: i32,
    pub correct_count: i32,
    pub wrong_count: i32,
    pub time_spent_seconds: i32,
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

impl PersistedAttempt {
    pub fn result(&self) -> AttemptResult {
        AttemptResult {
            score: self.score,
            total_questions: self.total_questions,
            correct_count: self.correct_count,
            wrong_count: self.wrong_count,
            time_spent_seconds: self.time_spent_seconds,
        }
    }
}
