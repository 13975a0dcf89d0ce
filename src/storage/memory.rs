// src/storage/memory.rs

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use validator::Validate;

use super::{Storage, StoreError, check_attempt};
use crate::models::{
    attempt::{AttemptResult, PersistedAttempt},
    question::{NewQuestion, Question},
};

#[derive(Debug, Default)]
struct Tables {
    questions: Vec<Question>,
    attempts: Vec<PersistedAttempt>,
}

/// In-process store used when no database is configured, and in tests.
#[derive(Debug)]
pub struct MemStorage {
    tables: RwLock<Tables>,
    available: AtomicBool,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates an outage: while unavailable every call fails with
    /// [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("in-memory store is offline".to_string()))
        }
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        let mut questions = tables.questions.clone();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        self.ensure_available()?;
        question.validate()?;

        let mut tables = self.tables.write().await;
        let id = tables.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        let question = question.into_question(id);
        tables.questions.push(question.clone());
        Ok(question)
    }

    async fn create_attempt(&self, attempt: AttemptResult) -> Result<PersistedAttempt, StoreError> {
        self.ensure_available()?;
        check_attempt(&attempt)?;

        let mut tables = self.tables.write().await;
        let id = tables.attempts.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let persisted = PersistedAttempt {
            id,
            score: attempt.score,
            total_questions: attempt.total_questions,
            correct_count: attempt.correct_count,
            wrong_count: attempt.wrong_count,
            time_spent_seconds: attempt.time_spent_seconds,
            completed_at: chrono::Utc::now(),
        };
        tables.attempts.push(persisted.clone());
        Ok(persisted)
    }

    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError> {
        self.ensure_available()?;
        let tables = self.tables.read().await;
        let mut attempts = tables.attempts.clone();
        attempts.sort_by(|a, b| {
            b.completed_at
                .cmp(&a.completed_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(attempts)
    }
}
