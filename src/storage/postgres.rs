// src/storage/postgres.rs

use async_trait::async_trait;
use sqlx::PgPool;
use validator::Validate;

use super::{Storage, StoreError, check_attempt};
use crate::models::{
    attempt::{AttemptResult, PersistedAttempt},
    question::{NewQuestion, Question},
};

/// Postgres-backed store over the `questions` and `attempts` tables.
#[derive(Debug, Clone)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, source, text, options, correct_answer, rationale
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(questions)
    }

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        question.validate()?;

        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (source, text, options, correct_answer, rationale)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, source, text, options, correct_answer, rationale
            "#,
        )
        .bind(&question.source)
        .bind(&question.text)
        .bind(&question.options)
        .bind(question.correct_answer)
        .bind(&question.rationale)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(question)
    }

    async fn create_attempt(&self, attempt: AttemptResult) -> Result<PersistedAttempt, StoreError> {
        check_attempt(&attempt)?;

        let persisted = sqlx::query_as::<_, PersistedAttempt>(
            r#"
            INSERT INTO attempts (score, total_questions, correct_count, wrong_count, time_spent_seconds)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, score, total_questions, correct_count, wrong_count, time_spent_seconds, completed_at
            "#,
        )
        .bind(attempt.score)
        .bind(attempt.total_questions)
        .bind(attempt.correct_count)
        .bind(attempt.wrong_count)
        .bind(attempt.time_spent_seconds)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert attempt: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(persisted)
    }

    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError> {
        let attempts = sqlx::query_as::<_, PersistedAttempt>(
            r#"
            SELECT id, score, total_questions, correct_count, wrong_count, time_spent_seconds, completed_at
            FROM attempts
            ORDER BY completed_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch attempts: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(attempts)
    }
}
