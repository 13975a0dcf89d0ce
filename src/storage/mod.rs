// src/storage/mod.rs

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    attempt::{AttemptResult, PersistedAttempt},
    question::{NewQuestion, Question},
};

pub use memory::MemStorage;
pub use postgres::PgStorage;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The payload broke a rule; `field` names the offending field when known.
    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The store could not be reached or failed while serving the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        StoreError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let field = errors
            .field_errors()
            .keys()
            .map(|name| name.to_string())
            .find(|name| name != "__all__");
        StoreError::Validation {
            message: errors.to_string(),
            field,
        }
    }
}

/// Relational store for the question bank and finished attempts.
#[async_trait]
pub trait Storage: Send + Sync {
    /// All questions, ordered by id.
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn create_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// Validates and stores a scored attempt, stamping its completion time.
    async fn create_attempt(&self, attempt: AttemptResult) -> Result<PersistedAttempt, StoreError>;

    /// All attempts, most recently completed first.
    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError>;
}

/// Shared admission check for attempts, used by every store.
pub(crate) fn check_attempt(attempt: &AttemptResult) -> Result<(), StoreError> {
    attempt
        .check()
        .map_err(|invalid| StoreError::validation(invalid.message, invalid.field))
}
