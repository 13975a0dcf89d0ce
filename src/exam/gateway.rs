// src/exam/gateway.rs

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    models::{
        attempt::{AttemptResult, PersistedAttempt},
        question::Question,
    },
    storage::{Storage, StoreError},
};

/// Where finished attempts are persisted and questions are loaded from.
///
/// Implemented over HTTP by [`crate::client::ApiClient`] and in-process by
/// [`LocalBoundary`].
#[async_trait]
pub trait PersistenceBoundary: Send + Sync {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError>;

    async fn create_attempt(&self, attempt: &AttemptResult) -> Result<PersistedAttempt, StoreError>;
}

/// Talks to a [`Storage`] directly, without a network hop.
#[derive(Clone)]
pub struct LocalBoundary {
    store: Arc<dyn Storage>,
}

impl LocalBoundary {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PersistenceBoundary for LocalBoundary {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.store.list_questions().await
    }

    async fn list_attempts(&self) -> Result<Vec<PersistedAttempt>, StoreError> {
        self.store.list_attempts().await
    }

    async fn create_attempt(
        &self,
        attempt: &AttemptResult,
    ) -> Result<PersistedAttempt, StoreError> {
        self.store.create_attempt(*attempt).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The attempt was malformed, either locally or according to the store.
    #[error("attempt rejected: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// The store could not be reached or failed.
    #[error("attempt could not be saved: {0}")]
    Availability(String),
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { message, field } => SubmitError::Validation { message, field },
            StoreError::Unavailable(detail) => SubmitError::Availability(detail),
        }
    }
}

/// Forwards scored attempts to the persistence boundary.
///
/// A submission is attempted once. Failures are returned to the caller, who
/// still holds the local [`AttemptResult`].
#[derive(Clone)]
pub struct SubmissionGateway {
    boundary: Arc<dyn PersistenceBoundary>,
}

impl SubmissionGateway {
    pub fn new(boundary: Arc<dyn PersistenceBoundary>) -> Self {
        Self { boundary }
    }

    pub fn boundary(&self) -> &Arc<dyn PersistenceBoundary> {
        &self.boundary
    }

    pub async fn submit(&self, attempt: &AttemptResult) -> Result<PersistedAttempt, SubmitError> {
        if let Err(invalid) = attempt.check() {
            tracing::error!(
                field = ?invalid.field,
                "Refusing to submit malformed attempt: {}",
                invalid.message
            );
            return Err(SubmitError::Validation {
                message: invalid.message,
                field: invalid.field.map(str::to_string),
            });
        }

        match self.boundary.create_attempt(attempt).await {
            Ok(persisted) => {
                tracing::info!(attempt_id = persisted.id, score = persisted.score, "Attempt saved");
                Ok(persisted)
            }
            Err(e) => {
                tracing::warn!("Attempt submission failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemStorage;

    fn gateway() -> (Arc<MemStorage>, SubmissionGateway) {
        let store = Arc::new(MemStorage::new());
        let boundary = LocalBoundary::new(store.clone());
        (store, SubmissionGateway::new(Arc::new(boundary)))
    }

    fn seven_of_ten() -> AttemptResult {
        AttemptResult {
            score: 70,
            total_questions: 10,
            correct_count: 7,
            wrong_count: 3,
            time_spent_seconds: 2700,
        }
    }

    #[tokio::test]
    async fn test_accepted_submission_returns_persisted_attempt() {
        let (store, gateway) = gateway();
        let persisted = gateway.submit(&seven_of_ten()).await.unwrap();

        assert_eq!(persisted.result(), seven_of_ten());
        assert_eq!(store.list_attempts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_attempt_never_reaches_store() {
        let (store, gateway) = gateway();
        let mut bad = seven_of_ten();
        bad.score = 71;

        let err = gateway.submit(&bad).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::Validation {
                message: "score must be 70 for 7 of 10 correct".to_string(),
                field: Some("score".to_string()),
            }
        );
        assert!(store.list_attempts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unavailable_store_is_availability_failure() {
        let (store, gateway) = gateway();
        store.set_available(false);

        let attempt = seven_of_ten();
        let err = gateway.submit(&attempt).await.unwrap_err();
        assert!(matches!(err, SubmitError::Availability(_)));
        // The local result is untouched and can still be shown.
        assert_eq!(attempt.score, 70);
    }
}
