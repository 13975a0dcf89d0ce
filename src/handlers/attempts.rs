// src/handlers/attempts.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{error::AppError, models::attempt::AttemptResult, storage::Storage};

/// Lists finished attempts, newest first.
pub async fn list_attempts(
    State(store): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    let attempts = store.list_attempts().await?;
    Ok(Json(attempts))
}

/// Stores a scored attempt.
///
/// * Unreadable bodies and missing or mistyped fields come back as
///   400 `{message, field?}` instead of axum's default rejection.
/// * Re-checks the counting and rounding rules before inserting.
pub async fn create_attempt(
    State(store): State<Arc<dyn Storage>>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = payload?;
    let attempt: AttemptResult = serde_json::from_value(body)?;

    let persisted = store.create_attempt(attempt).await?;

    tracing::info!(
        attempt_id = persisted.id,
        score = persisted.score,
        "Attempt recorded"
    );

    Ok((StatusCode::CREATED, Json(persisted)))
}
