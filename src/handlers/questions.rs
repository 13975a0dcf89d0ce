// src/handlers/questions.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{error::AppError, storage::Storage};

/// Lists the question bank in id order.
///
/// Correct answers and rationales are included: scoring happens on the
/// client and the review screen needs them.
pub async fn list_questions(
    State(store): State<Arc<dyn Storage>>,
) -> Result<impl IntoResponse, AppError> {
    let questions = store.list_questions().await?;
    Ok(Json(questions))
}
