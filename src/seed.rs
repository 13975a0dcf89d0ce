// src/seed.rs

use std::path::Path;

use validator::Validate;

use crate::{
    models::question::NewQuestion,
    storage::{Storage, StoreError},
    utils::html::clean_question,
};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("failed to read question file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse question file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("question #{index} is invalid: {errors}")]
    Invalid {
        index: usize,
        errors: validator::ValidationErrors,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Parses a JSON array of questions, sanitising and validating each one.
pub fn parse_questions(json: &str) -> Result<Vec<NewQuestion>, SeedError> {
    let raw: Vec<NewQuestion> = serde_json::from_str(json)?;
    raw.into_iter()
        .map(clean_question)
        .enumerate()
        .map(|(index, question)| {
            question
                .validate()
                .map_err(|errors| SeedError::Invalid { index, errors })?;
            Ok(question)
        })
        .collect()
}

/// Inserts `questions` unless the bank already has content.
///
/// Returns how many questions were inserted.
pub async fn seed_questions(
    store: &dyn Storage,
    questions: Vec<NewQuestion>,
) -> Result<usize, SeedError> {
    if !store.list_questions().await?.is_empty() {
        tracing::info!("Question bank already populated, skipping seed");
        return Ok(0);
    }

    let count = questions.len();
    for question in questions {
        store.create_question(question).await?;
    }

    tracing::info!("Seeded {} questions", count);
    Ok(count)
}

/// Reads a seed file and loads it into an empty bank.
pub async fn seed_from_file(store: &dyn Storage, path: &Path) -> Result<usize, SeedError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;

    let questions = parse_questions(&json)?;
    seed_questions(store, questions).await
}
