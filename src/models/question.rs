// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i32,

    /// Where the question was taken from (e.g. a past paper).
    pub source: Option<String>,

    /// The question stem.
    pub text: String,

    /// Answer options, in display order. Stored as a TEXT[] column.
    pub options: Vec<String>,

    /// 0-based index into `options`.
    pub correct_answer: i32,

    /// Explanation shown after scoring.
    pub rationale: Option<String>,
}

impl Question {
    /// The correct option as a usable index, if it lies inside `options`.
    pub fn correct_index(&self) -> Option<usize> {
        usize::try_from(self.correct_answer)
            .ok()
            .filter(|idx| *idx < self.options.len())
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }
}

/// DTO for inserting a question into the bank.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = validate_correct_answer))]
pub struct NewQuestion {
    #[validate(length(max = 200))]
    pub source: Option<String>,
    #[validate(length(min = 1, max = 4000))]
    pub text: String,
    #[validate(custom(function = validate_options))]
    pub options: Vec<String>,
    #[validate(range(min = 0))]
    pub correct_answer: i32,
    #[validate(length(max = 4000))]
    pub rationale: Option<String>,
}

impl NewQuestion {
    /// Builds the stored form once the store has assigned an id.
    pub fn into_question(self, id: i32) -> Question {
        Question {
            id,
            source: self.source,
            text: self.text,
            options: self.options,
            correct_answer: self.correct_answer,
            rationale: self.rationale,
        }
    }
}

fn validate_options(options: &[String]) -> Result<(), validator::ValidationError> {
    if options.len() < 2 {
        return Err(validator::ValidationError::new("at_least_two_options"));
    }
    for opt in options {
        if opt.trim().is_empty() {
            return Err(validator::ValidationError::new("option_cannot_be_empty"));
        }
        if opt.len() > 1000 {
            return Err(validator::ValidationError::new("option_too_long"));
        }
    }
    Ok(())
}

fn validate_correct_answer(question: &NewQuestion) -> Result<(), validator::ValidationError> {
    let in_range = usize::try_from(question.correct_answer)
        .map(|idx| idx < question.options.len())
        .unwrap_or(false);
    if !in_range {
        return Err(validator::ValidationError::new("correct_answer_out_of_range"));
    }
    Ok(())
}
