// src/exam/review.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::question::Question;

/// One row of the post-exam review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub index: usize,
    pub question_id: i32,
    pub selected_option: Option<usize>,
    pub correct_option: Option<usize>,
    pub is_correct: bool,
    pub rationale: Option<String>,
}

/// Pairs every question with the answer given to it.
pub fn review(questions: &[Question], answers: &BTreeMap<usize, usize>) -> Vec<QuestionReview> {
    questions
        .iter()
        .enumerate()
        .map(|(index, q)| {
            let selected_option = answers.get(&index).copied();
            let correct_option = q.correct_index();
            QuestionReview {
                index,
                question_id: q.id,
                selected_option,
                correct_option,
                is_correct: selected_option.is_some() && selected_option == correct_option,
                rationale: q.rationale.clone(),
            }
        })
        .collect()
}
