// src/exam/scoring.rs

use std::collections::BTreeMap;

use crate::models::{attempt::AttemptResult, question::Question};

/// Rounded percentage of `correct` out of `total`.
///
/// Rounds half away from zero in integer arithmetic, so 1/8 gives 13 and
/// 1/3 gives 33. An empty exam scores 0.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let correct = u64::from(correct.min(total));
    let total = u64::from(total);
    ((200 * correct + total) / (2 * total)) as u32
}

/// Seconds used out of the time budget, clamped to `[0, total_time]`.
pub fn time_spent(total_time: u32, remaining: u32) -> u32 {
    total_time.saturating_sub(remaining.min(total_time))
}

/// Scores a finished session.
///
/// `answers` maps question index to selected option index. An unanswered
/// question counts as wrong, as does a question whose stored correct answer
/// does not point at one of its options.
pub fn score(
    questions: &[Question],
    answers: &BTreeMap<usize, usize>,
    time_spent_seconds: u32,
) -> AttemptResult {
    let mut correct_count: u32 = 0;
    let mut wrong_count: u32 = 0;

    for (idx, question) in questions.iter().enumerate() {
        match (answers.get(&idx), question.correct_index()) {
            (Some(selected), Some(correct)) if *selected == correct => correct_count += 1,
            _ => wrong_count += 1,
        }
    }

    let total = correct_count + wrong_count;

    AttemptResult {
        score: percentage(correct_count, total) as i32,
        total_questions: total as i32,
        correct_count: correct_count as i32,
        wrong_count: wrong_count as i32,
        time_spent_seconds: i32::try_from(time_spent_seconds).unwrap_or(i32::MAX),
    }
}
