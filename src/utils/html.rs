use ammonia;

use crate::models::question::NewQuestion;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe formatting tags (like <b>, <sub>) survive, while
/// <script>, <iframe> and event-handler attributes are stripped. Question
/// text is rendered as markup by the exam UI.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

/// Sanitises every user-visible string of a question before it is stored.
pub fn clean_question(question: NewQuestion) -> NewQuestion {
    NewQuestion {
        source: question.source.as_deref().map(clean_html),
        text: clean_html(&question.text),
        options: question.options.iter().map(|o| clean_html(o)).collect(),
        correct_answer: question.correct_answer,
        rationale: question.rationale.as_deref().map(clean_html),
    }
}
