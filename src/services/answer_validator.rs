use crate::models::question::{AnswerShape, Question};

const NAME_MAX_CHARS: usize = 50;
const NAME_MAX_WORDS: usize = 6;
const OTHER_MAX_CHARS: usize = 100;

pub fn classify(question_text: &str) -> AnswerShape {
    let lower = question_text.to_lowercase();

    if lower.starts_with("who ") || lower.contains(" who ") {
        AnswerShape::Who
    } else if lower.contains("how many") || lower.contains("what amount") || lower.starts_with("how much") {
        AnswerShape::Quantity
    } else {
        AnswerShape::Other
    }
}

pub fn is_valid(question: &Question) -> bool {
    is_valid_answer_format(&question.question, &question.answer)
}

pub fn is_valid_answer_format(question_text: &str, answer: &str) -> bool {
    let answer = answer.trim();
    if answer.is_empty() {
        return false;
    }

    match classify(question_text) {
        AnswerShape::Who => looks_like_name(answer),
        AnswerShape::Quantity => is_plain_number(answer),
        AnswerShape::Other => answer.chars().count() <= OTHER_MAX_CHARS && answer.matches('.').count() <= 1,
    }
}

/// Capitalized, short, no sentence punctuation.
pub fn looks_like_name(answer: &str) -> bool {
    answer.chars().any(char::is_uppercase)
        && answer.chars().count() < NAME_MAX_CHARS
        && !answer.contains('.')
        && answer.split_whitespace().count() <= NAME_MAX_WORDS
}

/// A number once thousands separators are dropped, and nothing alphabetic.
pub fn is_plain_number(answer: &str) -> bool {
    !answer.chars().any(char::is_alphabetic) && answer.replace(',', "").trim().parse::<f64>().is_ok()
}
