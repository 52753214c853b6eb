use crate::models::question::Question;

#[derive(Debug, Clone, PartialEq)]
pub struct InterestPolicy {
    /// Lowercase substrings that mark a question as generic.
    pub boring_patterns: Vec<String>,
    pub max_answer_chars: usize,
}

impl Default for InterestPolicy {
    fn default() -> Self {
        Self {
            boring_patterns: vec![
                "what is the total number".to_string(),
                "list all".to_string(),
                "name all".to_string(),
            ],
            max_answer_chars: 150,
        }
    }
}

impl InterestPolicy {
    pub fn is_interesting(&self, question: &Question) -> bool {
        let text = question.question.to_lowercase();
        if self.boring_patterns.iter().any(|p| text.contains(p.as_str())) {
            return false;
        }
        question.answer.chars().count() <= self.max_answer_chars
    }
}
