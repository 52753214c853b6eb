use crate::models::question::Question;
use crate::utils::text::word_signature;
use std::collections::{HashMap, HashSet};

/// Near-duplicate thresholds. A heuristic, not a correctness guarantee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupPolicy {
    pub signature_words: usize,
    /// Distinct signatures an answer may collect before overlapping ones are rejected.
    pub max_answer_reuse: usize,
}

impl Default for DedupPolicy {
    fn default() -> Self {
        Self {
            signature_words: 5,
            max_answer_reuse: 3,
        }
    }
}

pub struct DedupService;

impl DedupService {
    /// Keeps the first occurrence of each question text and stops an answer from
    /// collecting more overlapping phrasings once it has `max_answer_reuse` signatures.
    pub fn deduplicate(questions: Vec<Question>, policy: &DedupPolicy) -> Vec<Question> {
        let mut unique = Vec::with_capacity(questions.len());
        let mut seen_questions: HashSet<String> = HashSet::new();
        let mut seen_answers: HashMap<String, HashSet<String>> = HashMap::new();

        for q in questions {
            let text = q.question.trim().to_string();
            let answer = q.answer.trim().to_string();

            if seen_questions.contains(&text) {
                tracing::debug!("Dropping exact duplicate: {}", text);
                continue;
            }

            let signature = word_signature(&text, policy.signature_words);

            if let Some(signatures) = seen_answers.get(&answer) {
                if signatures.len() >= policy.max_answer_reuse
                    && signatures
                        .iter()
                        .any(|existing| existing.contains(&signature) || signature.contains(existing.as_str()))
                {
                    tracing::debug!("Dropping near duplicate for answer '{}': {}", answer, text);
                    continue;
                }
            }

            seen_questions.insert(text);
            seen_answers.entry(answer).or_default().insert(signature);
            unique.push(q);
        }

        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Category;

    fn q(text: &str, answer: &str) -> Question {
        Question::new(text, answer, Category::Statistical)
    }

    #[test]
    fn drops_exact_duplicates_first_seen_wins() {
        let input = vec![
            q("Who gave the most?", "Bob"),
            q("How many did Ann get?", "3"),
            q("  Who gave the most?  ", "Ann"),
        ];
        let out = DedupService::deduplicate(input, &DedupPolicy::default());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].answer, "Bob");
    }

    #[test]
    fn caps_overlapping_phrasing_per_answer() {
        let input = vec![
            q("How many recognitions did Ann receive?", "3"),
            q("How many recognitions did Bob receive?", "3"),
            q("How many recognitions did Cy receive?", "3"),
            // fourth with same answer and same opening as a stored signature
            q("How many recognitions did Ann receive in total?", "3"),
            // same answer but unrelated phrasing
            q("What number of programs ran in May?", "3"),
        ];
        let out = DedupService::deduplicate(input, &DedupPolicy::default());
        let texts: Vec<_> = out.iter().map(|q| q.question.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "How many recognitions did Ann receive?",
                "How many recognitions did Bob receive?",
                "How many recognitions did Cy receive?",
                "What number of programs ran in May?",
            ]
        );
    }

    #[test]
    fn reuse_below_threshold_is_allowed() {
        let input = vec![
            q("How many recognitions did Ann receive?", "3"),
            q("How many recognitions did Ann receive in 2025?", "3"),
        ];
        let out = DedupService::deduplicate(input, &DedupPolicy::default());
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn thresholds_are_configurable() {
        let policy = DedupPolicy {
            signature_words: 3,
            max_answer_reuse: 1,
        };
        let input = vec![
            q("How many awards went to Ann?", "2"),
            q("How many awards went to Bob?", "2"),
        ];
        assert_eq!(DedupService::deduplicate(input, &policy).len(), 1);
    }

    #[test]
    fn accepted_texts_are_pairwise_distinct() {
        let input: Vec<Question> = (0..40)
            .map(|i| q(&format!("Who gave recognition number {}?", i % 7), "Ann"))
            .collect();
        let out = DedupService::deduplicate(input, &DedupPolicy::default());
        let mut texts: Vec<_> = out.iter().map(|q| q.question.clone()).collect();
        let before = texts.len();
        texts.sort();
        texts.dedup();
        assert_eq!(before, texts.len());
    }
}
