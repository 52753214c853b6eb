use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::{HashMap, HashSet};
use std::fmt;

pub const SAMPLES_PER_SHAPE: usize = 5;
const NAME_MAX_CHARS: usize = 50;
const OTHER_MAX_CHARS: usize = 100;

/// A question as found in a file under audit. Looser than `Question`:
/// the category may be missing or unknown and the answer may be any JSON value.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditedQuestion {
    pub question: String,
    #[serde(default)]
    pub answer: JsonValue,
    #[serde(default)]
    pub category: Option<String>,
}

impl AuditedQuestion {
    fn answer_text(&self) -> String {
        match &self.answer {
            JsonValue::String(s) => s.clone(),
            JsonValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Issue {
    #[serde(rename = "Invalid name format")]
    InvalidNameFormat,
    #[serde(rename = "Number should not contain letters")]
    NumberContainsLetters,
    #[serde(rename = "Not a valid number")]
    NotANumber,
    #[serde(rename = "Answer too long")]
    AnswerTooLong,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Issue::InvalidNameFormat => "Invalid name format",
            Issue::NumberContainsLetters => "Number should not contain letters",
            Issue::NotANumber => "Not a valid number",
            Issue::AnswerTooLong => "Answer too long",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRef {
    /// 1-based position in the audited file.
    pub index: usize,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Problem {
    #[serde(flatten)]
    pub entry: QuestionRef,
    pub reason: Issue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub total: usize,
    pub duplicates: usize,
    pub who_count: usize,
    pub how_many_count: usize,
    pub other_count: usize,
    pub problems: Vec<Problem>,
    pub who_samples: Vec<QuestionRef>,
    pub how_many_samples: Vec<QuestionRef>,
    pub other_samples: Vec<QuestionRef>,
    pub category_distribution: Vec<CategoryCount>,
}

impl QualityReport {
    pub fn passed(&self) -> bool {
        self.problems.is_empty()
    }
}

pub struct QualityService;

impl QualityService {
    pub fn check(questions: &[AuditedQuestion]) -> QualityReport {
        let distinct: HashSet<&str> = questions.iter().map(|q| q.question.as_str()).collect();
        let duplicates = questions.len() - distinct.len();

        let mut who = Vec::new();
        let mut how_many = Vec::new();
        let mut other = Vec::new();
        let mut problems = Vec::new();

        for (i, q) in questions.iter().enumerate() {
            let text = q.question.to_lowercase();
            let answer = q.answer_text();
            let entry = QuestionRef {
                index: i + 1,
                question: q.question.clone(),
                answer: answer.clone(),
            };

            let issue = if text.starts_with("who ") || text.contains(" who ") {
                who.push(entry.clone());
                let bad = !answer.chars().any(char::is_uppercase)
                    || answer.chars().count() > NAME_MAX_CHARS
                    || answer.contains('.');
                bad.then_some(Issue::InvalidNameFormat)
            } else if text.contains("how many") || text.contains("what amount") {
                how_many.push(entry.clone());
                if answer.replace(',', "").trim().parse::<f64>().is_err() {
                    Some(Issue::NotANumber)
                } else if answer.chars().any(char::is_alphabetic) {
                    Some(Issue::NumberContainsLetters)
                } else {
                    None
                }
            } else {
                other.push(entry.clone());
                (answer.chars().count() > OTHER_MAX_CHARS).then_some(Issue::AnswerTooLong)
            };

            if let Some(reason) = issue {
                problems.push(Problem { entry, reason });
            }
        }

        QualityReport {
            total: questions.len(),
            duplicates,
            who_count: who.len(),
            how_many_count: how_many.len(),
            other_count: other.len(),
            problems,
            who_samples: who.into_iter().take(SAMPLES_PER_SHAPE).collect(),
            how_many_samples: how_many.into_iter().take(SAMPLES_PER_SHAPE).collect(),
            other_samples: other.into_iter().take(SAMPLES_PER_SHAPE).collect(),
            category_distribution: category_distribution(questions),
        }
    }

    /// Human-readable rendering, as printed by the `check-questions` binary.
    pub fn render(report: &QualityReport) -> String {
        let rule = "=".repeat(80);
        let mut lines = vec![
            format!("Total Questions: {}\n", report.total),
            format!("Duplicate questions: {}", report.duplicates),
            format!("'Who' questions: {}", report.who_count),
            format!("'How many' questions: {}", report.how_many_count),
            format!("Other questions: {}", report.other_count),
            format!("\n{}", rule),
        ];

        if report.passed() {
            lines.push("\nAll questions passed validation!".to_string());
        } else {
            lines.push(format!("\nFound {} potentially problematic questions:\n", report.problems.len()));
            for p in &report.problems {
                lines.push(format!("Q{}: {}", p.entry.index, p.entry.question));
                lines.push(format!("Answer: {}", p.entry.answer));
                lines.push(format!("Issue: {}\n", p.reason));
            }
        }

        lines.push(format!("\n{}", rule));
        lines.push("Sample Questions by Type:\n".to_string());
        for (title, samples) in [
            ("WHO", &report.who_samples),
            ("HOW MANY", &report.how_many_samples),
            ("OTHER", &report.other_samples),
        ] {
            lines.push(format!("{} Questions ({} samples):", title, samples.len()));
            for (i, s) in samples.iter().enumerate() {
                lines.push(format!("{}. Q{}: {}", i + 1, s.index, s.question));
                lines.push(format!("   Answer: {}\n", s.answer));
            }
        }

        lines.push(format!("\n{}", rule));
        lines.push("Category Distribution:\n".to_string());
        for c in &report.category_distribution {
            lines.push(format!("  {}: {} questions", c.category, c.count));
        }

        lines.join("\n")
    }
}

/// Sorted by count descending; ties keep first-seen order.
fn category_distribution(questions: &[AuditedQuestion]) -> Vec<CategoryCount> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for q in questions {
        let label = q.category.clone().unwrap_or_else(|| "Unknown".to_string());
        let entry = counts.entry(label.clone()).or_insert(0);
        if *entry == 0 {
            order.push(label);
        }
        *entry += 1;
    }

    let mut distribution: Vec<CategoryCount> = order
        .into_iter()
        .map(|category| {
            let count = counts[&category];
            CategoryCount { category, count }
        })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count));
    distribution
}
