use crate::error::{Error, Result};
use crate::models::analysis::{AnalysisSnapshot, RankedCount};
use crate::models::question::{Category, Question};
use crate::models::record::Record;
use crate::services::completion_client::{CompletionClient, CompletionRequest};
use crate::utils::text::{strip_code_fences, truncate_chars};
use serde_json::Value as JsonValue;

/// Comments at or below this many characters carry too little to ask about.
pub const MIN_COMMENT_CHARS: usize = 50;
pub const MAX_COMMENT_CHARS: usize = 1000;
pub const QUESTIONS_PER_COMMENT: usize = 3;

#[derive(Clone)]
pub struct AIService<C> {
    client: C,
    model: String,
    temperature: f32,
}

impl<C: CompletionClient> AIService<C> {
    pub fn new(client: C, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    /// One LLM call per eligible comment. A failed call or unparseable reply
    /// skips that comment only.
    pub async fn generate_from_comments(&self, records: &[Record], limit: usize) -> Vec<Question> {
        let mut questions = Vec::new();

        for (idx, record) in eligible_comments(records).take(limit) {
            let prompt = comment_prompt(record);
            match self.ask(prompt, Category::CommentBased).await {
                Ok(generated) => {
                    tracing::debug!("Comment {} produced {} questions", idx, generated.len());
                    questions.extend(generated);
                }
                Err(e) => {
                    tracing::warn!("Error generating questions for comment {}: {}", idx, e);
                }
            }
        }

        questions
    }

    /// Single call over the whole-dataset summary.
    pub async fn generate_advanced(&self, analysis: &AnalysisSnapshot, num_questions: usize) -> Vec<Question> {
        if num_questions == 0 {
            return Vec::new();
        }

        let prompt = advanced_prompt(analysis, num_questions);
        match self.ask(prompt, Category::Statistical).await {
            Ok(generated) => generated,
            Err(e) => {
                tracing::warn!("Error generating advanced questions: {}", e);
                Vec::new()
            }
        }
    }

    async fn ask(&self, prompt: String, default_category: Category) -> Result<Vec<Question>> {
        let request = CompletionRequest {
            prompt,
            temperature: self.temperature,
            model: self.model.clone(),
        };
        let response_text = self.client.complete(&request).await?;
        parse_questions(&response_text, default_category)
    }
}

/// Records whose comment is long enough, paired with their row index.
pub fn eligible_comments(records: &[Record]) -> impl Iterator<Item = (usize, &Record)> {
    records.iter().enumerate().filter(|(_, r)| {
        r.comment
            .as_deref()
            .is_some_and(|c| c.chars().count() > MIN_COMMENT_CHARS)
    })
}

/// Parses an LLM reply into questions. Accepts a bare array or `{"questions": [...]}`,
/// optionally inside a markdown code fence. Items without question text are skipped;
/// numeric answers are stringified; unknown categories fall back to `default_category`.
pub fn parse_questions(raw: &str, default_category: Category) -> Result<Vec<Question>> {
    let parsed: JsonValue = serde_json::from_str(strip_code_fences(raw))?;

    let items = match parsed {
        JsonValue::Array(items) => items,
        JsonValue::Object(mut obj) => match obj.remove("questions") {
            Some(JsonValue::Array(items)) => items,
            _ => return Err(Error::Llm("Response object has no 'questions' array".to_string())),
        },
        _ => return Err(Error::Llm("Response is not a JSON array".to_string())),
    };

    Ok(items
        .iter()
        .filter_map(|item| coerce_question(item, default_category))
        .collect())
}

fn coerce_question(v: &JsonValue, default_category: Category) -> Option<Question> {
    let question = v.get("question")?.as_str()?.trim().to_string();
    if question.is_empty() {
        return None;
    }

    let answer = match v.get("answer") {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let category = v
        .get("category")
        .and_then(|c| c.as_str())
        .and_then(Category::from_label)
        .unwrap_or(default_category);

    Some(Question {
        question,
        answer,
        category,
    })
}

pub fn comment_prompt(record: &Record) -> String {
    let comment = truncate_chars(record.comment.as_deref().unwrap_or(""), MAX_COMMENT_CHARS);

    format!(
        r#"Based on the following recognition information, generate {n} unique, interesting and challenging quiz questions that test specific knowledge from the comment.

IMPORTANT RULES FOR ANSWERS:
1. If the question asks "Who" or involves a person, the answer MUST be an employee name from the recognition data.
2. If the question asks "How many", "What amount", or involves a count/number, the answer MUST be ONLY a number.
3. For achievement/task questions, answer should be a specific achievement name or task name (short and concise).
4. Avoid generic or boring questions - make them specific and interesting.
5. Focus on unique achievements, specific numbers, and notable accomplishments.

Recognition Details:
- Program: {program}
- Recipient: {recipient}
- Giver: {giver}
- Comment: {comment}

Generate exactly {n} questions in JSON format. Each question should have these fields:
- "question": The quiz question (make it specific and interesting)
- "answer": The correct answer (MUST be either: employee name, OR number only, OR specific achievement/task name)
- "category": "Comment-Based"

Good Examples:
[
    {{"question": "Who received the best blogger award for Q3 2024?", "answer": "Gunender Kumar Prem Chand", "category": "Comment-Based"}},
    {{"question": "How many CBR-supported services got MFA integration?", "answer": "42", "category": "Comment-Based"}},
    {{"question": "What automation capability did Pavan implement?", "answer": "RULE PARAMETER VERSIONING", "category": "Comment-Based"}}
]

Bad Examples (avoid these):
- Questions with long sentence answers
- Generic questions without specific details
- Questions that can't be answered from the data

Return ONLY a valid JSON array with {n} question objects.
"#,
        n = QUESTIONS_PER_COMMENT,
        program = record.program,
        recipient = record.recipient,
        giver = record.giver,
        comment = comment,
    )
}

fn ranked_list(entries: &[RankedCount], take: usize) -> String {
    entries
        .iter()
        .take(take)
        .map(|e| format!("{} ({})", e.name, e.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn names(entries: &[RankedCount]) -> String {
    entries
        .iter()
        .map(|e| e.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn data_summary(analysis: &AnalysisSnapshot) -> String {
    let repeat_recipients = analysis
        .consecutive_recipients
        .iter()
        .map(|c| {
            let months = c.months.iter().map(u32::to_string).collect::<Vec<_>>().join("/");
            format!("{} (months {})", c.name, months)
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Employee Recognition Data Summary:
- Total Records: {total}
- Unique Recipients: {recipients}
- Unique Givers: {givers}
- Top 5 Recipients: {top_recipients}
- Top 5 Givers: {top_givers}
- Programs: {programs}
- Award Types: {award_types}
- Total Award Amount: {amount:.2}
- Recipients with Most Unique Givers: {unique_givers}
- Recipients recognized in at least two of Jan-Mar {year}: {repeat}
",
        total = analysis.total_records,
        recipients = analysis.unique_recipients,
        givers = analysis.unique_givers,
        top_recipients = ranked_list(&analysis.top_recipients, 5),
        top_givers = ranked_list(&analysis.top_givers, 5),
        programs = names(&analysis.programs),
        award_types = names(&analysis.award_types),
        amount = analysis.total_award_amount,
        unique_givers = ranked_list(&analysis.recipients_with_most_unique_givers, 5),
        year = analysis.reference_year,
        repeat = if repeat_recipients.is_empty() { "none".to_string() } else { repeat_recipients },
    )
}

pub fn advanced_prompt(analysis: &AnalysisSnapshot, num_questions: usize) -> String {
    format!(
        r#"Based on the following employee recognition data summary, generate {n} unique, interesting and challenging quiz questions that test various aspects of the data.

{summary}
CRITICAL ANSWER FORMAT RULES:
1. If the question asks "Who" - answer MUST be an employee name ONLY (e.g., "Pavan Kumar Manda")
2. If the question asks "How many" or involves counting - answer MUST be a number ONLY (e.g., "5")
3. If the question asks about amounts - answer MUST be a number ONLY (e.g., "700")
4. NO long sentences or explanations in answers
5. Make questions interesting and challenging, not generic

Generate questions in these categories:
1. Comparative questions (who has more/less, differences in numbers)
2. Statistical questions (totals, counts, rankings)
3. Relationship questions (who recognized whom)
4. Temporal questions (monthly/quarterly patterns)
5. Award-specific questions (amounts, types)

IMPORTANT:
- Avoid boring/generic questions like "What is the total number of X?"
- Focus on interesting comparisons and specific achievements
- Make questions that require thinking, not just data lookup

Return ONLY a valid JSON array with {n} question objects. Each object should have:
- "question": The quiz question (specific and interesting)
- "answer": The correct answer (MUST be: employee name OR number only)
- "category": One of "Comparative", "Statistical", "Relationship", "Temporal", "Award-specific"

Good Examples:
[
    {{"question": "Who received more recognitions - Pavan Kumar Manda or Nagesh Raghupatruni?", "answer": "Pavan Kumar Manda", "category": "Comparative"}},
    {{"question": "How many recognitions did Sailaja Perumalla give?", "answer": "16", "category": "Statistical"}},
    {{"question": "Who gave the most BluePoints awards?", "answer": "Sailaja Perumalla", "category": "Award-specific"}}
]

Bad Examples (avoid):
- Questions with sentence answers
- Generic questions without interesting context
- Questions that are too easy or obvious
"#,
        n = num_questions,
        summary = data_summary(analysis),
    )
}
