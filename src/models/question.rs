use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
    pub category: Category,
}

impl Question {
    pub fn new(question: impl Into<String>, answer: impl Into<String>, category: Category) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            category,
        }
    }
}

/// Fixed set of question categories. Serialized as the human label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Recognition Count")]
    RecognitionCount,
    #[serde(rename = "Unique Relationships")]
    UniqueRelationships,
    #[serde(rename = "Award Amount")]
    AwardAmount,
    #[serde(rename = "Program Type")]
    ProgramType,
    #[serde(rename = "Award Type")]
    AwardType,
    #[serde(rename = "Timeframe")]
    Timeframe,
    #[serde(rename = "Giver-Recipient Relationship")]
    GiverRecipientRelationship,
    #[serde(rename = "Specific Award")]
    SpecificAward,
    #[serde(rename = "Recognition Details")]
    RecognitionDetails,
    #[serde(rename = "Comment-Based")]
    CommentBased,
    #[serde(rename = "Comparative")]
    Comparative,
    #[serde(rename = "Statistical")]
    Statistical,
    #[serde(rename = "Relationship")]
    Relationship,
    #[serde(rename = "Temporal")]
    Temporal,
    #[serde(rename = "Award-specific")]
    AwardSpecific,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::RecognitionCount,
        Category::UniqueRelationships,
        Category::AwardAmount,
        Category::ProgramType,
        Category::AwardType,
        Category::Timeframe,
        Category::GiverRecipientRelationship,
        Category::SpecificAward,
        Category::RecognitionDetails,
        Category::CommentBased,
        Category::Comparative,
        Category::Statistical,
        Category::Relationship,
        Category::Temporal,
        Category::AwardSpecific,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::RecognitionCount => "Recognition Count",
            Category::UniqueRelationships => "Unique Relationships",
            Category::AwardAmount => "Award Amount",
            Category::ProgramType => "Program Type",
            Category::AwardType => "Award Type",
            Category::Timeframe => "Timeframe",
            Category::GiverRecipientRelationship => "Giver-Recipient Relationship",
            Category::SpecificAward => "Specific Award",
            Category::RecognitionDetails => "Recognition Details",
            Category::CommentBased => "Comment-Based",
            Category::Comparative => "Comparative",
            Category::Statistical => "Statistical",
            Category::Relationship => "Relationship",
            Category::Temporal => "Temporal",
            Category::AwardSpecific => "Award-specific",
        }
    }

    /// Lenient lookup used for labels coming back from the LLM.
    /// Case, spacing, hyphens and underscores are ignored.
    pub fn from_label(raw: &str) -> Option<Category> {
        let wanted = normalize_label(raw);
        if wanted.is_empty() {
            return None;
        }
        Category::ALL
            .into_iter()
            .find(|c| normalize_label(c.label()) == wanted)
            .or_else(|| match wanted.as_str() {
                "comment" | "commentbased" | "comments" => Some(Category::CommentBased),
                "comparison" => Some(Category::Comparative),
                "statistics" | "stats" => Some(Category::Statistical),
                "relationships" | "giverrecipient" => Some(Category::Relationship),
                "time" | "timebased" => Some(Category::Temporal),
                "award" | "awards" | "awardspecificquestions" => Some(Category::AwardSpecific),
                _ => None,
            })
    }
}

fn normalize_label(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Expected answer form, derived from the question wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerShape {
    Who,
    Quantity,
    Other,
}
