use crate::models::generation::{GenerationLimits, GenerationSummary, PipelineEvent};
use crate::models::question::Question;
use crate::models::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;
use validator::Validate;

/// Non-file fields of the generate upload. Per-generator limits override
/// whatever `target` derives.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateForm {
    #[validate(range(min = 50, max = 200, message = "Target must be between 50 and 200"))]
    pub target: Option<usize>,
    #[validate(range(max = 500))]
    pub comment_limit: Option<usize>,
    #[validate(range(max = 500))]
    pub scenario_limit: Option<usize>,
    #[validate(range(max = 500))]
    pub ai_advanced_limit: Option<usize>,
    #[validate(range(max = 500))]
    pub relationship_limit: Option<usize>,
    pub seed: Option<u64>,
    #[validate(length(min = 1))]
    pub api_key: Option<String>,
}

impl GenerateForm {
    pub fn limits(&self) -> GenerationLimits {
        let base = self
            .target
            .map(GenerationLimits::from_target)
            .unwrap_or_default();

        GenerationLimits {
            comment_limit: self.comment_limit.unwrap_or(base.comment_limit),
            scenario_limit: self.scenario_limit.unwrap_or(base.scenario_limit),
            ai_advanced_limit: self.ai_advanced_limit.unwrap_or(base.ai_advanced_limit),
            relationship_limit: self.relationship_limit.unwrap_or(base.relationship_limit),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub total_records: usize,
    pub preview: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub run_id: Uuid,
    pub limits: GenerationLimits,
    pub summary: GenerationSummary,
    pub events: Vec<PipelineEvent>,
    pub who_questions: usize,
    pub how_many_questions: usize,
    pub questions: Vec<Question>,
    pub by_category: BTreeMap<String, Vec<Question>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Txt,
    Xlsx,
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}
