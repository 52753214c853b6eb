use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use crate::models::question::Question;

const BASE_FACTUAL_QUESTIONS: usize = 25;
const FILTER_LOSS_MULTIPLIER: f64 = 1.2;

/// Upper bounds on how many candidates each generator attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GenerationLimits {
    #[validate(range(max = 500))]
    pub comment_limit: usize,
    #[validate(range(max = 500))]
    pub scenario_limit: usize,
    #[validate(range(max = 500))]
    pub ai_advanced_limit: usize,
    #[validate(range(max = 500))]
    pub relationship_limit: usize,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        Self {
            comment_limit: 30,
            scenario_limit: 40,
            ai_advanced_limit: 40,
            relationship_limit: 30,
        }
    }
}

impl GenerationLimits {
    /// Spreads a target question count across the generators, over-asking by
    /// 20% to make up for what validation and dedup remove.
    pub fn from_target(target: usize) -> Self {
        let remaining = target.saturating_sub(BASE_FACTUAL_QUESTIONS) as f64;
        let share = |ratio: f64, floor: usize| -> usize {
            ((remaining * ratio * FILTER_LOSS_MULTIPLIER) as usize).max(floor)
        };

        Self {
            comment_limit: share(0.20, 5),
            scenario_limit: share(0.12, 8),
            ai_advanced_limit: share(0.30, 10),
            relationship_limit: share(0.18, 10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Analyzed,
    FactualGenerated,
    RelationshipGenerated,
    CommentQuestionsGenerated,
    AdvancedQuestionsGenerated,
    ScenarioGenerated,
    Validated,
    Filtered,
    Deduplicated,
}

/// Emitted once per completed stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineEvent {
    pub stage: PipelineStage,
    /// Questions produced by (or surviving) the stage.
    pub questions: usize,
    /// Questions removed by the stage, zero for generators.
    pub dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenerationSummary {
    pub raw: usize,
    pub after_validation: usize,
    pub after_filtering: usize,
    pub final_unique: usize,
    pub removed: usize,
    pub invalid_format: usize,
    pub uninteresting: usize,
    pub duplicates: usize,
    pub by_category: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    pub questions: Vec<Question>,
    pub summary: GenerationSummary,
}

pub fn count_by_category(questions: &[Question]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for q in questions {
        *counts.entry(q.category.label().to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn group_by_category(questions: &[Question]) -> BTreeMap<String, Vec<Question>> {
    let mut groups: BTreeMap<String, Vec<Question>> = BTreeMap::new();
    for q in questions {
        groups
            .entry(q.category.label().to_string())
            .or_default()
            .push(q.clone());
    }
    groups
}
