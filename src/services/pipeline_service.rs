use crate::error::Result;
use crate::models::generation::{
    count_by_category, GenerationLimits, GenerationOutput, GenerationSummary, PipelineEvent, PipelineStage,
};
use crate::models::question::Question;
use crate::models::record::Record;
use crate::services::ai_service::AIService;
use crate::services::analysis_service::AnalysisService;
use crate::services::answer_validator;
use crate::services::completion_client::CompletionClient;
use crate::services::dedup_service::{DedupPolicy, DedupService};
use crate::services::factual_generator::FactualGenerator;
use crate::services::interest_filter::InterestPolicy;
use crate::services::relationship_generator::RelationshipGenerator;
use crate::services::scenario_generator::ScenarioGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;
use validator::Validate;

pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;

/// Everything one run needs to know, passed in explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub limits: GenerationLimits,
    pub reference_year: i32,
    pub dedup: DedupPolicy,
    pub interest: InterestPolicy,
    /// Fixes scenario sampling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            limits: GenerationLimits::default(),
            reference_year: DEFAULT_REFERENCE_YEAR,
            dedup: DedupPolicy::default(),
            interest: InterestPolicy::default(),
            seed: None,
        }
    }
}

pub struct QuizPipeline<C> {
    ai: AIService<C>,
    config: PipelineConfig,
}

impl<C: CompletionClient> QuizPipeline<C> {
    pub fn new(ai: AIService<C>, config: PipelineConfig) -> Self {
        Self { ai, config }
    }

    /// Runs every generator, then validation, filtering and dedup.
    /// Stage completions go to `events` when a receiver is attached.
    pub async fn run(
        &self,
        records: &[Record],
        events: Option<&UnboundedSender<PipelineEvent>>,
    ) -> Result<GenerationOutput> {
        self.config.limits.validate()?;
        let limits = &self.config.limits;

        let emit = |stage: PipelineStage, questions: usize, dropped: usize| {
            tracing::info!(?stage, questions, dropped, "Pipeline stage complete");
            if let Some(tx) = events {
                // receiver gone means nobody is listening
                let _ = tx.send(PipelineEvent {
                    stage,
                    questions,
                    dropped,
                });
            }
        };

        let analysis = AnalysisService::analyze(records, self.config.reference_year);
        emit(PipelineStage::Analyzed, 0, 0);

        let mut all: Vec<Question> = Vec::new();

        let factual = FactualGenerator::generate(&analysis);
        emit(PipelineStage::FactualGenerated, factual.len(), 0);
        all.extend(factual);

        let relationship = RelationshipGenerator::generate(records, limits.relationship_limit);
        emit(PipelineStage::RelationshipGenerated, relationship.len(), 0);
        all.extend(relationship);

        let comments = self.ai.generate_from_comments(records, limits.comment_limit).await;
        emit(PipelineStage::CommentQuestionsGenerated, comments.len(), 0);
        all.extend(comments);

        let advanced = self.ai.generate_advanced(&analysis, limits.ai_advanced_limit).await;
        emit(PipelineStage::AdvancedQuestionsGenerated, advanced.len(), 0);
        all.extend(advanced);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scenario = ScenarioGenerator::generate(records, limits.scenario_limit, &mut rng);
        emit(PipelineStage::ScenarioGenerated, scenario.len(), 0);
        all.extend(scenario);

        let raw = all.len();

        let valid: Vec<Question> = all.into_iter().filter(answer_validator::is_valid).collect();
        let invalid_format = raw - valid.len();
        emit(PipelineStage::Validated, valid.len(), invalid_format);

        let after_validation = valid.len();
        let interesting: Vec<Question> = valid
            .into_iter()
            .filter(|q| self.config.interest.is_interesting(q))
            .collect();
        let uninteresting = after_validation - interesting.len();
        emit(PipelineStage::Filtered, interesting.len(), uninteresting);

        let after_filtering = interesting.len();
        let unique = DedupService::deduplicate(interesting, &self.config.dedup);
        let duplicates = after_filtering - unique.len();
        emit(PipelineStage::Deduplicated, unique.len(), duplicates);

        let summary = GenerationSummary {
            raw,
            after_validation,
            after_filtering,
            final_unique: unique.len(),
            removed: raw - unique.len(),
            invalid_format,
            uninteresting,
            duplicates,
            by_category: count_by_category(&unique),
        };

        tracing::info!(
            raw = summary.raw,
            final_unique = summary.final_unique,
            removed = summary.removed,
            "Question generation finished"
        );

        Ok(GenerationOutput {
            questions: unique,
            summary,
        })
    }
}
