use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use validator::Validate;

use crate::dto::generation_dto::{GenerateForm, GenerateResponse, PreviewResponse};
use crate::error::{Error, Result};
use crate::models::generation::group_by_category;
use crate::models::question::AnswerShape;
use crate::services::ai_service::AIService;
use crate::services::answer_validator;
use crate::services::data_service::DataService;
use crate::services::pipeline_service::{PipelineConfig, QuizPipeline};
use crate::AppState;

const PREVIEW_ROWS: usize = 5;

fn parse_field<T: std::str::FromStr>(name: &str, raw: &str) -> Result<Option<T>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| Error::BadRequest(format!("Field '{}' must be a non-negative integer", name)))
}

async fn read_upload(mut multipart: Multipart) -> Result<(Bytes, GenerateForm)> {
    let mut file = None;
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "file" => file = Some(field.bytes().await?),
            "target" => form.target = parse_field("target", &field.text().await?)?,
            "comment_limit" => form.comment_limit = parse_field("comment_limit", &field.text().await?)?,
            "scenario_limit" => form.scenario_limit = parse_field("scenario_limit", &field.text().await?)?,
            "ai_advanced_limit" => {
                form.ai_advanced_limit = parse_field("ai_advanced_limit", &field.text().await?)?
            }
            "relationship_limit" => {
                form.relationship_limit = parse_field("relationship_limit", &field.text().await?)?
            }
            "seed" => form.seed = parse_field("seed", &field.text().await?)?,
            "api_key" => {
                let key = field.text().await?.trim().to_string();
                if !key.is_empty() {
                    form.api_key = Some(key);
                }
            }
            _ => {}
        }
    }

    let file = file
        .filter(|f| !f.is_empty())
        .ok_or_else(|| Error::BadRequest("CSV file is required".into()))?;
    Ok((file, form))
}

/// Parse an uploaded CSV and return the first rows.
pub async fn preview_records(multipart: Multipart) -> Result<Json<PreviewResponse>> {
    let (file, _) = read_upload(multipart).await?;
    let records = DataService::load_csv(&file)?;

    Ok(Json(PreviewResponse {
        total_records: records.len(),
        preview: DataService::preview(&records, PREVIEW_ROWS).to_vec(),
    }))
}

/// Run the full generation pipeline over an uploaded CSV.
pub async fn generate_questions(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<GenerateResponse>> {
    let (file, form) = read_upload(multipart).await?;
    form.validate()?;

    let records = DataService::load_csv(&file)?;
    let client = state.completion_client.with_api_key(form.api_key.clone());

    let mut limits = form.limits();
    if !client.has_api_key() {
        tracing::warn!("No LLM API key available, skipping AI-generated questions");
        limits.comment_limit = 0;
        limits.ai_advanced_limit = 0;
    }

    let run_id = uuid::Uuid::new_v4();
    tracing::info!(%run_id, records = records.len(), ?limits, "Starting question generation");

    let ai = AIService::new(client, state.config.llm_model.clone(), state.config.llm_temperature);
    let pipeline = QuizPipeline::new(
        ai,
        PipelineConfig {
            limits,
            reference_year: state.config.reference_year,
            seed: form.seed,
            ..PipelineConfig::default()
        },
    );

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let output = pipeline.run(&records, Some(&tx)).await?;
    drop(tx);

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }

    let shape_count = |shape: AnswerShape| {
        output
            .questions
            .iter()
            .filter(|q| answer_validator::classify(&q.question) == shape)
            .count()
    };

    Ok(Json(GenerateResponse {
        run_id,
        limits,
        who_questions: shape_count(AnswerShape::Who),
        how_many_questions: shape_count(AnswerShape::Quantity),
        by_category: group_by_category(&output.questions),
        summary: output.summary,
        events,
        questions: output.questions,
    }))
}
