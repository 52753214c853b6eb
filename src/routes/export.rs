use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::dto::generation_dto::{ExportFormat, ExportQuery};
use crate::error::Result;
use crate::models::question::Question;
use crate::services::export_service::{ExportService, JSON_FILE_NAME, XLSX_FILE_NAME};

/// Download a question set as JSON, plain-text report or XLSX.
pub async fn export_questions(
    Query(query): Query<ExportQuery>,
    Json(questions): Json<Vec<Question>>,
) -> Result<impl IntoResponse> {
    let (content_type, filename, buffer) = match query.format {
        ExportFormat::Json => (
            "application/json",
            JSON_FILE_NAME,
            ExportService::to_json(&questions)?.into_bytes(),
        ),
        ExportFormat::Txt => (
            "text/plain; charset=utf-8",
            "quiz_questions.txt",
            ExportService::to_text_report(&questions).into_bytes(),
        ),
        ExportFormat::Xlsx => (
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            XLSX_FILE_NAME,
            ExportService::generate_questions_xlsx(&questions)?,
        ),
    };

    tracing::info!(format = ?query.format, count = questions.len(), "Exporting questions");
    let disposition = format!("attachment; filename=\"{}\"", filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        buffer,
    ))
}
