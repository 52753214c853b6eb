use axum::Json;

use crate::services::quality_service::{AuditedQuestion, QualityReport, QualityService};

pub async fn check_questions(Json(questions): Json<Vec<AuditedQuestion>>) -> Json<QualityReport> {
    let report = QualityService::check(&questions);
    tracing::info!(
        total = report.total,
        problems = report.problems.len(),
        duplicates = report.duplicates,
        "Quality check complete"
    );
    Json(report)
}
