//! JSON read API over stored analyses.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::presentation::sections::{build_report, Report};
use crate::state::AppState;
use crate::store::{AnalysisRecord, AnalysisStatus};

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub id: Uuid,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
    /// "pending" | "ready" | "failed"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Present once the backend has produced the analysis sections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
}

impl From<&AnalysisRecord> for AnalysisResponse {
    fn from(record: &AnalysisRecord) -> Self {
        let (error, report) = match &record.status {
            AnalysisStatus::Pending => (None, None),
            AnalysisStatus::Failed(message) => (Some(message.clone()), None),
            AnalysisStatus::Ready(result) => (None, build_report(result)),
        };

        Self {
            id: record.id,
            file_name: record.file_name.clone(),
            submitted_at: record.submitted_at,
            status: record.status.as_str(),
            error,
            report,
        }
    }
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let record = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    Ok(Json(AnalysisResponse::from(&record)))
}
