//! Axum handlers for the HTML pages and the upload flow.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::analysis_client::{
    AnalysisClientError, AnalysisService, ResumeUpload, PDF_CONTENT_TYPE,
};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::pages::{landing::landing_page, results::results_page, upload::upload_page};
use crate::presentation::sections::SectionState;
use crate::state::AppState;
use crate::store::AnalysisStore;

const FILE_FIELD: &str = "file";
const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Comma-separated ids of the expanded sections.
    pub open: Option<String>,
}

/// GET /
pub async fn handle_landing() -> Html<String> {
    Html(landing_page())
}

/// GET /analyze
pub async fn handle_upload_form(State(state): State<AppState>) -> Html<String> {
    Html(upload_page(state.config.max_upload_bytes))
}

/// POST /analyze
///
/// Validates the uploaded PDF, registers a pending analysis and hands the file
/// to the backend in the background. Redirects to the results page, which
/// shows the loading placeholder until the backend answers.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let upload = read_resume(&mut multipart, state.config.max_upload_bytes).await?;

    let id = state.store.insert_pending(&upload.file_name).await;
    info!(
        "Accepted {} ({} bytes) as analysis {id}",
        upload.file_name,
        upload.bytes.len()
    );

    spawn_analysis(state.analyzer.clone(), state.store.clone(), id, upload);

    Ok(Redirect::to(&format!("/analyze/{id}")))
}

/// GET /analyze/:id
pub async fn handle_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ResultsQuery>,
) -> Result<Html<String>, AppError> {
    let record = state
        .store
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    let sections = SectionState::from_query(query.open.as_deref());
    Ok(Html(results_page(
        &record,
        sections,
        state.config.poll_interval_secs,
    )))
}

/// Runs the backend call off the request path and records the outcome.
fn spawn_analysis(
    analyzer: Arc<dyn AnalysisService>,
    store: AnalysisStore,
    id: Uuid,
    upload: ResumeUpload,
) {
    tokio::spawn(async move {
        let outcome = analyzer.analyze(upload).await;
        record_outcome(&store, id, outcome).await;
    });
}

/// Stores the backend outcome. Returns false when the record was evicted
/// while the backend was working.
async fn record_outcome(
    store: &AnalysisStore,
    id: Uuid,
    outcome: Result<AnalysisResult, AnalysisClientError>,
) -> bool {
    let stored = match outcome {
        Ok(result) => {
            info!("Analysis {id} completed");
            store.complete(id, result).await
        }
        Err(e) => {
            error!("Analysis {id} failed: {e}");
            store.fail(id, e.to_string()).await
        }
    };
    if !stored {
        warn!("Analysis {id} was evicted before its outcome arrived; outcome dropped");
    }
    stored
}

async fn read_resume(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("resume.pdf")
            .to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        validate_upload(&file_name, content_type.as_deref(), &bytes, max_bytes)?;
        return Ok(ResumeUpload { file_name, bytes });
    }

    Err(AppError::Validation(format!("Missing multipart field '{FILE_FIELD}'")))
}

/// Accepts only non-empty PDFs within the size limit.
fn validate_upload(
    file_name: &str,
    content_type: Option<&str>,
    bytes: &Bytes,
    max_bytes: usize,
) -> Result<(), AppError> {
    if bytes.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if bytes.len() > max_bytes {
        return Err(AppError::PayloadTooLarge(format!(
            "File is {} bytes; the limit is {max_bytes}",
            bytes.len()
        )));
    }

    let declared_pdf = match content_type {
        Some(PDF_CONTENT_TYPE) => true,
        None | Some("application/octet-stream") => file_name.to_lowercase().ends_with(".pdf"),
        Some(_) => false,
    };
    if !declared_pdf {
        return Err(AppError::UnsupportedMediaType(
            "Only PDF files are supported.".to_string(),
        ));
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::UnsupportedMediaType(
            "File content is not a PDF document".to_string(),
        ));
    }
    Ok(())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::AnalysisStatus;

    fn pdf() -> Bytes {
        Bytes::from_static(b"%PDF-1.7\n%fake")
    }

    #[test]
    fn test_accepts_pdf() {
        assert!(validate_upload("cv.pdf", Some("application/pdf"), &pdf(), 1024).is_ok());
    }

    #[test]
    fn test_accepts_octet_stream_with_pdf_name() {
        assert!(validate_upload("CV.PDF", Some("application/octet-stream"), &pdf(), 1024).is_ok());
        assert!(validate_upload("cv.pdf", None, &pdf(), 1024).is_ok());
    }

    #[test]
    fn test_rejects_other_types() {
        let err =
            validate_upload("cv.docx", Some("application/msword"), &pdf(), 1024).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));

        let err = validate_upload("cv.txt", None, &pdf(), 1024).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    }

    #[test]
    fn test_rejects_non_pdf_content() {
        let bytes = Bytes::from_static(b"hello");
        let err = validate_upload("cv.pdf", Some("application/pdf"), &bytes, 1024).unwrap_err();
        assert!(matches!(err, AppError::UnsupportedMediaType(_)));
    }

    #[tokio::test]
    async fn test_outcome_recorded_on_live_record() {
        let store = AnalysisStore::new(4);
        let id = store.insert_pending("cv.pdf").await;
        let outcome = Err(AnalysisClientError::Api {
            status: 500,
            message: "PDF extraction failed".to_string(),
        });

        assert!(record_outcome(&store, id, outcome).await);
        let record = store.get(id).await.unwrap();
        assert!(matches!(record.status, AnalysisStatus::Failed(ref m) if m.contains("extraction")));
    }

    #[tokio::test]
    async fn test_outcome_for_evicted_record_is_dropped() {
        let store = AnalysisStore::new(1);
        let evicted = store.insert_pending("old.pdf").await;
        let current = store.insert_pending("new.pdf").await;

        assert!(!record_outcome(&store, evicted, Ok(AnalysisResult::default())).await);
        assert!(store.get(evicted).await.is_none());
        assert_eq!(store.get(current).await.unwrap().status, AnalysisStatus::Pending);
    }

    #[test]
    fn test_rejects_empty_and_oversized() {
        let err = validate_upload("cv.pdf", Some("application/pdf"), &Bytes::new(), 1024)
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = validate_upload("cv.pdf", Some("application/pdf"), &pdf(), 4).unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
    }
}
