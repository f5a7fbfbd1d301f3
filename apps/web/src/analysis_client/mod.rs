//! Analysis client — the only place that talks to the resume analysis backend.
//!
//! The backend accepts a PDF as multipart field `file` on `POST /analyze` and
//! answers with the full `AnalysisResult` payload once its AI pass is done.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{multipart, Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::analysis::AnalysisResult;

const ANALYZE_PATH: &str = "/analyze";
const MAX_RETRIES: u32 = 3;
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum AnalysisClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },
}

/// An uploaded resume, already validated as a PDF.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Anything that can turn a resume into an analysis payload.
///
/// Carried in `AppState` as `Arc<dyn AnalysisService>` so route tests can swap
/// in a stub.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, upload: ResumeUpload) -> Result<AnalysisResult, AnalysisClientError>;
}

/// FastAPI-style error body: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

#[derive(Clone)]
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AnalysisClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), ANALYZE_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn form(upload: &ResumeUpload) -> Result<multipart::Form, AnalysisClientError> {
        let part =
            multipart::Part::stream_with_length(upload.bytes.clone(), upload.bytes.len() as u64)
                .file_name(upload.file_name.clone())
                .mime_str(PDF_CONTENT_TYPE)?;
        Ok(multipart::Form::new().part("file", part))
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    /// Posts the resume and decodes the payload.
    /// Retries rate limits, gateway errors and refused connections with
    /// exponential backoff. A 500 or a timeout fails at once.
    async fn analyze(&self, upload: ResumeUpload) -> Result<AnalysisResult, AnalysisClientError> {
        let mut last_error: Option<AnalysisClientError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Analysis attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .multipart(Self::form(&upload)?)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) if e.is_connect() => {
                    warn!("Analysis backend unreachable: {e}");
                    last_error = Some(AnalysisClientError::Http(e));
                    continue;
                }
                Err(e) => return Err(AnalysisClientError::Http(e)),
            };

            let status = response.status();
            let body = response.text().await?;

            if is_retryable(status) {
                warn!("Analysis backend returned {}: {}", status, body);
                last_error = Some(AnalysisClientError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
                continue;
            }

            if !status.is_success() {
                return Err(AnalysisClientError::Api {
                    status: status.as_u16(),
                    message: error_message(&body),
                });
            }

            debug!(
                "Analysis backend answered for {} ({} bytes)",
                upload.file_name,
                body.len()
            );
            return Ok(serde_json::from_str(&body)?);
        }

        Err(last_error.unwrap_or(AnalysisClientError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

/// Statuses worth another attempt. A plain 500 from the backend is a
/// deterministic failure such as unreadable PDF text.
fn is_retryable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

/// Pulls `detail` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .map(|e| e.detail)
        .unwrap_or_else(|_| body.trim().to_string())
}
