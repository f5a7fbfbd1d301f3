use std::sync::Arc;

use crate::analysis_client::AnalysisService;
use crate::config::Config;
use crate::store::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable analysis backend. Default: `HttpAnalysisClient`.
    pub analyzer: Arc<dyn AnalysisService>,
    pub store: AnalysisStore,
}
