pub mod api;
pub mod health;
pub mod pages;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_landing))
        .route(
            "/analyze",
            get(pages::handle_upload_form).post(pages::handle_upload),
        )
        .route("/analyze/:id", get(pages::handle_results))
        // JSON API
        .route("/api/v1/analyses/:id", get(api::handle_get_analysis))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
