pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::share::handlers as share;
use crate::state::AppState;
use crate::summary::handlers as summary;

/// Largest transcript upload accepted, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Summary API
        .route("/api/v1/summaries", post(summary::handle_summarize))
        .route(
            "/api/v1/summaries/upload",
            post(summary::handle_summarize_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        // Share API
        .route("/api/v1/share", post(share::handle_share))
        .with_state(state)
}
