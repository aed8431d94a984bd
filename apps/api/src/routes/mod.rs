pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resume::handlers;
use crate::state::AppState;

/// Multipart framing allowance on top of the upload cap. Files slightly over the
/// cap must still reach the size gate so the client gets a `TOO_LARGE` envelope.
const MULTIPART_HEADROOM_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.pipeline.max_upload_bytes() + MULTIPART_HEADROOM_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/resume/upload", post(handlers::handle_upload))
        .route("/resume/analyze-text", post(handlers::handle_analyze_text))
        .route(
            "/resume/generate-interview-questions",
            post(handlers::handle_generate_interview_questions),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
