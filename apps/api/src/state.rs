use std::sync::Arc;

use crate::resume::pipeline::ResumePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Immutable after startup; shared by every request.
    pub pipeline: Arc<ResumePipeline>,
}

impl AppState {
    pub fn new(pipeline: ResumePipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
