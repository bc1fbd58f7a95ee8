use crate::config::Config;
use crate::resume::pipeline::ResumePipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Model-first pipeline; heuristic-only when no API key is configured.
    pub pipeline: ResumePipeline,
}
