pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::resume::handlers;
use crate::state::AppState;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume builder API
        .route(
            "/api/resume/fetch-profile",
            post(handlers::handle_fetch_profile),
        )
        .route("/api/resume/save-draft", post(handlers::handle_save_draft))
        .route("/api/resume/generate", post(handlers::handle_generate))
        .route("/api/resume/grade", post(handlers::handle_grade))
        .route(
            "/api/resume/apply-suggestions",
            post(handlers::handle_apply_suggestions),
        )
        .route("/api/resume/normalize", post(handlers::handle_normalize))
        .route("/api/resume/render", post(handlers::handle_render))
        // PDF export
        .route("/api/resume/download/:id", get(not_implemented))
        .with_state(state)
}
