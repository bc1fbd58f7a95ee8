use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and pipeline mode.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let (mode, model) = if state.pipeline.has_model() {
        ("model", Some(state.config.resume_model.as_str()))
    } else {
        ("heuristic", None)
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "portal-api",
        "mode": mode,
        "model": model
    }))
}
