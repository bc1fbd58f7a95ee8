//! Axum route handlers for the Resume API.
//!
//! Handlers normalize untrusted bodies and delegate to the pipeline. The
//! only error a caller can see is a rejected payload (400).

use axum::{extract::State, response::Html, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{GradeReport, ResumeDraft, Suggestion};
use crate::profile::{map_profile_to_draft, sample_resume};
use crate::resume::normalizer::normalize_draft;
use crate::resume::renderer::render_resume;
use crate::resume::suggestions::AppliedSuggestions;
use crate::state::AppState;

/// Body keys that may carry the resume data, in lookup order.
const RESUME_DATA_KEYS: [&str; 2] = ["rawData", "resumeData"];

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftResponse {
    pub success: bool,
    pub draft_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub enhanced_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/resume/fetch-profile
///
/// Body: `{ "profile": {...}, "user": {...} }`. Falls back to the sample
/// resume when no profile is supplied.
pub async fn handle_fetch_profile(Json(body): Json<Value>) -> Json<ResumeDraft> {
    let mapped = body
        .get("profile")
        .and_then(|profile| map_profile_to_draft(profile, body.get("user")));

    match mapped {
        Some(draft) => {
            info!("Mapped stored profile to resume draft: name={}", draft.personal_info.name);
            Json(draft)
        }
        None => {
            info!("No stored profile supplied, serving sample resume");
            Json(sample_resume())
        }
    }
}

/// POST /api/resume/save-draft
///
/// Acknowledges the draft and logs its top-level fields. Nothing is stored.
pub async fn handle_save_draft(Json(body): Json<Value>) -> Json<SaveDraftResponse> {
    let draft_id = Uuid::new_v4();
    let fields: Vec<&str> = body
        .as_object()
        .map(|obj| obj.keys().map(String::as_str).collect())
        .unwrap_or_default();
    info!(%draft_id, ?fields, "Resume draft received");

    Json(SaveDraftResponse {
        success: true,
        draft_id,
        saved_at: Utc::now(),
    })
}

/// POST /api/resume/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GenerateResponse>, AppError> {
    if !body.is_object() {
        return Err(AppError::Validation(
            "Resume data must be provided.".to_string(),
        ));
    }

    let draft = normalize_draft(&body);
    let enhanced_content = state.pipeline.generate(&draft).await;
    Ok(Json(GenerateResponse { enhanced_content }))
}

/// POST /api/resume/grade
///
/// Body: `{ "rawData" | "resumeData": {...}, "enhancedContent"?: "<html>" }`.
pub async fn handle_grade(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<GradeReport>, AppError> {
    let data = resume_data(&body)
        .filter(|v| v.is_object())
        .ok_or_else(|| AppError::Validation("resumeData is required for grading.".to_string()))?;

    let draft = normalize_draft(data);
    let document = body
        .get("enhancedContent")
        .and_then(Value::as_str)
        .filter(|doc| !doc.trim().is_empty());

    Ok(Json(state.pipeline.grade(&draft, document).await))
}

/// POST /api/resume/apply-suggestions
///
/// Body: `{ "rawData" | "resumeData": {...}, "suggestions": [...] }`. Missing
/// data is treated as an empty resume; a missing list as no suggestions.
pub async fn handle_apply_suggestions(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Json<AppliedSuggestions> {
    let draft = resume_data(&body)
        .map(normalize_draft)
        .unwrap_or_default();
    let suggestions = body
        .get("suggestions")
        .and_then(Value::as_array)
        .map(|items| Suggestion::from_values(items))
        .unwrap_or_default();

    Json(state.pipeline.apply_suggestions(&draft, &suggestions).await)
}

/// POST /api/resume/normalize
pub async fn handle_normalize(Json(body): Json<Value>) -> Json<ResumeDraft> {
    Json(normalize_draft(&body))
}

/// POST /api/resume/render
pub async fn handle_render(Json(body): Json<Value>) -> Html<String> {
    Html(render_resume(&normalize_draft(&body)))
}

/// First non-null value under any resume data key.
fn resume_data(body: &Value) -> Option<&Value> {
    RESUME_DATA_KEYS
        .iter()
        .filter_map(|key| body.get(*key))
        .find(|v| !v.is_null())
}
