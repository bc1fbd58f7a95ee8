use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Model failures never reach this type: the pipeline absorbs them into its
/// heuristic fallback. Only rejected input is surfaced to callers.
#[derive(Debug, Error)]
pub enum AppError {
    /// The payload for an operation that requires resume data is not an object.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not implemented")]
    NotImplemented,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::NotImplemented => (
                StatusCode::NOT_IMPLEMENTED,
                "NOT_IMPLEMENTED",
                "This endpoint is not yet implemented".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Why the model path of a pipeline operation could not be used.
///
/// Every variant triggers the heuristic fallback; none is returned to callers.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no model configured")]
    Unconfigured,

    #[error("model call failed: {0}")]
    Unavailable(#[from] LlmError),

    #[error("model call timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("model output is not valid JSON")]
    Unparseable,

    /// JSON parsed but lacks the keys the operation needs.
    #[error("model output is missing expected fields: {0}")]
    Malformed(String),

    #[error("failed to build prompt: {0}")]
    Prompt(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_validation_maps_to_bad_request() {
        let response = AppError::Validation("resumeData is required".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(value["error"]["message"], "resumeData is required");
    }

    #[test]
    fn test_not_implemented_status() {
        assert_eq!(
            AppError::NotImplemented.into_response().status(),
            StatusCode::NOT_IMPLEMENTED
        );
    }
}
