//! Summarization endpoint.

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

/// Request body for POST /api/summarize.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: Option<String>,
    /// Replaces the default summarization instruction when non-blank.
    #[serde(default)]
    pub custom_prompt: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

/// Create the summarize router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/summarize", post(summarize))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
}

/// POST /api/summarize - Summarize a transcript with the completion provider.
async fn summarize(
    State(state): State<AppState>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> ApiResult<Json<SummarizeResponse>> {
    let Json(request) = payload?;

    let summary = state
        .summarizer
        .summarize(
            request.transcript.as_deref(),
            request.custom_prompt.as_deref(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(SummarizeResponse { summary }))
}
