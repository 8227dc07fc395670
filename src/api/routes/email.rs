//! Email dispatch endpoint.

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Request body for POST /api/send-email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Blank entries are ignored; at least one address must remain.
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
    /// Falls back to "Meeting Summary".
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Create the email router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/send-email", post(send_email))
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .with_state(state)
}

/// POST /api/send-email - Email a summary to all recipients in one message.
async fn send_email(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload?;

    state
        .mailer
        .send_summary(
            request.recipients.as_deref().unwrap_or_default(),
            request.subject.as_deref(),
            request.summary.as_deref(),
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(json!({ "message": "Email sent successfully" })))
}
