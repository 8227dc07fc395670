//! Transcript upload endpoint.
//!
//! Accepts a multipart form with a single file part named `transcript`. The
//! file is buffered in memory and never written to disk.

use crate::api::error::{ApiError, ApiResult};
use crate::api::AppState;
use crate::global::MULTIPART_OVERHEAD_BYTES;
use crate::upload;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Name of the multipart field carrying the file.
pub const TRANSCRIPT_FIELD: &str = "transcript";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub transcript: String,
}

/// Create the upload router.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/upload-transcript", post(upload_transcript))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// POST /api/upload-transcript - Return the uploaded file decoded as text.
async fn upload_transcript(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let mut multipart = multipart?;
    let mut file: Option<Bytes> = None;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::from)? {
        let is_transcript_file =
            field.name() == Some(TRANSCRIPT_FIELD) && field.file_name().is_some();

        if !is_transcript_file {
            debug!("Skipping multipart field {:?}", field.name());
            continue;
        }

        file = Some(field.bytes().await.map_err(ApiError::from)?);
        break;
    }

    let transcript = upload::read_transcript(file.as_deref(), state.max_upload_bytes)?;
    info!("Transcript uploaded: {} chars", transcript.len());

    Ok(Json(UploadResponse { transcript }))
}
