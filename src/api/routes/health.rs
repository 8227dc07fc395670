//! Liveness endpoints. These never touch the completion provider or the
//! mail relay.

use crate::global::WELCOME_TEXT;
use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

/// Create the health router.
pub fn router() -> Router {
    Router::new().route("/health", get(health))
}

/// GET /api/health - Fixed status payload.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Server is running"
    }))
}

/// GET / - Plain-text welcome.
pub async fn welcome() -> &'static str {
    WELCOME_TEXT
}
