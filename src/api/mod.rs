//! REST API server for Recap.
//!
//! Provides HTTP endpoints for:
//! - Health checks
//! - Transcript summarization
//! - Emailing summaries
//! - Transcript file upload

pub mod error;
pub mod routes;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::summarizer::Summarizer;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub summarizer: Arc<Summarizer>,
    pub mailer: Arc<Mailer>,
    pub max_upload_bytes: usize,
}

pub struct ApiServer {
    host: String,
    port: u16,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: &ServerConfig, state: AppState) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            state,
        }
    }

    /// Build the full application router.
    pub fn router(state: AppState) -> Router {
        let api = routes::health::router()
            .merge(routes::summarize::router(state.clone()))
            .merge(routes::email::router(state.clone()))
            .merge(routes::upload::router(state));

        Router::new()
            .route("/", get(routes::health::welcome))
            .nest("/api", api)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .layer(CatchPanicLayer::custom(error::handle_panic)),
            )
    }

    pub async fn start(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = Self::router(self.state);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        info!("API server listening on http://{}", addr);
        info!("Endpoints:");
        info!("  GET  /                       - Welcome text");
        info!("  GET  /api/health             - Health check");
        info!("  POST /api/summarize          - Summarize a transcript");
        info!("  POST /api/send-email         - Email a summary");
        info!("  POST /api/upload-transcript  - Upload a transcript file");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("API server failed")?;

        info!("API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
