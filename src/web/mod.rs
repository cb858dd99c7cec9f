// Web server — Axum JSON API in front of the classifier and the analysis pipeline.
//
// Routes:
//   GET  /health         liveness probe
//   GET  /api/taxonomy   the active topic table
//   POST /api/classify   classify a string or list of phrases
//   POST /upload         multipart image upload → full analysis report

use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::pipeline::AnalysisPipeline;
use crate::storage::BlobStore;
use crate::topics::keyword::KeywordClassifier;

pub mod handlers;

/// Largest accepted upload body.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<KeywordClassifier>,
    pub pipeline: Arc<AnalysisPipeline>,
    pub store: Arc<dyn BlobStore>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(state: AppState, port: u16, bind: &str) -> Result<()> {
    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("Analizador listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/taxonomy", get(handlers::classify::get_taxonomy))
        .route("/api/classify", post(handlers::classify::classify))
        .route("/upload", post(handlers::upload::upload_and_analyze))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check — always returns 200 OK.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({ "status": "ok" })),
    )
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}
