//! HTTP routes

use crate::config::ServerConfig;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use zonescan_core::sanitize_label;
use zonescan_zones::{analyze, AnalysisResult};

/// Label used when the caller does not name the upload
const DEFAULT_FILENAME: &str = "upload.img";

/// Build the application router
pub fn router(config: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/analyze", post(analyze_upload))
        .layer(DefaultBodyLimit::disable())
        // CORS must sit inside the body limit: it needs the inner response body
        // to be axum's `Body`
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
                .layer(cors)
                .layer(tower::limit::ConcurrencyLimitLayer::new(config.max_concurrent)),
        )
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Query parameters for the analyze endpoint
#[derive(Deserialize)]
struct AnalyzeQuery {
    filename: Option<String>,
}

/// POST /api/analyze?filename=<label>
///
/// The body is the raw image prefix. Decoder failures are part of the
/// returned view, so every analysed upload answers 200.
async fn analyze_upload(Query(params): Query<AnalyzeQuery>, body: Bytes) -> Response {
    if body.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Request body must contain disk image data");
    }

    let label = sanitize_label(params.filename.as_deref().unwrap_or(DEFAULT_FILENAME));
    tracing::info!(filename = %label, bytes = body.len(), "analysing upload");

    let analysis = tokio::task::spawn_blocking(move || {
        let report = analyze(&body, &label);
        AnalysisResult::from(&report)
    })
    .await;

    match analysis {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            tracing::error!("Analysis task failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Analysis failed")
        }
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": message
        })),
    )
        .into_response()
}
