//! Route configuration and setup

use crate::api_doc;
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use visio2xml_core::Config;

/// Slack on top of the configured maximum file size for multipart framing.
const UPLOAD_BODY_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;
    let body_limit = config.max_file_size_bytes + UPLOAD_BODY_OVERHEAD_BYTES;

    // Server-level concurrency limit to protect against resource exhaustion
    // under extreme load
    let http_concurrency_limit = std::env::var("HTTP_CONCURRENCY_LIMIT")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10_000)
        .max(1);

    let app = Router::new()
        .route("/api/upload", post(handlers::upload::upload_file))
        .route("/api/files", get(handlers::files::list_files))
        .route("/api/files/{id}", delete(handlers::files::delete_file))
        .route(
            "/api/convert/{id}",
            post(handlers::convert::start_conversion),
        )
        .route(
            "/api/convert/{id}/status",
            get(handlers::convert::conversion_status),
        )
        .route("/api/download/{id}", get(handlers::download::download_file))
        .with_state(state)
        .route("/", get(root))
        .route("/health", get(health_check))
        .route(
            "/api/openapi.json",
            get(|| async { Json(api_doc::get_openapi_spec()) }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(cors);

    Ok(app)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    if config.cors_origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|_| anyhow::anyhow!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Liveness probe: fixed healthy payload.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Visio to XML Converter API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
