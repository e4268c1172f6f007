//! Route configuration and setup.
//!
//! Health checks live in [health](health).

mod health;

use crate::handlers::{download, fallback, index, upload};
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use up10_core::Config;
use up10_infra::{request_id_middleware, security_headers_middleware, SecurityHeaders};

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Router<()> {
    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let body_limit = config
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);
    let security_headers = SecurityHeaders::new(config.is_production());

    Router::new()
        .route("/", get(index::index).post(upload::upload))
        .route(
            "/upload",
            get(upload::redirect_home).post(upload::upload),
        )
        .route(
            "/b/{key}",
            get(download::download).post(upload::see_home),
        )
        .route("/b", get(download::missing_key))
        .route("/b/", get(download::missing_key))
        .route("/health", get(health::liveness_check))
        .fallback(fallback::not_found)
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(axum::middleware::from_fn_with_state(
            security_headers,
            security_headers_middleware,
        ))
        .with_state(state)
}
