use askama::Template;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use std::sync::Arc;
use up10_core::constants::RETENTION_NOTICE;
use up10_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::public_url::public_base_url;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    base_url: &'a str,
    retention: &'a str,
    max_upload_mb: usize,
}

/// Usage page with the curl one-liners and a browser form.
pub async fn index(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, HttpAppError> {
    let base_url = public_base_url(&state.config, &headers)?;

    let page = IndexTemplate {
        base_url: &base_url,
        retention: RETENTION_NOTICE,
        max_upload_mb: state.config.max_upload_bytes() / 1024 / 1024,
    }
    .render()
    .map_err(|e| AppError::Internal(format!("Failed to render index page: {}", e)))?;

    Ok(Html(page))
}
