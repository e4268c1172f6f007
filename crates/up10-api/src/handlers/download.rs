use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use up10_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;

/// `GET /b/{key}`
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let file = state.downloads.fetch(&key).await?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(file.content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&file.content_disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("inline")),
    );
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("sandbox"),
    );

    Ok((headers, file.data).into_response())
}

/// `/b` and `/b/` without a key segment
pub async fn missing_key() -> HttpAppError {
    AppError::BadRequest("Missing file key".to_string()).into()
}
