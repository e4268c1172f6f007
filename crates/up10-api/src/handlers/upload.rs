use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Redirect, Response};
use std::sync::Arc;
use up10_core::constants::DOWNLOAD_PREFIX;
use up10_core::AppError;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::public_url::public_base_url;
use crate::utils::upload::{extract_file_field, FieldError};

/// `GET /upload` goes back to the usage page.
pub async fn redirect_home() -> Redirect {
    Redirect::temporary("/")
}

/// Anything posted that is not a readable upload goes back to the usage page
/// as a `GET`, so a client following redirects does not post it again.
pub async fn see_home() -> Redirect {
    Redirect::to("/")
}

/// `POST /upload` and `POST /`
///
/// Answers with the public URL of the stored file as a single text line.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, HttpAppError> {
    let base_url = public_base_url(&state.config, &headers)?;

    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Upload without a multipart body");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let received = match extract_file_field(multipart, state.config.max_upload_bytes()).await {
        Ok(Some(received)) => received,
        Ok(None) => {
            tracing::debug!("Upload form has no file field");
            return Ok(Redirect::to("/").into_response());
        }
        Err(FieldError::TooLarge { max_bytes }) => {
            return Err(AppError::PayloadTooLarge(format!(
                "Files larger than {} MB are not accepted",
                max_bytes / 1024 / 1024
            ))
            .into());
        }
        Err(err @ FieldError::Unreadable(_)) => {
            tracing::debug!(error = %err, "Upload body could not be read");
            return Ok(Redirect::to("/").into_response());
        }
    };

    let file = state
        .uploads
        .store(&received.file_name, received.data)
        .await?;

    let url = format!("{}{}{}\n", base_url, DOWNLOAD_PREFIX, file.storage_key());
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], url).into_response())
}
