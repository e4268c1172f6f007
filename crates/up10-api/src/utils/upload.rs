//! Multipart extraction for the upload handlers

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::Bytes;
use up10_core::constants::UPLOAD_FIELD;

/// The `file` part of an upload form.
#[derive(Debug)]
pub struct ReceivedFile {
    /// Client-supplied filename, empty when none was sent.
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    #[error("upload exceeds {max_bytes} bytes")]
    TooLarge { max_bytes: usize },

    #[error("failed to read multipart body: {0}")]
    Unreadable(String),
}

fn map_multipart_error(err: MultipartError, max_bytes: usize) -> FieldError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        FieldError::TooLarge { max_bytes }
    } else {
        FieldError::Unreadable(err.body_text())
    }
}

/// Read the first field named `file`.
///
/// Other fields are skipped. `Ok(None)` means the form had no such field.
pub async fn extract_file_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<Option<ReceivedFile>, FieldError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, max_bytes))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| map_multipart_error(e, max_bytes))?;

        if data.len() > max_bytes {
            return Err(FieldError::TooLarge { max_bytes });
        }

        return Ok(Some(ReceivedFile { file_name, data }));
    }

    Ok(None)
}
