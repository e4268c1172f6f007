use up10_core::AppError;

use crate::error::HttpAppError;

pub async fn not_found() -> HttpAppError {
    AppError::NotFound("Not found".to_string()).into()
}
