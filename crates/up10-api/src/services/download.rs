use bytes::Bytes;
use std::sync::Arc;
use up10_processing::classify;
use up10_storage::keys::validate_key;
use up10_storage::Storage;

use crate::error::HttpAppError;

const DEFAULT_DISPOSITION: &str = "inline";

/// A stored file ready to be written to the response.
#[derive(Debug, Clone)]
pub struct ServedFile {
    pub data: Bytes,
    pub content_type: &'static str,
    pub content_disposition: String,
}

#[derive(Clone)]
pub struct DownloadService {
    storage: Arc<dyn Storage>,
}

impl DownloadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Fetch `key` and decide how to serve it.
    ///
    /// The served type comes from the bytes, not from whatever the store
    /// recorded, so types a browser would execute are always downgraded.
    pub async fn fetch(&self, key: &str) -> Result<ServedFile, HttpAppError> {
        validate_key(key)?;

        let object = self.storage.get(key).await?;
        let content_type = classify(&object.data).served_content_type();

        Ok(ServedFile {
            data: object.data,
            content_type,
            content_disposition: object
                .content_disposition
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| DEFAULT_DISPOSITION.to_string()),
        })
    }
}
