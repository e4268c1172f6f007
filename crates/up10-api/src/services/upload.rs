use bytes::Bytes;
use std::sync::Arc;
use up10_core::UploadedFile;
use up10_processing::{classify, name_extension, IdentifierGenerator, NamingDecision, UploadPolicy};
use up10_storage::Storage;

use crate::error::HttpAppError;

/// Upload pipeline: identify, classify, name, gate, store.
#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn Storage>,
    policy: UploadPolicy,
    identifiers: IdentifierGenerator,
}

impl UploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        policy: UploadPolicy,
        identifiers: IdentifierGenerator,
    ) -> Self {
        Self {
            storage,
            policy,
            identifiers,
        }
    }

    /// Store one upload and return what was written.
    ///
    /// A denied extension, detected or taken from the client filename,
    /// returns before the store is touched. The store is
    /// written exactly once otherwise.
    pub async fn store(
        &self,
        original_name: &str,
        content: Bytes,
    ) -> Result<UploadedFile, HttpAppError> {
        let identifier = self.identifiers.generate();
        let classification = classify(&content);
        let naming = NamingDecision::new(&identifier, &classification, original_name);

        // The client's own extension is gated too, whatever the bytes say.
        let checked = self.policy.check(&naming.extension).and_then(|()| {
            name_extension(original_name).map_or(Ok(()), |ext| self.policy.check(&ext))
        });
        if let Err(err) = checked {
            tracing::warn!(
                extension = %naming.extension,
                detected_type = %classification.mime_type(),
                size_bytes = content.len(),
                "Upload rejected by extension policy"
            );
            return Err(err.into());
        }

        let file = UploadedFile {
            identifier,
            original_name: original_name.to_string(),
            extension: naming.extension,
            content,
        };

        self.storage
            .put(
                &naming.storage_key,
                file.content.clone(),
                classification.mime_type(),
                &naming.content_disposition,
            )
            .await?;

        tracing::info!(
            key = %naming.storage_key,
            detected_type = %classification.mime_type(),
            size_bytes = file.size(),
            "Upload stored"
        );

        Ok(file)
    }
}
