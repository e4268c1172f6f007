#[cfg(feature = "storage-bucket")]
use crate::BucketStorage;
#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use up10_core::Config;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let prefix = config.storage_prefix().map(String::from);

    match config.storage_backend() {
        #[cfg(feature = "storage-bucket")]
        StorageBackend::S3 => {
            let bucket = config
                .bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("BUCKET_NAME not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = BucketStorage::s3(bucket, region, endpoint, prefix)?;
            Ok(Arc::new(storage))
        }

        #[cfg(feature = "storage-bucket")]
        StorageBackend::Gcs => {
            let bucket = config
                .bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("BUCKET_NAME not configured".to_string()))?;

            let storage = BucketStorage::gcs(bucket, prefix)?;
            Ok(Arc::new(storage))
        }

        #[cfg(feature = "storage-bucket")]
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; uploads will not survive a restart");
            Ok(Arc::new(BucketStorage::memory()))
        }

        #[cfg(not(feature = "storage-bucket"))]
        StorageBackend::S3 | StorageBackend::Gcs | StorageBackend::Memory => {
            Err(StorageError::ConfigError(
                "Bucket storage backends not available (storage-bucket feature not enabled)"
                    .to_string(),
            ))
        }

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config.local_storage_path().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;

            let storage = LocalStorage::new(base_path, prefix).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}
