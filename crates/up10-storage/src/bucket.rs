use crate::keys::object_path;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, AttributeValue, Attributes, GetOptions, ObjectStore, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;

/// Bucket storage backed by any `object_store` implementation
///
/// Content type and content disposition are written as native object
/// attributes, so objects fetched straight from the bucket carry the same
/// headers the service would send.
#[derive(Clone)]
pub struct BucketStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    prefix: Option<String>,
    backend: StorageBackend,
}

impl BucketStorage {
    /// Amazon S3 or an S3-compatible provider
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL (e.g. "http://localhost:9000" for MinIO)
    pub fn s3(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
        prefix: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region)
            .with_bucket_name(bucket.clone());

        if let Some(endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder.with_endpoint(endpoint).with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(Arc::new(store), bucket, prefix, StorageBackend::S3))
    }

    /// Google Cloud Storage
    ///
    /// Credentials come from the environment (`GOOGLE_SERVICE_ACCOUNT`,
    /// `GOOGLE_APPLICATION_CREDENTIALS`, or the metadata server).
    pub fn gcs(bucket: String, prefix: Option<String>) -> StorageResult<Self> {
        let store = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(bucket.clone())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self::with_store(Arc::new(store), bucket, prefix, StorageBackend::Gcs))
    }

    /// Process-local store; objects are lost on restart
    pub fn memory() -> Self {
        Self::with_store(
            Arc::new(InMemory::new()),
            "memory".to_string(),
            None,
            StorageBackend::Memory,
        )
    }

    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: String,
        prefix: Option<String>,
        backend: StorageBackend,
    ) -> Self {
        BucketStorage {
            store,
            bucket,
            prefix,
            backend,
        }
    }

    fn location(&self, key: &str) -> Path {
        Path::from(object_path(self.prefix.as_deref(), key))
    }
}

fn attribute_string(attributes: &Attributes, attribute: &Attribute) -> Option<String> {
    attributes.get(attribute).map(|value| {
        let value: &str = value.as_ref();
        value.to_string()
    })
}

#[async_trait]
impl Storage for BucketStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        content_disposition: &str,
    ) -> StorageResult<()> {
        let location = self.location(key);
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        attributes.insert(
            Attribute::ContentDisposition,
            AttributeValue::from(content_disposition.to_string()),
        );
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Bucket upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bucket upload successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        let location = self.location(key);
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.get_opts(&location, GetOptions::default()).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Bucket download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let content_type = attribute_string(&result.attributes, &Attribute::ContentType);
        let content_disposition =
            attribute_string(&result.attributes, &Attribute::ContentDisposition);

        let data = result.bytes().await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                "Bucket download body read failed"
            );
            StorageError::DownloadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = data.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Bucket download successful"
        );

        Ok(StoredObject {
            data,
            content_type,
            content_disposition,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        self.backend
    }
}
