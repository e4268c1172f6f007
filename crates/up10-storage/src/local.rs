use crate::keys::object_path;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const SIDECAR_SUFFIX: &str = ".meta.json";

/// Attributes the filesystem cannot store natively.
#[derive(Debug, Serialize, Deserialize)]
struct Sidecar {
    content_type: String,
    content_disposition: String,
}

/// Local filesystem storage implementation
///
/// Each object is a plain file; its content type and content disposition sit
/// next to it in a `{key}.meta.json` sidecar.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    prefix: Option<String>,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/up10")
    /// * `prefix` - Optional sub-directory for objects
    pub async fn new(base_path: impl Into<PathBuf>, prefix: Option<String>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path, prefix })
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// Rejects keys that could escape the base storage directory, and keys
    /// naming a metadata sidecar.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        if storage_key.is_empty()
            || storage_key.contains("..")
            || storage_key.starts_with('/')
            || storage_key.contains('\\')
        {
            return Err(StorageError::InvalidKey(
                "Storage key contains invalid characters".to_string(),
            ));
        }
        if storage_key.ends_with(SIDECAR_SUFFIX) {
            return Err(StorageError::InvalidKey(
                "Storage key is reserved for metadata".to_string(),
            ));
        }

        let relative = object_path(self.prefix.as_deref(), storage_key);
        Ok(self.base_path.join(relative))
    }

    fn sidecar_path(path: &Path) -> PathBuf {
        let mut name = path.as_os_str().to_os_string();
        name.push(SIDECAR_SUFFIX);
        PathBuf::from(name)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    async fn write_file(path: &Path, data: &[u8]) -> StorageResult<()> {
        let mut file = fs::File::create(path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        content_disposition: &str,
    ) -> StorageResult<()> {
        let path = self.key_to_path(key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        self.ensure_parent_dir(&path).await?;

        let sidecar = serde_json::to_vec(&Sidecar {
            content_type: content_type.to_string(),
            content_disposition: content_disposition.to_string(),
        })
        .map_err(|e| StorageError::UploadFailed(format!("Failed to encode metadata: {}", e)))?;

        // Sidecar first: a reader never sees data without its attributes.
        Self::write_file(&Self::sidecar_path(&path), &sidecar).await?;
        Self::write_file(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        let path = self.key_to_path(key)?;
        let start = std::time::Instant::now();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    path = %path.display(),
                    key = %key,
                    "Local storage download failed"
                );
                return Err(StorageError::DownloadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let sidecar = match fs::read(Self::sidecar_path(&path)).await {
            Ok(raw) => match serde_json::from_slice::<Sidecar>(&raw) {
                Ok(sidecar) => Some(sidecar),
                Err(e) => {
                    tracing::warn!(error = %e, key = %key, "Ignoring unreadable metadata sidecar");
                    None
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StorageError::IoError(e)),
        };

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        let (content_type, content_disposition) = match sidecar {
            Some(s) => (Some(s.content_type), Some(s.content_disposition)),
            None => (None, None),
        };

        Ok(StoredObject {
            data: Bytes::from(data),
            content_type,
            content_disposition,
        })
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
