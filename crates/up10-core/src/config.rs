//! Configuration module
//!
//! Process-wide settings read once at start-up. The resulting `Config` is
//! immutable and shared by reference with the storage factory and the HTTP
//! layer.

use std::env;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_HTTP_CONCURRENCY_LIMIT, DEFAULT_IDENTIFIER_LENGTH, DEFAULT_MAX_UPLOAD_MB,
    DEFAULT_PORT, MAX_IDENTIFIER_LENGTH, MIN_IDENTIFIER_LENGTH,
};
use crate::storage_types::StorageBackend;

/// Settings for the HTTP process itself
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: Option<String>,
    pub http_concurrency_limit: usize,
    /// Overrides the `https://{host}` base used for returned URLs
    pub public_base_url: Option<String>,
}

/// Backing object store selection
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub local_storage_path: Option<String>,
    pub prefix: Option<String>,
}

/// Upload handling
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
    pub identifier_length: usize,
    pub extra_denied_extensions: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub upload: UploadConfig,
}

impl Default for BaseConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            environment: "development".to_string(),
            log_format: None,
            http_concurrency_limit: DEFAULT_HTTP_CONCURRENCY_LIMIT,
            public_base_url: None,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: megabytes(DEFAULT_MAX_UPLOAD_MB),
            identifier_length: DEFAULT_IDENTIFIER_LENGTH,
            extra_denied_extensions: Vec::new(),
        }
    }
}

impl StorageConfig {
    /// In-memory storage; nothing survives a restart.
    pub fn memory() -> Self {
        Self {
            backend: StorageBackend::Memory,
            bucket: None,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: None,
            prefix: None,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// Megabytes to bytes, clamped at `usize::MAX`.
fn megabytes(mb: usize) -> usize {
    mb.saturating_mul(1024 * 1024)
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Split a comma-separated list, lowercasing and dropping leading dots.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn new(base: BaseConfig, storage: StorageConfig, upload: UploadConfig) -> Self {
        Self {
            base,
            storage,
            upload,
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let server_port = match env_non_empty("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => DEFAULT_PORT,
        };

        let base = BaseConfig {
            server_port,
            environment,
            log_format: env_non_empty("LOG_FORMAT").map(|s| s.to_lowercase()),
            http_concurrency_limit: env_or("HTTP_CONCURRENCY_LIMIT", DEFAULT_HTTP_CONCURRENCY_LIMIT)
                .max(1),
            public_base_url: env_non_empty("PUBLIC_BASE_URL"),
        };

        let backend = match env_non_empty("STORAGE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Gcs,
        };

        let storage = StorageConfig {
            backend,
            bucket: env_non_empty("BUCKET_NAME")
                .or_else(|| env_non_empty("GCS_BUCKET"))
                .or_else(|| env_non_empty("S3_BUCKET")),
            s3_region: env_non_empty("S3_REGION").or_else(|| env_non_empty("AWS_REGION")),
            s3_endpoint: env_non_empty("S3_ENDPOINT"),
            local_storage_path: env_non_empty("LOCAL_STORAGE_PATH"),
            prefix: env_non_empty("STORAGE_PREFIX"),
        };

        let upload = UploadConfig {
            max_upload_bytes: megabytes(env_or("MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB)),
            identifier_length: env_or("IDENTIFIER_LENGTH", DEFAULT_IDENTIFIER_LENGTH),
            extra_denied_extensions: env::var("EXTRA_DENIED_EXTENSIONS")
                .map(|raw| parse_extension_list(&raw))
                .unwrap_or_default(),
        };

        let config = Config::new(base, storage, upload);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let id_len = self.upload.identifier_length;
        if !(MIN_IDENTIFIER_LENGTH..=MAX_IDENTIFIER_LENGTH).contains(&id_len) {
            return Err(anyhow::anyhow!(
                "IDENTIFIER_LENGTH must be between {} and {}",
                MIN_IDENTIFIER_LENGTH,
                MAX_IDENTIFIER_LENGTH
            ));
        }

        if self.upload.max_upload_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_MB must be greater than 0"));
        }

        if let Some(url) = &self.base.public_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "PUBLIC_BASE_URL must start with http:// or https://"
                ));
            }
        }

        match self.storage.backend {
            StorageBackend::S3 => {
                if self.storage.bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "BUCKET_NAME must be set when using S3 storage backend"
                    ));
                }
                if self.storage.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Gcs => {
                if self.storage.bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "BUCKET_NAME must be set when using GCS storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.storage.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {}
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// JSON logs in production unless LOG_FORMAT says otherwise
    pub fn json_logs(&self) -> bool {
        match self.base.log_format.as_deref() {
            Some("json") => true,
            Some(_) => false,
            None => self.is_production(),
        }
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.base.environment
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.base.http_concurrency_limit
    }

    pub fn public_base_url(&self) -> Option<&str> {
        self.base.public_base_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage.backend
    }

    pub fn bucket(&self) -> Option<&str> {
        self.storage.bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.storage.s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.storage.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.storage.local_storage_path.as_deref()
    }

    pub fn storage_prefix(&self) -> Option<&str> {
        self.storage.prefix.as_deref()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.upload.max_upload_bytes
    }

    pub fn identifier_length(&self) -> usize {
        self.upload.identifier_length
    }

    pub fn extra_denied_extensions(&self) -> &[String] {
        &self.upload.extra_denied_extensions
    }
}
