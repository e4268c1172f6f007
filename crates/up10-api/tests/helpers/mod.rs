//! Shared test harness: the real router over an in-memory bucket.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use up10_api::setup::routes::setup_routes;
use up10_api::AppState;
use up10_core::{BaseConfig, Config, StorageBackend, StorageConfig, UploadConfig};
use up10_storage::{BucketStorage, Storage, StorageError, StorageResult, StoredObject};

pub mod fixtures;

pub const BASE_URL: &str = "https://up10.me";

/// One `put` call as seen by the store.
#[derive(Debug, Clone)]
pub struct RecordedPut {
    pub key: String,
    pub content_type: String,
    pub content_disposition: String,
    pub size: usize,
}

/// Wraps an in-memory bucket, records writes and can be told to fail.
pub struct RecordingStorage {
    inner: BucketStorage,
    puts: Mutex<Vec<RecordedPut>>,
    fail_puts: AtomicBool,
    fail_gets: AtomicBool,
}

impl RecordingStorage {
    pub fn new() -> Self {
        Self {
            inner: BucketStorage::memory(),
            puts: Mutex::new(Vec::new()),
            fail_puts: AtomicBool::new(false),
            fail_gets: AtomicBool::new(false),
        }
    }

    pub fn puts(&self) -> Vec<RecordedPut> {
        self.puts.lock().unwrap().clone()
    }

    pub fn fail_puts(&self) {
        self.fail_puts.store(true, Ordering::SeqCst);
    }

    pub fn fail_gets(&self) {
        self.fail_gets.store(true, Ordering::SeqCst);
    }

    /// Write straight to the underlying bucket, bypassing the recorder.
    pub async fn seed(&self, key: &str, data: &[u8], content_disposition: &str) {
        self.inner
            .put(
                key,
                Bytes::copy_from_slice(data),
                "application/octet-stream",
                content_disposition,
            )
            .await
            .unwrap();
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: &str,
        content_disposition: &str,
    ) -> StorageResult<()> {
        self.puts.lock().unwrap().push(RecordedPut {
            key: key.to_string(),
            content_type: content_type.to_string(),
            content_disposition: content_disposition.to_string(),
            size: data.len(),
        });
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::UploadFailed(
                "connection reset by 10.9.8.7:443".to_string(),
            ));
        }
        self.inner
            .put(key, data, content_type, content_disposition)
            .await
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(StorageError::DownloadFailed(
                "connection reset by 10.9.8.7:443".to_string(),
            ));
        }
        self.inner.get(key).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

pub struct TestApp {
    server: TestServer,
    storage: Arc<RecordingStorage>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn storage(&self) -> &RecordingStorage {
        &self.storage
    }
}

/// Create test configuration
pub fn create_test_config() -> Config {
    let base = BaseConfig {
        public_base_url: Some(BASE_URL.to_string()),
        ..BaseConfig::default()
    };
    Config::new(base, StorageConfig::memory(), UploadConfig::default())
}

pub fn setup_test_app() -> TestApp {
    setup_test_app_with(create_test_config())
}

pub fn setup_test_app_with(config: Config) -> TestApp {
    let storage = Arc::new(RecordingStorage::new());
    let state = Arc::new(AppState::new(config.clone(), storage.clone()));
    let router = setup_routes(&config, state);

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp { server, storage }
}
