//! up10 Storage Library
//!
//! Storage abstraction for uploaded files: the `Storage` trait plus a bucket
//! backend (S3, GCS, in-memory through `object_store`) and a local filesystem
//! backend.
//!
//! # Storage key format
//!
//! A storage key is `{identifier}.{extension}`. Backends may place it under a
//! configured prefix (`{prefix}/{key}`). Keys are validated by the `keys`
//! module before any backend is called.

#[cfg(feature = "storage-bucket")]
pub mod bucket;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod traits;

// Re-export commonly used types
#[cfg(feature = "storage-bucket")]
pub use bucket::BucketStorage;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
pub use up10_core::StorageBackend;
