//! up10 Core Library
//!
//! Configuration, error types, constants and the request-scoped upload model
//! shared by every up10 crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, StorageConfig, UploadConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::UploadedFile;
pub use storage_types::StorageBackend;
