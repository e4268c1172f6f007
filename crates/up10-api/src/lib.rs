//! up10 API Library
//!
//! HTTP handlers, services and application setup for the up10 file drop.

mod handlers;
mod services;
mod utils;

pub mod error;
pub mod setup;
pub mod state;

// Re-exports
pub use error::HttpAppError;
pub use services::{DownloadService, ServedFile, UploadService};
pub use state::AppState;
