//! Request-path services
//!
//! Handlers stay thin: everything between "bytes arrived" and "bytes stored"
//! (and back) lives here.

mod download;
mod upload;

pub use download::{DownloadService, ServedFile};
pub use upload::UploadService;
