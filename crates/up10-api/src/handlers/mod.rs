pub mod download;
pub mod fallback;
pub mod index;
pub mod upload;
