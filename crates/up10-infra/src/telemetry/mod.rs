//! Tracing initialization
//!
//! Human-readable output for development, one JSON object per line in
//! production. Filtering follows `RUST_LOG`.

mod init_basic;

pub use init_basic::{init_telemetry, shutdown_telemetry, DEFAULT_FILTER};
