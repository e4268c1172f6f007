//! Storage setup and initialization

use anyhow::Result;
use std::sync::Arc;
use up10_core::Config;
use up10_storage::{create_storage, Storage};

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage backend...");
    let storage = create_storage(config).await?;
    tracing::info!(
        backend = %storage.backend_type(),
        bucket = config.bucket().unwrap_or("-"),
        prefix = config.storage_prefix().unwrap_or("-"),
        "Storage backend initialized successfully"
    );
    Ok(storage)
}
