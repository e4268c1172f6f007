//! Application state shared by every handler.

use std::sync::Arc;
use up10_core::Config;
use up10_processing::{IdentifierGenerator, UploadPolicy};
use up10_storage::Storage;

use crate::services::{DownloadService, UploadService};

pub struct AppState {
    pub config: Config,
    pub uploads: UploadService,
    pub downloads: DownloadService,
}

impl AppState {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Self {
        let policy = UploadPolicy::new(config.extra_denied_extensions());
        let identifiers = IdentifierGenerator::new(config.identifier_length());

        Self {
            uploads: UploadService::new(storage.clone(), policy, identifiers),
            downloads: DownloadService::new(storage),
            config,
        }
    }
}
