//! Service-wide constants.

/// Route prefix under which stored objects are served.
pub const DOWNLOAD_PREFIX: &str = "/b/";

/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

/// Extension used when neither the content nor the filename yields one.
pub const SENTINEL_EXTENSION: &str = "unknown";

/// Longest filename-derived extension we keep.
pub const MAX_NAME_EXTENSION_LEN: usize = 16;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_IDENTIFIER_LENGTH: usize = 10;
pub const MIN_IDENTIFIER_LENGTH: usize = 6;
pub const MAX_IDENTIFIER_LENGTH: usize = 64;
pub const DEFAULT_MAX_UPLOAD_MB: usize = 100;
pub const DEFAULT_HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Advertised on the index page. Not enforced by the service.
pub const RETENTION_NOTICE: &str = "1 day";
