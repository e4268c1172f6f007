//! Shared key handling for storage backends.
//!
//! Keys look like `{identifier}.{extension}`. They are validated here so that
//! every backend rejects the same malformed input.

use crate::traits::{StorageError, StorageResult};

pub const MAX_KEY_LEN: usize = 128;

/// Validate a storage key taken from a request path.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::InvalidKey(format!(
            "Storage key exceeds {} characters",
            MAX_KEY_LEN
        )));
    }
    if key.starts_with('.') || key.contains("..") {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    if !key
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Object path for `key` under an optional prefix.
pub fn object_path(prefix: Option<&str>, key: &str) -> String {
    match prefix.map(|p| p.trim_matches('/')).filter(|p| !p.is_empty()) {
        Some(prefix) => format!("{}/{}", prefix, key),
        None => key.to_string(),
    }
}
