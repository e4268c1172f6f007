//! Configuration validation
//!
//! Checks that only make sense for a process about to serve traffic. Value
//! ranges are already enforced by `Config::validate`.

use anyhow::Result;
use up10_core::{Config, StorageBackend};

pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        if config.storage_backend() == StorageBackend::Memory {
            return Err(anyhow::anyhow!(
                "STORAGE_BACKEND=memory is not allowed in production; uploads would vanish on restart"
            ));
        }

        if config.public_base_url().is_none() {
            tracing::warn!(
                "PUBLIC_BASE_URL not set in production - returned URLs will trust the Host header"
            );
        }

        if config
            .public_base_url()
            .is_some_and(|url| url.starts_with("http://"))
        {
            tracing::warn!("PUBLIC_BASE_URL uses plain http in production");
        }
    }

    if config.max_upload_bytes() > 1024 * 1024 * 1024 {
        tracing::warn!(
            max_upload_mb = config.max_upload_bytes() / 1024 / 1024,
            "MAX_UPLOAD_MB is very high - uploads are buffered in memory"
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use up10_core::{BaseConfig, StorageConfig, UploadConfig};

    #[test]
    fn test_memory_backend_rejected_in_production() {
        let base = BaseConfig {
            environment: "production".to_string(),
            ..BaseConfig::default()
        };
        let config = Config::new(base, StorageConfig::memory(), UploadConfig::default());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_memory_backend_allowed_in_development() {
        let config = Config::new(
            BaseConfig::default(),
            StorageConfig::memory(),
            UploadConfig::default(),
        );
        assert!(validate_config(&config).is_ok());
    }
}
