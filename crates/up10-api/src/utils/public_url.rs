//! Base URL for the links handed back to clients

use axum::http::{header, HeaderMap};
use up10_core::{AppError, Config};

/// `PUBLIC_BASE_URL` when configured, otherwise `https://{Host}`.
pub fn public_base_url(config: &Config, headers: &HeaderMap) -> Result<String, AppError> {
    if let Some(base) = config.public_base_url() {
        return Ok(base.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|h| is_valid_host(h))
        .ok_or_else(|| AppError::BadRequest("Missing or invalid Host header".to_string()))?;

    Ok(format!("https://{}", host))
}

fn is_valid_host(host: &str) -> bool {
    !host.is_empty()
        && host.len() <= 255
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b':' | b'[' | b']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use up10_core::{BaseConfig, StorageConfig, UploadConfig};

    fn config(public_base_url: Option<&str>) -> Config {
        let base = BaseConfig {
            public_base_url: public_base_url.map(String::from),
            ..BaseConfig::default()
        };
        Config::new(base, StorageConfig::memory(), UploadConfig::default())
    }

    fn host(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_uses_host_header() {
        let url = public_base_url(&config(None), &host("up10.me")).unwrap();
        assert_eq!(url, "https://up10.me");
    }

    #[test]
    fn test_configured_base_wins() {
        let url =
            public_base_url(&config(Some("http://localhost:8080/")), &host("up10.me")).unwrap();
        assert_eq!(url, "http://localhost:8080");
    }

    #[test]
    fn test_missing_or_bad_host_is_rejected() {
        assert!(public_base_url(&config(None), &HeaderMap::new()).is_err());
        assert!(public_base_url(&config(None), &host("evil.com/path?x")).is_err());
    }
}
