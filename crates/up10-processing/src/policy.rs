//! Extension acceptance policy.

use std::collections::HashSet;
use thiserror::Error;

/// Extensions refused unless nothing else is configured on top.
///
/// Executables and installers, scripts a browser or shell would run, and
/// archives that commonly carry either.
pub const DEFAULT_DENIED_EXTENSIONS: &[&str] = &[
    "exe", "dll", "msi", "com", "scr", "bat", "cmd", "ps1", "vbs", "jar", "apk", "deb", "rpm",
    "dmg", "elf", "mach", "html", "htm", "xhtml", "php", "js", "zip", "rar", "7z",
];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Files of type .{extension} are not accepted")]
    DeniedExtension { extension: String },
}

/// Decides whether a resolved extension may be stored.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    denied: HashSet<String>,
}

impl UploadPolicy {
    /// Default denylist plus `extra` (case-insensitive, leading dots ignored).
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut denied: HashSet<String> = DEFAULT_DENIED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        denied.extend(
            extra
                .into_iter()
                .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty()),
        );

        Self { denied }
    }

    pub fn is_denied(&self, extension: &str) -> bool {
        self.denied.contains(&extension.to_ascii_lowercase())
    }

    pub fn check(&self, extension: &str) -> Result<(), PolicyError> {
        if self.is_denied(extension) {
            tracing::debug!(extension = %extension, "Extension is on the denylist");
            return Err(PolicyError::DeniedExtension {
                extension: extension.to_ascii_lowercase(),
            });
        }
        Ok(())
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(std::iter::empty::<&str>())
    }
}
