//! Storage keys, display names and content-disposition values.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use up10_core::constants::{MAX_NAME_EXTENSION_LEN, SENTINEL_EXTENSION};

use crate::classify::Classification;

/// RFC 5987 `attr-char`: everything outside it is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Everything derived from an upload's name and content before it is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingDecision {
    pub extension: String,
    pub storage_key: String,
    pub display_name: String,
    pub content_disposition: String,
}

impl NamingDecision {
    pub fn new(identifier: &str, classification: &Classification, original_name: &str) -> Self {
        let extension = resolve_extension(classification.extension(), original_name);
        let storage_key = format!("{}.{}", identifier, extension);
        let display_name = display_name(original_name, &storage_key);
        let content_disposition = content_disposition(&display_name);

        Self {
            extension,
            storage_key,
            display_name,
            content_disposition,
        }
    }
}

/// Pick the storage extension.
///
/// The detected extension always wins. Otherwise the text after the last dot
/// of the client filename is used when it is a short alphanumeric run, and
/// the sentinel extension when it is not.
pub fn resolve_extension(classified: Option<&str>, original_name: &str) -> String {
    if let Some(ext) = classified.filter(|e| !e.is_empty()) {
        return ext.to_ascii_lowercase();
    }

    name_extension(original_name).unwrap_or_else(|| SENTINEL_EXTENSION.to_string())
}

/// Lowercased extension of the client filename, when it is a short
/// alphanumeric run after the last dot.
pub fn name_extension(original_name: &str) -> Option<String> {
    let (_, ext) = last_component(original_name).rsplit_once('.')?;
    if ext.is_empty()
        || ext.len() > MAX_NAME_EXTENSION_LEN
        || !ext.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Name shown to whoever downloads the file.
///
/// Directory components and control characters are dropped. An empty name,
/// or `-` (what `curl -F file=@-` sends for stdin), falls back to the key.
pub fn display_name(original_name: &str, storage_key: &str) -> String {
    let name: String = last_component(original_name)
        .chars()
        .filter(|c| !c.is_control())
        .collect();
    let name = name.trim();

    if name.is_empty() || name == "-" {
        storage_key.to_string()
    } else {
        name.to_string()
    }
}

/// `inline` disposition carrying `name`, with an RFC 5987 `filename*` when
/// the name is not plain ASCII.
pub fn content_disposition(name: &str) -> String {
    let fallback: String = name
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if fallback == name {
        format!("inline; filename=\"{}\"", fallback)
    } else {
        format!(
            "inline; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            utf8_percent_encode(name, ATTR_CHAR)
        )
    }
}

fn last_component(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_extension_wins_over_filename() {
        assert_eq!(resolve_extension(Some("png"), "holiday.jpg"), "png");
        assert_eq!(resolve_extension(Some("png"), ""), "png");
    }

    #[test]
    fn test_filename_extension_used_when_content_unknown() {
        assert_eq!(resolve_extension(None, "report.DOCX"), "docx");
        assert_eq!(resolve_extension(None, "archive.tar.zst"), "zst");
        assert_eq!(resolve_extension(None, "C:\\Users\\me\\data.Bin"), "bin");
    }

    #[test]
    fn test_sentinel_when_nothing_usable() {
        assert_eq!(resolve_extension(None, ""), SENTINEL_EXTENSION);
        assert_eq!(resolve_extension(None, "README"), SENTINEL_EXTENSION);
        assert_eq!(resolve_extension(None, "trailing."), SENTINEL_EXTENSION);
        assert_eq!(resolve_extension(None, "weird.ex e"), SENTINEL_EXTENSION);
        assert_eq!(resolve_extension(None, "dir.d/noext"), SENTINEL_EXTENSION);
        assert_eq!(
            resolve_extension(None, &format!("x.{}", "a".repeat(MAX_NAME_EXTENSION_LEN + 1))),
            SENTINEL_EXTENSION
        );
    }

    #[test]
    fn test_name_extension() {
        assert_eq!(name_extension("payload.EXE").as_deref(), Some("exe"));
        assert_eq!(name_extension("dir.d/setup.msi").as_deref(), Some("msi"));
        assert_eq!(name_extension("README"), None);
        assert_eq!(name_extension("trailing."), None);
        assert_eq!(name_extension("-"), None);
    }

    #[test]
    fn test_display_name_falls_back_to_key() {
        assert_eq!(display_name("", "k.txt"), "k.txt");
        assert_eq!(display_name("-", "k.txt"), "k.txt");
        assert_eq!(display_name("  ", "k.txt"), "k.txt");
        assert_eq!(display_name("../../etc/passwd", "k.txt"), "passwd");
        assert_eq!(display_name("notes\r\n.txt", "k.txt"), "notes.txt");
    }

    #[test]
    fn test_ascii_disposition() {
        assert_eq!(content_disposition("cat.png"), "inline; filename=\"cat.png\"");
        assert_eq!(
            content_disposition("say \"hi\".txt"),
            "inline; filename=\"say _hi_.txt\"; filename*=UTF-8''say%20%22hi%22.txt"
        );
    }

    #[test]
    fn test_non_ascii_disposition_has_extended_form() {
        assert_eq!(
            content_disposition("résumé.pdf"),
            "inline; filename=\"r_sum_.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
        );
    }

    #[test]
    fn test_naming_decision() {
        let decision = NamingDecision::new("aBcDeFgHiJ", &Classification::TEXT, "");
        assert_eq!(decision.extension, "txt");
        assert_eq!(decision.storage_key, "aBcDeFgHiJ.txt");
        assert_eq!(decision.display_name, "aBcDeFgHiJ.txt");
        assert_eq!(
            decision.content_disposition,
            "inline; filename=\"aBcDeFgHiJ.txt\""
        );

        let decision = NamingDecision::new("k", &Classification::UNKNOWN, "blob.dat");
        assert_eq!(decision.storage_key, "k.dat");
        assert_eq!(decision.display_name, "blob.dat");
    }
}
