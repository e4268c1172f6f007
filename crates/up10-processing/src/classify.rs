//! Content classification from raw bytes.
//!
//! Binary formats are recognised by their magic numbers through `infer`.
//! Text is sniffed here, since `infer` only knows a handful of text formats
//! and the download path needs to know exactly which ones a browser would
//! execute. Nothing in this module looks at filenames or client-declared
//! types.

use infer::MatcherType;

/// How much of the upload is inspected to decide whether it is text.
const SNIFF_LEN: usize = 8192;
/// How much of a text upload is inspected for markup and shebangs.
const HEAD_LEN: usize = 512;
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

const PLAIN_TEXT_UTF8: &str = "text/plain; charset=utf-8";

/// Types a browser would render or execute; served as plain text instead.
const FORCED_PLAIN_TEXT: &[&str] = &[
    "text/html",
    "application/xhtml+xml",
    "text/xml",
    "application/xml",
    "text/javascript",
    "application/javascript",
    "application/x-javascript",
    "application/wasm",
    "text/x-python",
    "application/x-python",
    "application/x-php",
];

/// Tags that mark a document as HTML when they open it.
const HTML_TAGS: &[&[u8]] = &[
    b"<!doctype html",
    b"<html",
    b"<head",
    b"<script",
    b"<iframe",
    b"<h1",
    b"<div",
    b"<font",
    b"<table",
    b"<a",
    b"<style",
    b"<title",
    b"<b",
    b"<body",
    b"<br",
    b"<p",
];

/// Detected MIME type plus canonical extension. An empty extension means the
/// content was not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    mime_type: &'static str,
    extension: &'static str,
}

impl Classification {
    pub const UNKNOWN: Self = Self::new("application/octet-stream", "");
    pub const TEXT: Self = Self::new("text/plain", "txt");
    pub const HTML: Self = Self::new("text/html", "html");
    pub const XML: Self = Self::new("text/xml", "xml");
    pub const SVG: Self = Self::new("image/svg+xml", "svg");
    pub const JSON: Self = Self::new("application/json", "json");
    pub const PHP: Self = Self::new("application/x-php", "php");
    pub const PYTHON: Self = Self::new("text/x-python", "py");
    pub const JAVASCRIPT: Self = Self::new("text/javascript", "js");
    pub const SHELL: Self = Self::new("text/x-shellscript", "sh");
    pub const PERL: Self = Self::new("text/x-perl", "pl");

    const fn new(mime_type: &'static str, extension: &'static str) -> Self {
        Self {
            mime_type,
            extension,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn extension(&self) -> Option<&'static str> {
        if self.extension.is_empty() {
            None
        } else {
            Some(self.extension)
        }
    }

    pub fn is_known(&self) -> bool {
        !self.extension.is_empty()
    }

    /// Content-Type header value to use when serving these bytes.
    pub fn served_content_type(&self) -> &'static str {
        if self.mime_type == "text/plain" || FORCED_PLAIN_TEXT.contains(&self.mime_type) {
            PLAIN_TEXT_UTF8
        } else {
            self.mime_type
        }
    }
}

/// Classify `data` by its content. Infallible and deterministic.
pub fn classify(data: &[u8]) -> Classification {
    if data.is_empty() {
        return Classification::UNKNOWN;
    }

    if let Some(kind) = infer::get(data) {
        if !matches!(kind.matcher_type(), MatcherType::Text) {
            return Classification::new(kind.mime_type(), kind.extension());
        }
    }

    sniff_text(data).unwrap_or(Classification::UNKNOWN)
}

fn sniff_text(data: &[u8]) -> Option<Classification> {
    let truncated = data.len() > SNIFF_LEN;
    let sample = &data[..data.len().min(SNIFF_LEN)];
    if !looks_like_text(sample, truncated) {
        return None;
    }

    let body = sample.strip_prefix(UTF8_BOM).unwrap_or(sample).trim_ascii_start();
    let head = body[..body.len().min(HEAD_LEN)].to_ascii_lowercase();

    if head.starts_with(b"#!") {
        return Some(classify_shebang(&head));
    }
    if head.starts_with(b"<?php") {
        return Some(Classification::PHP);
    }
    if head.starts_with(b"<?xml") {
        if contains(&head, b"<svg") {
            return Some(Classification::SVG);
        }
        return Some(Classification::XML);
    }
    if head.starts_with(b"<svg") {
        return Some(Classification::SVG);
    }
    if is_html(&head) {
        return Some(Classification::HTML);
    }
    if matches!(head.first(), Some(b'{') | Some(b'[')) {
        let full = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        if serde_json::from_slice::<serde::de::IgnoredAny>(full).is_ok() {
            return Some(Classification::JSON);
        }
    }

    Some(Classification::TEXT)
}

/// Valid UTF-8 without control bytes other than common whitespace and ESC.
fn looks_like_text(sample: &[u8], truncated: bool) -> bool {
    let valid_utf8 = match std::str::from_utf8(sample) {
        Ok(_) => true,
        // A multi-byte character may straddle the end of the sniff window.
        Err(e) => truncated && e.error_len().is_none(),
    };

    valid_utf8
        && sample
            .iter()
            .all(|&b| (b >= 0x20 && b != 0x7f) || matches!(b, b'\t' | b'\n' | b'\r' | 0x0c | 0x1b))
}

fn classify_shebang(head: &[u8]) -> Classification {
    let line = head.split(|&b| b == b'\n').next().unwrap_or(head);

    if contains(line, b"python") {
        Classification::PYTHON
    } else if contains(line, b"node") || contains(line, b"deno") {
        Classification::JAVASCRIPT
    } else if contains(line, b"perl") {
        Classification::PERL
    } else if contains(line, b"sh") {
        Classification::SHELL
    } else {
        Classification::TEXT
    }
}

fn is_html(head: &[u8]) -> bool {
    if head.starts_with(b"<!--") {
        return true;
    }
    HTML_TAGS.iter().any(|tag| {
        head.starts_with(tag)
            && matches!(
                head.get(tag.len()),
                Some(b' ') | Some(b'>') | Some(b'\t') | Some(b'\n') | Some(b'\r')
            )
    })
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_bytes() -> Vec<u8> {
        let mut data = PNG_MAGIC.to_vec();
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0x0D, b'I', b'H', b'D', b'R']);
        data
    }

    #[test]
    fn test_png_magic() {
        let c = classify(&png_bytes());
        assert_eq!(c.mime_type(), "image/png");
        assert_eq!(c.extension(), Some("png"));
        assert_eq!(c.served_content_type(), "image/png");
    }

    #[test]
    fn test_common_binary_formats() {
        assert_eq!(classify(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).extension(), Some("jpg"));
        assert_eq!(classify(b"GIF89a\x01\x00\x01\x00").extension(), Some("gif"));
        assert_eq!(classify(b"%PDF-1.7\n%\xE2\xE3\xCF\xD3").extension(), Some("pdf"));
    }

    #[test]
    fn test_wasm_is_served_as_plain_text() {
        let c = classify(b"\0asm\x01\x00\x00\x00");
        assert_eq!(c.mime_type(), "application/wasm");
        assert_eq!(c.served_content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_empty_and_unrecognised_binary_are_unknown() {
        assert_eq!(classify(b""), Classification::UNKNOWN);
        let c = classify(&[0x00, 0x01, 0x02, 0x03, 0xFE, 0xFF, 0x7F, 0x80]);
        assert!(!c.is_known());
        assert_eq!(c.extension(), None);
        assert_eq!(c.mime_type(), "application/octet-stream");
    }

    #[test]
    fn test_plain_text() {
        let c = classify(b"total 8\ndrwxr-xr-x  2 root root 4096 .\n");
        assert_eq!(c, Classification::TEXT);
        assert_eq!(c.served_content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_bom_is_ignored() {
        assert_eq!(classify(b"\xEF\xBB\xBF<!DOCTYPE html><html></html>"), Classification::HTML);
        assert_eq!(classify(b"\xEF\xBB\xBF{\"a\": 1}"), Classification::JSON);
    }

    #[test]
    fn test_html_detection() {
        assert_eq!(classify(b"<!DOCTYPE html>\n<html><body>hi</body></html>"), Classification::HTML);
        assert_eq!(classify(b"   \n<HTML>"), Classification::HTML);
        assert_eq!(classify(b"<p>hello</p>"), Classification::HTML);
        assert_eq!(classify(b"<script>alert(1)</script>"), Classification::HTML);
        assert_eq!(classify(b"<painting> is not a tag we know"), Classification::TEXT);
        assert_eq!(Classification::HTML.served_content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_xml_and_svg() {
        assert_eq!(
            classify(b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>"),
            Classification::SVG
        );
        assert_eq!(classify(b"<svg viewBox=\"0 0 1 1\"></svg>"), Classification::SVG);
        assert_eq!(classify(b"<?xml version=\"1.0\"?><feed/>"), Classification::XML);
        assert_eq!(Classification::SVG.served_content_type(), "image/svg+xml");
    }

    #[test]
    fn test_scripts() {
        assert_eq!(classify(b"<?php echo 'hi'; ?>"), Classification::PHP);
        assert_eq!(classify(b"#!/usr/bin/env python3\nprint('x')\n"), Classification::PYTHON);
        assert_eq!(classify(b"#!/usr/bin/env node\nconsole.log(1)\n"), Classification::JAVASCRIPT);
        assert_eq!(classify(b"#!/bin/bash\necho hi\n"), Classification::SHELL);
        assert_eq!(classify(b"#!/usr/bin/perl\n"), Classification::PERL);
        assert_eq!(Classification::PYTHON.served_content_type(), "text/plain; charset=utf-8");
    }

    #[test]
    fn test_json_only_when_it_parses() {
        assert_eq!(classify(b"{\"name\": \"up10\", \"ok\": true}"), Classification::JSON);
        assert_eq!(classify(b"[1, 2, 3]"), Classification::JSON);
        assert_eq!(classify(b"{ this is not json"), Classification::TEXT);
    }

    #[test]
    fn test_control_bytes_are_not_text() {
        assert!(!classify(b"hello\x00world").is_known());
    }

    #[test]
    fn test_multibyte_char_straddling_sniff_window() {
        let mut data = vec![b'a'; SNIFF_LEN - 1];
        data.extend_from_slice("é".as_bytes());
        assert_eq!(classify(&data), Classification::TEXT);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let samples: Vec<Vec<u8>> = vec![
            png_bytes(),
            b"plain words".to_vec(),
            b"<html>".to_vec(),
            vec![0x00, 0xFF, 0x13],
            Vec::new(),
        ];
        for sample in samples {
            assert_eq!(classify(&sample), classify(&sample));
        }
    }
}
