//! Upload payloads and form builders.

use axum_test::multipart::{MultipartForm, Part};

/// 1x1 PNG
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
        0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 dimensions
        0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE,
        0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, // IDAT chunk
        0x08, 0xD7, 0x63, 0xF8, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01,
        0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45,
        0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82, // IEND chunk
    ]
}

/// Bytes no magic-number rule and no text rule recognises.
pub fn opaque_bytes() -> Vec<u8> {
    vec![0x00, 0x01, 0x02, 0x03, 0xFE, 0xFF, 0x7F, 0x80, 0x00, 0x11]
}

pub fn file_form(data: Vec<u8>, file_name: &str) -> MultipartForm {
    MultipartForm::new().add_part("file", Part::bytes(data).file_name(file_name.to_string()))
}

/// The key in a returned URL such as `https://up10.me/b/aBcDeFgHiJ.png\n`.
pub fn key_from_url(body: &str) -> String {
    body.trim_end()
        .rsplit_once("/b/")
        .map(|(_, key)| key.to_string())
        .expect("response is not a download URL")
}
