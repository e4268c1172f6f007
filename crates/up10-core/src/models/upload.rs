use bytes::Bytes;

/// A file received by one upload request.
///
/// Lives only for the duration of the request. `original_name` is kept for
/// the content-disposition value and never feeds type or acceptance decisions.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub identifier: String,
    pub original_name: String,
    pub extension: String,
    pub content: Bytes,
}

impl UploadedFile {
    /// Storage key: `{identifier}.{extension}`.
    ///
    /// Used both for the write and for the URL handed back to the client.
    pub fn storage_key(&self) -> String {
        format!("{}.{}", self.identifier, self.extension)
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}
