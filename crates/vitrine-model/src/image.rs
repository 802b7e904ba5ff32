//! Candidate image uploads
//!
//! An [`ImageFile`] is a locally selected image that has not been
//! persisted on the server yet. It travels through the preview manager
//! (for local validation and preview handles) and the HTTP client (as a
//! multipart upload part).

use bytes::Bytes;

/// A candidate image file selected by the user
///
/// The byte buffer is reference-counted (`Bytes`), so cloning the file
/// for an upload or a preview does not copy the image data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File name as picked locally, e.g. `chair.jpg`
    pub file_name: String,
    /// Declared MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Raw image bytes
    pub bytes: Bytes,
}

impl ImageFile {
    /// Create a candidate image from raw bytes
    #[inline]
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the image in bytes
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}
