use std::{fmt, fs, path::Path};

use super::ErrorKind;

/// Largest accepted image, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub const ACCEPTED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// An image picked for preview. Lives in memory only and is never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    size: usize,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            size: bytes.len(),
            bytes,
        }
    }

    /// Reads an image from disk, deriving its MIME type from the extension.
    ///
    /// Type and size come from the path and file metadata. A file that would
    /// be rejected is never read; its upload carries the reported size and
    /// no bytes, so [`validate_image`] still names the reason.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();
        let mime_type = mime_for_path(path);
        let len = usize::try_from(fs::metadata(path)?.len()).unwrap_or(usize::MAX);
        if !ACCEPTED_IMAGE_TYPES.contains(&mime_type) || len > MAX_IMAGE_BYTES {
            return Ok(Self {
                file_name,
                mime_type: mime_type.to_string(),
                bytes: Vec::new(),
                size: len,
            });
        }
        Ok(Self::new(file_name, mime_type, fs::read(path)?))
    }

    /// Size of the file in bytes, which may exceed `bytes.len()` for a file
    /// skipped by [`ImageUpload::from_path`].
    pub fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}

pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Type is checked before size.
pub fn validate_image(upload: &ImageUpload) -> Result<(), ErrorKind> {
    if !ACCEPTED_IMAGE_TYPES.contains(&upload.mime_type.as_str()) {
        return Err(ErrorKind::UnsupportedType);
    }
    if upload.size() > MAX_IMAGE_BYTES {
        return Err(ErrorKind::TooLarge);
    }
    Ok(())
}
