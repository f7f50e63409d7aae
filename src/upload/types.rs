use crate::ocr::EncodedImage;
use axum::body::Bytes;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::{ffi::OsStr, path::Path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(OsStr::to_str)
            .and_then(Self::from_extension)
    }

    /// Parses a declared `Content-Type`, ignoring parameters and case.
    pub fn from_mime(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// An accepted upload, held in memory for the lifetime of one request.
#[derive(Debug)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub format: ImageFormat,
    pub bytes: Bytes,
}

impl UploadedImage {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Consumes the upload. The MIME type sent downstream follows the file
    /// extension, not the declared content type.
    pub fn encode(self) -> EncodedImage {
        EncodedImage::new(STANDARD.encode(&self.bytes), self.format.mime_type())
    }
}
