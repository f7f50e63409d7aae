mod types;

pub use types::*;

use crate::{Error, Result, config::UploadConfig};
use axum::{
    body::Bytes,
    extract::multipart::{Field, Multipart, MultipartError},
    http::StatusCode,
};
use std::{ffi::OsStr, path::Path};
use tracing::{debug, warn};

/// Reads the single image part out of a multipart body.
///
/// Text fields are skipped. Any file part other than one `field_name` file
/// is rejected, and the type check runs before the part body is read.
pub async fn read_image(mut multipart: Multipart, config: &UploadConfig) -> Result<UploadedImage> {
    let mut image: Option<UploadedImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, config.max_file_size))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!("Ignoring non-file field '{}'", name);
            continue;
        };

        if name != config.field_name || image.is_some() {
            return Err(Error::UnexpectedField { name });
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let format = check_file_type(&file_name, &content_type, config)?;
        let bytes = read_limited(field, config.max_file_size).await?;

        image = Some(UploadedImage {
            file_name,
            content_type,
            format,
            bytes,
        });
    }

    image.ok_or(Error::NoImageUploaded)
}

/// Both the declared MIME type and the file extension must be PNG or JPEG.
/// With `require_matching_types` they must also agree with each other.
pub fn check_file_type(
    file_name: &str,
    content_type: &str,
    config: &UploadConfig,
) -> Result<ImageFormat> {
    let (Some(by_extension), Some(by_mime)) = (
        ImageFormat::from_path(file_name),
        ImageFormat::from_mime(content_type),
    ) else {
        return Err(Error::UnsupportedFileType);
    };

    if config.require_matching_types && by_extension != by_mime {
        let extension = Path::new(file_name)
            .extension()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_ascii_lowercase();
        return Err(Error::MismatchedFileType {
            content_type: content_type.to_string(),
            extension,
        });
    }

    Ok(by_extension)
}

async fn read_limited(mut field: Field<'_>, limit: usize) -> Result<Bytes> {
    let mut buf = Vec::new();
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(Error::FileTooLarge { limit });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(Bytes::from(buf))
}

fn multipart_error(err: MultipartError, limit: usize) -> Error {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return Error::FileTooLarge { limit };
    }
    warn!("Failed to parse multipart body: {}", err.body_text());
    Error::multipart(err.body_text())
}
