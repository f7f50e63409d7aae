use super::types::{ErrorResponse, OcrResponse};
use crate::{Error, config::UploadConfig, ocr::OcrClient, upload};
use axum::{
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const HEALTH_MESSAGE: &str = "OCR Backend Server is running.";

/// Returned for every failure that is not the client's fault.
pub const OCR_FAILED_MESSAGE: &str = "Failed to perform OCR.";

#[derive(Clone)]
pub struct AppState {
    pub ocr: Arc<OcrClient>,
    pub upload: Arc<UploadConfig>,
}

impl AppState {
    pub fn new(ocr: OcrClient, upload: UploadConfig) -> Self {
        Self {
            ocr: Arc::new(ocr),
            upload: Arc::new(upload),
        }
    }
}

pub async fn health() -> &'static str {
    HEALTH_MESSAGE
}

pub async fn ocr(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<OcrResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request_id = Uuid::new_v4();

    // A body that is not multipart carries no file.
    let multipart = multipart.map_err(|rejection| {
        warn!(%request_id, "Rejected non-multipart upload: {}", rejection);
        error_response(request_id, Error::NoImageUploaded)
    })?;

    let image = upload::read_image(multipart, &state.upload)
        .await
        .map_err(|e| error_response(request_id, e))?;

    info!(
        %request_id,
        file_name = %image.file_name,
        content_type = %image.content_type,
        format = ?image.format,
        size = image.size(),
        "Received OCR request"
    );

    let encoded = image.encode();

    match state.ocr.extract_text(encoded).await {
        Ok(ocr_result) => {
            info!(%request_id, chars = ocr_result.len(), "OCR completed");
            Ok(Json(OcrResponse { ocr_result }))
        }
        Err(e) => Err(error_response(request_id, e)),
    }
}

/// Validation messages go back verbatim; everything else is logged and
/// replaced by [`OCR_FAILED_MESSAGE`].
fn error_response(request_id: Uuid, err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = err.status_code();
    let message = if err.is_validation() {
        warn!(%request_id, "Upload rejected: {:?}", err);
        err.to_string()
    } else {
        error!(%request_id, "Error in OCR API: {}", err);
        OCR_FAILED_MESSAGE.to_string()
    };

    (status, Json(ErrorResponse { error: message }))
}
