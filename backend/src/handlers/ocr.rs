//! HTTP handlers for OCR sheet intake
//!
//! Two entry points feed the same processing path: raw recognized text
//! (the text/CSV upload flow) and a photographed sheet routed through the
//! external recognition engine. Results come back with their validation
//! report and a review rendering; nothing is persisted until the reviewed
//! sheet is posted to `confirm`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use shared::{OcrResult, OcrValidation};

use crate::error::{AppError, AppResult};
use crate::external::OcrEngineClient;
use crate::services::ocr_intake::{ConfirmOutcome, ConfirmSheetInput, OcrIntakeService};
use crate::services::reporting::format_ocr_review;
use crate::AppState;

/// Raw recognized text submitted for processing
#[derive(Debug, Deserialize)]
pub struct ProcessTextInput {
    pub text: String,
}

/// Processed sheet with its quality report and review rendering
#[derive(Debug, Serialize)]
pub struct ProcessSheetResponse {
    pub result: OcrResult,
    pub validation: OcrValidation,
    pub review_text: String,
}

/// Process raw recognized text into a structured, validated result
pub async fn process_sheet_text(
    State(state): State<AppState>,
    Json(input): Json<ProcessTextInput>,
) -> AppResult<Json<ProcessSheetResponse>> {
    let service = OcrIntakeService::new(state.store);
    let processed = service.process_text(&input.text).await;

    Ok(Json(ProcessSheetResponse {
        review_text: format_ocr_review(&processed.result),
        result: processed.result,
        validation: processed.validation,
    }))
}

/// Upload a photographed sheet: recognize it with the external engine,
/// then process the recognized text
pub async fn upload_sheet_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ProcessSheetResponse>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::Validation {
            field: "file".to_string(),
            message: format!("Invalid multipart upload: {}", e),
        }
    })? {
        if matches!(field.name(), Some("file") | Some("image")) {
            let bytes = field.bytes().await.map_err(|e| AppError::Validation {
                field: "file".to_string(),
                message: format!("Failed to read upload: {}", e),
            })?;
            image = Some(bytes.to_vec());
        }
    }

    let image = image.ok_or_else(|| AppError::Validation {
        field: "file".to_string(),
        message: "An image file is required".to_string(),
    })?;

    let client = OcrEngineClient::from_config(&state.config.ocr).ok_or_else(|| {
        AppError::Configuration("OCR engine endpoint is not configured".to_string())
    })?;
    let text = client.recognize(&image).await?;

    let service = OcrIntakeService::new(state.store);
    let processed = service.process_text(&text).await;

    Ok(Json(ProcessSheetResponse {
        review_text: format_ocr_review(&processed.result),
        result: processed.result,
        validation: processed.validation,
    }))
}

/// Persist a human-reviewed sheet
pub async fn confirm_sheet(
    State(state): State<AppState>,
    Json(input): Json<ConfirmSheetInput>,
) -> AppResult<Json<ConfirmOutcome>> {
    let service = OcrIntakeService::new(state.store);
    let outcome = service.confirm(input).await?;
    Ok(Json(outcome))
}
