//! Axum route handlers for the CV analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::extraction::extract_document_text;
use crate::state::AppState;
use crate::workflow::FinalReport;

/// Multipart field carrying the CV document.
pub const CV_FIELD: &str = "cv";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub cv_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub characters: usize,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub report: FinalReport,
    pub extracted_characters: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cv/extract
///
/// Returns the text extracted from an uploaded PDF so the user can check it
/// before running an analysis.
pub async fn handle_extract(multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    let document = read_cv_upload(multipart).await?;
    let text = extract_document_text(document).await?;

    Ok(Json(ExtractResponse {
        characters: text.chars().count(),
        text,
    }))
}

/// POST /api/v1/cv/analyze
///
/// Extracts the uploaded PDF and runs the evaluation workflow on its text.
/// Extraction failures are reported before any model call is made.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let document = read_cv_upload(multipart).await?;
    info!("Analyzing uploaded CV ({} bytes)", document.len());

    let text = extract_document_text(document).await?;
    let report = state.workflow.run(&text).await?;

    Ok(Json(AnalyzeResponse {
        report,
        extracted_characters: text.chars().count(),
    }))
}

/// POST /api/v1/cv/analyze-text
///
/// Runs the evaluation workflow on already-extracted CV text.
pub async fn handle_analyze_text(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<FinalReport>, AppError> {
    let report = state.workflow.run(&request.cv_text).await?;
    Ok(Json(report))
}

/// Pulls the `cv` file out of a multipart body, ignoring any other fields.
async fn read_cv_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
    {
        if field.name() == Some(CV_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| upload_error("Could not read uploaded CV", e));
        }
    }

    Err(AppError::Validation(format!(
        "Missing '{CV_FIELD}' file field in upload"
    )))
}

/// Bodies cut off by `DefaultBodyLimit` surface as multipart errors with a 413 status.
fn upload_error(context: &str, e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Uploaded CV exceeds the size limit: {e}"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}
