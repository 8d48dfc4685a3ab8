use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::workflow::WorkflowError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Workflow error: {0}")]
    Workflow(#[from] WorkflowError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::Extraction(e) => {
                tracing::warn!("Extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_ERROR",
                    format!("Could not extract text from the CV: {e}"),
                )
            }
            AppError::Workflow(e) => {
                tracing::error!("Workflow error at {} stage: {e}", e.stage());
                match e {
                    WorkflowError::Evaluation { dimension, .. } => (
                        StatusCode::BAD_GATEWAY,
                        "EVALUATION_ERROR",
                        format!("The {dimension} evaluation could not be completed"),
                    ),
                    WorkflowError::Summary(_) => (
                        StatusCode::BAD_GATEWAY,
                        "SUMMARY_ERROR",
                        "The improvement summary could not be generated".to_string(),
                    ),
                    WorkflowError::DuplicateResult(_) | WorkflowError::IncompleteJoin { .. } => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "WORKFLOW_ERROR",
                        "The evaluation results could not be combined".to_string(),
                    ),
                }
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
