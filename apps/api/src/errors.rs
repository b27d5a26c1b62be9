use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::correction::CorrectionError;
use crate::extract::ExtractError;

/// Everything that can go wrong while turning input into a `ParsedDocument`.
/// Folded into `ParseOutcome` at the public entry points, never propagated.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("No text content provided")]
    EmptyInput,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No text content found in file")]
    EmptyContent,

    #[error("Error extracting text: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Section correction failed: {0}")]
    Correction(#[from] CorrectionError),

    #[error("Error parsing text: {0}")]
    Internal(String),
}

/// HTTP-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
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
