use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::ParseOutcome;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct ParseTextRequest {
    pub text: String,
}

fn respond(outcome: ParseOutcome) -> (StatusCode, Json<ParseOutcome>) {
    let status = if outcome.ok {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(outcome))
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_text(
    State(state): State<AppState>,
    Json(req): Json<ParseTextRequest>,
) -> (StatusCode, Json<ParseOutcome>) {
    respond(state.parser.parse_text(&req.text).await)
}

/// POST /api/v1/resumes/upload
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ParseOutcome>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(sanitize_file_name)
            .unwrap_or_else(|| "upload".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        // The temp file keeps the upload's extension so format detection still works.
        let suffix = Path::new(&file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let mut tmp = tempfile::Builder::new()
            .prefix("resume-upload-")
            .suffix(&suffix)
            .tempfile()
            .context("Failed to create temp file for upload")?;
        tmp.write_all(&bytes)
            .context("Failed to write upload to temp file")?;

        let outcome = state
            .parser
            .parse_file_as(tmp.path(), Some(PathBuf::from(file_name)))
            .await;
        return Ok(respond(outcome));
    }

    Err(AppError::Validation(format!(
        "Multipart field '{FILE_FIELD}' is required"
    )))
}

/// Keeps only the final path component of a client-supplied name.
fn sanitize_file_name(name: &str) -> String {
    Path::new(name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "upload".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::parsing::ResumeParser;
    use crate::routes::build_router;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use std::sync::Arc;
    use tower::ServiceExt;

    const BOUNDARY: &str = "XBOUNDARYX";

    fn test_state() -> AppState {
        AppState {
            parser: Arc::new(ResumeParser::new()),
            config: Config::default(),
        }
    }

    fn multipart_body(field: &str, file_name: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {contents}\r\n\
             --{BOUNDARY}--\r\n"
        )
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = build_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn upload_request(body: String) -> Request<Body> {
        Request::post("/api/v1/resumes/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[test]
    fn test_sanitize_file_name_strips_directories() {
        assert_eq!(sanitize_file_name("../../etc/cv.txt"), "cv.txt");
        assert_eq!(sanitize_file_name("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_file_name(".."), "upload");
    }

    #[tokio::test]
    async fn test_parse_text_endpoint() {
        let request = Request::post("/api/v1/resumes/parse")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "Jane Doe\nSKILLS\nRust, Docker"}"#))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["document"]["contact"]["name"], "Jane Doe");
        assert_eq!(body["document"]["sections"]["skills"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_parse_text_endpoint_rejects_blank_text() {
        let request = Request::post("/api/v1/resumes/parse")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "   "}"#))
            .unwrap();

        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["ok"], false);
        assert!(body["document"].is_null());
    }

    #[tokio::test]
    async fn test_upload_txt_file() {
        let body = multipart_body("file", "jane.txt", "Jane Doe\nEDUCATION\nBSc Physics");
        let (status, body) = send(upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["document"]["source_path"], "jane.txt");
        assert_eq!(body["document"]["sections"]["education"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_unsupported_format() {
        let body = multipart_body("file", "jane.rtf", "Jane Doe");
        let (status, body) = send(upload_request(body)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0], "Unsupported file format: .rtf");
    }

    #[tokio::test]
    async fn test_upload_without_file_field() {
        let body = multipart_body("attachment", "jane.txt", "Jane Doe");
        let (status, body) = send(upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
