use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{Html, Json},
};
use serde::{Deserialize, Serialize};

use crate::analyze::analyze_image;
use crate::error::AnalyzeError;
use crate::normalize::Tag;
use crate::page::INDEX_HTML;
use crate::state::AppState;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Form field carrying the file.
pub const IMAGE_FIELD: &str = "image";

pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/jpg", "image/webp"];

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

struct Upload {
    content_type: String,
    bytes: Bytes,
}

/// POST /api/analyze
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AnalyzeError> {
    let multipart = multipart.map_err(|e| {
        tracing::debug!("Request is not a multipart upload: {}", e);
        AnalyzeError::NoFileProvided
    })?;

    let upload = read_upload(multipart).await?;
    let tags = analyze_image(state.vision.as_ref(), &upload.bytes, &upload.content_type).await?;

    Ok(Json(AnalyzeResponse { tags }))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Pulls the first file from the `image` field, rejecting disallowed
/// content types before the body is buffered.
async fn read_upload(mut multipart: Multipart) -> Result<Upload, AnalyzeError> {
    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) || field.file_name().is_none() {
            continue;
        }

        let content_type = field
            .content_type()
            .map(essence)
            .unwrap_or_default();

        if !ALLOWED_MIME_TYPES.contains(&content_type.as_str()) {
            let shown = if content_type.is_empty() {
                "no content type".to_string()
            } else {
                content_type
            };
            return Err(AnalyzeError::DisallowedMimeType(shown));
        }

        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AnalyzeError::FileTooLarge {
                limit: MAX_UPLOAD_BYTES,
            });
        }

        return Ok(Upload {
            content_type,
            bytes,
        });
    }

    Err(AnalyzeError::NoFileProvided)
}

fn upload_error(err: MultipartError) -> AnalyzeError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AnalyzeError::FileTooLarge {
            limit: MAX_UPLOAD_BYTES,
        }
    } else {
        AnalyzeError::InvalidUpload(err.body_text())
    }
}

/// `image/JPEG; charset=binary` -> `image/jpeg`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
