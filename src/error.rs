use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::format::FormatError;
use crate::normalize::NormalizeError;
use crate::vision::VisionError;

/// Message returned to clients for every server-side failure.
pub const ANALYZE_FAILED: &str = "Failed to analyze the image";

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("No image file was provided")]
    NoFileProvided,
    #[error("Only JPG, PNG or WEBP images are allowed (got {0})")]
    DisallowedMimeType(String),
    #[error("Image exceeds the maximum size of {limit} bytes")]
    FileTooLarge { limit: usize },
    #[error("Could not read uploaded file: {0}")]
    InvalidUpload(String),
    #[error("Unsupported image format")]
    UnsupportedFormat,
    #[error("File too small to detect image format ({len} bytes)")]
    TooSmall { len: usize },
    #[error(transparent)]
    ExternalCall(#[from] VisionError),
    #[error("{0}")]
    MalformedResponse(#[from] NormalizeError),
}

impl From<FormatError> for AnalyzeError {
    fn from(err: FormatError) -> Self {
        match err {
            FormatError::TooSmall { len } => AnalyzeError::TooSmall { len },
            FormatError::Unsupported => AnalyzeError::UnsupportedFormat,
        }
    }
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::NoFileProvided
            | AnalyzeError::DisallowedMimeType(_)
            | AnalyzeError::InvalidUpload(_)
            | AnalyzeError::UnsupportedFormat
            | AnalyzeError::TooSmall { .. } => StatusCode::BAD_REQUEST,
            AnalyzeError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AnalyzeError::ExternalCall(_) | AnalyzeError::MalformedResponse(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn body(&self) -> ErrorBody {
        if self.status().is_server_error() {
            ErrorBody {
                error: ANALYZE_FAILED.to_string(),
                details: Some(self.to_string()),
            }
        } else {
            ErrorBody {
                error: self.to_string(),
                details: None,
            }
        }
    }
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Analyze error: {}", self);
        } else {
            tracing::info!("Rejected upload: {}", self);
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        for err in [
            AnalyzeError::NoFileProvided,
            AnalyzeError::DisallowedMimeType("text/plain".to_string()),
            AnalyzeError::InvalidUpload("truncated".to_string()),
            AnalyzeError::UnsupportedFormat,
            AnalyzeError::TooSmall { len: 3 },
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{}", err);
            let body = err.body();
            assert!(!body.error.is_empty());
            assert!(body.details.is_none());
        }
    }

    #[test]
    fn test_too_large_is_413() {
        let err = AnalyzeError::FileTooLarge { limit: 10 };
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn test_downstream_errors_carry_details() {
        let err = AnalyzeError::from(VisionError::Api {
            status: 401,
            message: "invalid api key".to_string(),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = err.body();
        assert_eq!(body.error, ANALYZE_FAILED);
        assert!(body.details.unwrap().contains("invalid api key"));
    }

    #[test]
    fn test_malformed_response_details() {
        let err = AnalyzeError::from(NormalizeError::MissingTags);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.body().details.unwrap().contains("missing tags array"));
    }

    #[test]
    fn test_format_error_mapping() {
        assert!(matches!(
            AnalyzeError::from(FormatError::TooSmall { len: 2 }),
            AnalyzeError::TooSmall { len: 2 }
        ));
        assert!(matches!(
            AnalyzeError::from(FormatError::Unsupported),
            AnalyzeError::UnsupportedFormat
        ));
    }

    #[test]
    fn test_server_error_body_serializes_details() {
        let json = serde_json::to_value(AnalyzeError::from(NormalizeError::MissingTags).body())
            .unwrap();
        assert_eq!(json["error"], ANALYZE_FAILED);
        assert!(json["details"].is_string());

        let json = serde_json::to_value(AnalyzeError::NoFileProvided.body()).unwrap();
        assert!(json.get("details").is_none());
    }
}
