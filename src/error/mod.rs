// Error types for the adlens analysis service

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Configuration(String),

    #[error("Failed to download image")]
    Download(String),

    #[error("{0}")]
    Provider(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config parsing error: {0}")]
    ConfigParsing(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AnalysisError {
    /// HTTP status this error maps to. Validation and malformed-input
    /// failures are the caller's fault; everything else is a 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AnalysisError::Validation(_) | AnalysisError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Convert AnalysisError to the uniform `{"error": ...}` response body.
// The fixed CORS header set is appended by the response middleware, so
// error paths carry it too.
impl IntoResponse for AnalysisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_400() {
        let err = AnalysisError::Validation("Missing required fields: brief".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_request_maps_to_400() {
        let err = AnalysisError::InvalidRequest("Invalid base64 image data".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_download_maps_to_500_with_fixed_message() {
        let err = AnalysisError::Download("connection refused".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to download image");
    }

    #[test]
    fn test_configuration_message_passes_through() {
        let err =
            AnalysisError::Configuration("Missing OPENAI_API_KEY environment variable".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
