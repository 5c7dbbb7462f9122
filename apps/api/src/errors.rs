use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// The HTML page reuses `status`, `code` and `user_message` so both surfaces
/// report a failure the same way.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedMediaType(String),

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Gemini API key not found")]
    MissingApiKey,

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnsupportedMediaType(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            AppError::MissingApiKey => "MISSING_API_KEY",
            AppError::Extraction(_) => "EXTRACTION_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The message shown to the person who uploaded the file.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::UnsupportedMediaType(received) => format!(
                "Only PDF and plain text resumes are supported. Received: {received}"
            ),
            AppError::PayloadTooLarge { limit } => {
                format!("File size exceeds the {} limit", format_size(*limit))
            }
            AppError::MissingApiKey => {
                "Gemini API key not found. Please set GEMINI_API_KEY in your environment."
                    .to_string()
            }
            AppError::Extraction(e) => e.to_string(),
            AppError::Llm(e) => format!("Error analyzing resume with Gemini AI: {e}"),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    /// Logs server-side failures. Client mistakes are not worth an error line.
    pub fn log(&self) {
        match self {
            AppError::MissingApiKey => tracing::error!("Analysis requested without GEMINI_API_KEY"),
            AppError::Extraction(e) => tracing::warn!("Extraction error: {e}"),
            AppError::Llm(e) => tracing::error!("LLM error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
            _ => {}
        }
    }
}

/// Renders a byte count in the largest unit that keeps it at least 1,
/// e.g. "10 MB", "1.5 KB", "512 bytes".
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * 1024;

    let (value, unit) = if bytes >= MB {
        (bytes as f64 / MB as f64, "MB")
    } else if bytes >= KB {
        (bytes as f64 / KB as f64, "KB")
    } else {
        return format!("{bytes} bytes");
    };

    let rounded = format!("{value:.1}");
    let rounded = rounded.strip_suffix(".0").unwrap_or(&rounded);
    format!("{rounded} {unit}")
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.user_message()
            }
        }));

        (self.status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message_names_the_variable() {
        let err = AppError::MissingApiKey;
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.user_message().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_internal_error_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("secret stack detail"));
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(!err.user_message().contains("secret"));
    }

    #[test]
    fn test_llm_error_is_bad_gateway() {
        let err = AppError::from(LlmError::EmptyContent);
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(err
            .user_message()
            .starts_with("Error analyzing resume with Gemini AI"));
    }

    #[test]
    fn test_payload_limit_reported_in_megabytes() {
        let err = AppError::PayloadTooLarge {
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(err.user_message(), "File size exceeds the 10 MB limit");
    }

    #[test]
    fn test_payload_limit_below_one_megabyte() {
        let err = AppError::PayloadTooLarge { limit: 1024 };
        assert_eq!(err.user_message(), "File size exceeds the 1 KB limit");
    }

    #[test]
    fn test_format_size_picks_unit() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(500), "500 bytes");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(512 * 1024), "512 KB");
        assert_eq!(format_size(5 * 1024 * 1024 / 2), "2.5 MB");
    }
}
