//! Axum route handlers for the analyzer page and the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::analysis::analyzer::{analyze_upload, AnalysisReport, ResumeUpload};
use crate::errors::AppError;
use crate::state::AppState;

/// Name of the multipart field carrying the resume.
pub const FILE_FIELD: &str = "file";

/// Reads the `file` field of a multipart form.
///
/// Returns `None` when the field is absent or empty, which is what a browser
/// sends when the form is submitted without choosing a file.
pub async fn read_upload(
    mut multipart: Multipart,
    limit: usize,
) -> Result<Option<ResumeUpload>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .filter(|n| !n.is_empty());
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.is_empty() {
            return Ok(None);
        }

        return Ok(Some(ResumeUpload {
            file_name,
            content_type,
            bytes,
        }));
    }

    Ok(None)
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}

/// GET /
pub async fn handle_index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.pages.index()?))
}

/// POST /analyze
///
/// Form submission from the page. Failures render the page with an error box
/// and the matching status code.
pub async fn handle_analyze_page(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Response {
    let result = match read_upload(multipart, state.config.max_upload_bytes).await {
        Ok(Some(upload)) => analyze_upload(&state, upload).await,
        Ok(None) => {
            return match state.pages.index() {
                Ok(html) => Html(html).into_response(),
                Err(e) => e.into_response(),
            }
        }
        Err(e) => Err(e),
    };

    let (status, rendered) = match result {
        Ok(report) => (StatusCode::OK, state.pages.report(&report)),
        Err(e) => {
            e.log();
            (e.status(), state.pages.error(&e))
        }
    };

    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /api/v1/analyze
///
/// Same pipeline as the page, returning the full `AnalysisReport` as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let upload = read_upload(multipart, state.config.max_upload_bytes)
        .await?
        .ok_or_else(|| {
            AppError::Validation(format!(
                "No resume uploaded. Send a PDF or TXT file in the `{FILE_FIELD}` form field."
            ))
        })?;

    let report = analyze_upload(&state, upload).await?;
    Ok(Json(report))
}
