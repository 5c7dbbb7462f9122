//! Text extraction for uploaded resumes.
//!
//! Two formats are accepted: PDF (decoded with `pdf-extract`) and plain text
//! (strict UTF-8). Anything else is rejected before it reaches a parser.

use thiserror::Error;
use tracing::debug;

/// Number of characters shown in the resume preview.
pub const PREVIEW_CHARS: usize = 3000;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Error extracting text from PDF: {0}")]
    Pdf(String),

    #[error("Error decoding text file: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("No text could be extracted from the uploaded resume")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Picks the decoder for an upload from its declared MIME type, falling
    /// back to the file extension when the client sent no useful type.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Option<DocumentKind> {
        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty());

        match mime.as_deref() {
            Some("application/pdf") => Some(DocumentKind::Pdf),
            Some(ct) if ct.starts_with("text/") => Some(DocumentKind::PlainText),
            None | Some("application/octet-stream") => Self::from_extension(file_name?),
            Some(_) => None,
        }
    }

    fn from_extension(file_name: &str) -> Option<DocumentKind> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "txt" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::PlainText => "text",
        }
    }
}

/// Extracts the resume text synchronously. Prefer `extract_text_async` on the
/// request path: PDF parsing is CPU bound.
pub fn extract_text(kind: DocumentKind, bytes: &[u8]) -> Result<String, ExtractionError> {
    let text = match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::Pdf(e.to_string()))?,
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())?,
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::Empty);
    }

    debug!(
        "Extracted {} characters from {} upload",
        text.chars().count(),
        kind.as_str()
    );
    Ok(text)
}

/// Runs `extract_text` on the blocking pool. A panic inside the PDF parser is
/// reported as an extraction error instead of taking the request down.
pub async fn extract_text_async(
    kind: DocumentKind,
    bytes: bytes::Bytes,
) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_text(kind, &bytes))
        .await
        .map_err(|e| ExtractionError::Pdf(format!("parser aborted: {e}")))?
}

/// First `limit` characters of the text, never splitting a code point.
pub fn preview(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
