//! Resume analysis pipeline.
//!
//! Flow: API key check → document kind detection → text extraction →
//!       prompt → model call → section split.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::prompts::build_analysis_prompt;
use crate::analysis::sections::{split_sections, ResumeFeedback};
use crate::errors::AppError;
use crate::extraction::{extract_text_async, preview, DocumentKind, PREVIEW_CHARS};
use crate::llm_client::TextGenerator;
use crate::state::AppState;

/// A single uploaded file, as read from the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Everything the page and the JSON API show for one analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub model: String,
    pub file_name: Option<String>,
    pub document_kind: String,
    /// First characters of the extracted text.
    pub preview: String,
    pub feedback: ResumeFeedback,
    pub raw_response: String,
}

/// The model's answer for one resume text, before upload metadata is attached.
#[derive(Debug, Clone)]
pub struct ResumeAnalysis {
    pub model: String,
    pub feedback: ResumeFeedback,
    pub raw_response: String,
}

/// Sends extracted resume text to the model and splits the answer.
pub async fn analyze_resume(
    resume_text: &str,
    generator: &dyn TextGenerator,
) -> Result<ResumeAnalysis, AppError> {
    let prompt = build_analysis_prompt(resume_text);
    let generation = generator.generate(&prompt).await?;
    Ok(ResumeAnalysis {
        model: generator.model().to_string(),
        feedback: split_sections(&generation.text),
        raw_response: generation.text,
    })
}

/// Runs the full pipeline for one uploaded file.
pub async fn analyze_upload(
    state: &AppState,
    upload: ResumeUpload,
) -> Result<AnalysisReport, AppError> {
    let generator = state.generator.as_deref().ok_or(AppError::MissingApiKey)?;

    if upload.bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge {
            limit: state.config.max_upload_bytes,
        });
    }

    let kind = DocumentKind::detect(upload.content_type.as_deref(), upload.file_name.as_deref())
        .ok_or_else(|| {
            AppError::UnsupportedMediaType(
                upload
                    .content_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            )
        })?;

    let id = Uuid::new_v4();
    info!(
        "Analysis {id}: {} upload, {} bytes, file={:?}",
        kind.as_str(),
        upload.bytes.len(),
        upload.file_name
    );

    let text = extract_text_async(kind, upload.bytes).await?;
    let analysis = analyze_resume(&text, generator).await?;

    info!(
        "Analysis {id} complete: parsed={}, ats_score={:?}",
        analysis.feedback.parsed, analysis.feedback.ats_score_value
    );

    Ok(AnalysisReport {
        id,
        analyzed_at: Utc::now(),
        model: analysis.model,
        file_name: upload.file_name,
        document_kind: kind.as_str().to_string(),
        preview: preview(&text, PREVIEW_CHARS).to_string(),
        feedback: analysis.feedback,
        raw_response: analysis.raw_response,
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::llm_client::{Generation, LlmError, TextGenerator};

    /// Replays a fixed answer and records the prompts it was sent.
    pub struct StubGenerator {
        pub answer: Result<String, u16>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn answering(text: &str) -> Arc<Self> {
            Arc::new(StubGenerator {
                answer: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        pub fn failing(status: u16) -> Arc<Self> {
            Arc::new(StubGenerator {
                answer: Err(status),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<Generation, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.answer {
                Ok(text) => Ok(Generation {
                    text: text.clone(),
                    input_tokens: None,
                    output_tokens: None,
                }),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream unavailable".to_string(),
                }),
            }
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }
}
