use std::sync::Arc;

use crate::analysis::page::PageRenderer;
use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API key is configured; every analysis then reports the missing key.
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub pages: Arc<PageRenderer>,
}
