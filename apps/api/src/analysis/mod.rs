//! Resume analysis: prompt, model call, section split and page rendering.
//! All model calls go through llm_client; nothing here talks HTTP to Gemini.

pub mod analyzer;
pub mod handlers;
pub mod page;
pub mod prompts;
pub mod sections;
