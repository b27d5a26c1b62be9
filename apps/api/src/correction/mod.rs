//! Section correction: an optional remote pass that may rewrite the section split.
//!
//! The local parse is always complete on its own. A corrector either returns a
//! replacement document or a `CorrectionError`, and the caller keeps the local
//! result on error.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::ParsedDocument;

pub mod prompts;
pub mod response;

use prompts::SECTION_CORRECTION_PROMPT;
pub use response::{extract_json_object, rebuild_document};

/// Characters of raw text sent to the model.
pub const PROMPT_TEXT_CHARS: usize = 5000;

#[derive(Debug, Error)]
pub enum CorrectionError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("empty response from LLM")]
    EmptyResponse,

    #[error("no JSON object found in LLM response: {0}")]
    NoJsonObject(String),

    #[error("invalid correction JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("correction task aborted: {0}")]
    Aborted(String),
}

/// Rewrites the sections of a parsed document.
#[async_trait]
pub trait SectionCorrector: Send + Sync {
    async fn correct(&self, document: &ParsedDocument) -> Result<ParsedDocument, CorrectionError>;
}

/// Gemini-backed corrector.
pub struct LlmSectionCorrector {
    llm: LlmClient,
}

impl LlmSectionCorrector {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl SectionCorrector for LlmSectionCorrector {
    async fn correct(&self, document: &ParsedDocument) -> Result<ParsedDocument, CorrectionError> {
        let prompt = build_prompt(document);
        let reply = match self.llm.call_text(&prompt, JSON_ONLY_SYSTEM).await {
            Ok(text) => text,
            Err(LlmError::EmptyContent) => return Err(CorrectionError::EmptyResponse),
            Err(e) => return Err(e.into()),
        };
        debug!(reply_chars = reply.len(), "section correction reply received");
        rebuild_document(&reply, document)
    }
}

/// Fills the correction prompt with truncated raw text and per-section block counts.
pub fn build_prompt(document: &ParsedDocument) -> String {
    let raw_text: String = document.raw_text.chars().take(PROMPT_TEXT_CHARS).collect();
    SECTION_CORRECTION_PROMPT
        .replace("{section_summary}", &section_summary(document))
        .replace("{raw_text}", &raw_text)
}

/// One `"<section>: <n> blocks"` line per non-empty section, in enumeration order.
fn section_summary(document: &ParsedDocument) -> String {
    document
        .sections
        .iter()
        .filter(|(_, blocks)| !blocks.is_empty())
        .map(|(kind, blocks)| format!("{kind}: {} blocks", blocks.len()))
        .collect::<Vec<_>>()
        .join("\n")
}
