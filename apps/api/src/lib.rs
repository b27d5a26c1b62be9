pub mod config;
pub mod correction;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::correction::LlmSectionCorrector;
use crate::llm_client::LlmClient;
use crate::parsing::ResumeParser;

/// Builds the parser described by `config`, attaching the Gemini corrector
/// only when correction is enabled and an API key is configured.
pub fn build_parser(config: &Config) -> anyhow::Result<ResumeParser> {
    let parser = ResumeParser::new();
    match config.correction_api_key() {
        Some(key) => {
            let llm = LlmClient::new(key.to_string())?;
            info!("Section correction enabled (model: {})", llm_client::MODEL);
            Ok(parser.with_corrector(Arc::new(LlmSectionCorrector::new(llm))))
        }
        None => {
            info!("Section correction disabled");
            Ok(parser)
        }
    }
}
