use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; section correction stays off without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub gemini_api_key: Option<String>,
    pub enable_llm_correction: bool,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: DEFAULT_PORT,
            rust_log: "info".to_string(),
            gemini_api_key: None,
            enable_llm_correction: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            enable_llm_correction: parse_env("ENABLE_LLM_CORRECTION", defaults.enable_llm_correction)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
        })
    }

    /// The API key to use for section correction, if correction should run at all.
    pub fn correction_api_key(&self) -> Option<&str> {
        if self.enable_llm_correction {
            self.gemini_api_key.as_deref()
        } else {
            None
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_requires_flag_and_key() {
        let mut config = Config::default();
        assert_eq!(config.correction_api_key(), None);

        config.gemini_api_key = Some("abc".to_string());
        assert_eq!(config.correction_api_key(), Some("abc"));

        config.enable_llm_correction = false;
        assert_eq!(config.correction_api_key(), None);
    }

    #[test]
    fn test_parse_env_default_and_override() {
        // Variable names unique to this test so parallel tests do not interfere.
        assert_eq!(parse_env("RESUME_PARSER_TEST_UNSET_PORT", 8080u16).unwrap(), 8080);

        std::env::set_var("RESUME_PARSER_TEST_FLAG", "false");
        assert!(!parse_env("RESUME_PARSER_TEST_FLAG", true).unwrap());

        std::env::set_var("RESUME_PARSER_TEST_BAD_PORT", "eighty");
        let err = parse_env("RESUME_PARSER_TEST_BAD_PORT", 8080u16).unwrap_err();
        assert!(err.to_string().contains("RESUME_PARSER_TEST_BAD_PORT"));
    }
}
