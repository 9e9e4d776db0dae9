use std::path::PathBuf;

use anyhow::Result;

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Engine configuration, consumed at construction time.
///
/// Held as an explicit value (not ambient globals) so multiple engines with
/// different providers or credentials can coexist in one process. Credentials
/// stay optional here; the provider factory enforces presence for the
/// provider actually selected, before any network call.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Provider used when a request does not name one: "anthropic",
    /// "openai", or "ollama".
    pub default_provider: String,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Per-provider model overrides; `None` means the provider's default.
    pub anthropic_model: Option<String>,
    pub openai_model: Option<String>,
    pub ollama_model: Option<String>,
    pub ollama_base_url: String,
    /// Path to the rubric-instructions file. When unset or unreadable the
    /// embedded fallback text is used instead.
    pub rubric_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_provider: "anthropic".to_string(),
            anthropic_api_key: None,
            openai_api_key: None,
            anthropic_model: None,
            openai_model: None,
            ollama_model: None,
            ollama_base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            rubric_path: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(EngineConfig {
            default_provider: std::env::var("EVAL_PROVIDER")
                .unwrap_or_else(|_| "anthropic".to_string()),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            anthropic_model: std::env::var("ANTHROPIC_MODEL").ok(),
            openai_model: std::env::var("OPENAI_MODEL").ok(),
            ollama_model: std::env::var("OLLAMA_MODEL").ok(),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_BASE_URL.to_string()),
            rubric_path: std::env::var("RUBRIC_PATH").ok().map(PathBuf::from),
        })
    }
}
