//! Inference backends behind one trait.
//!
//! ARCHITECTURAL RULE: no other module may call a model API directly. All
//! model interactions go through a `Provider`, so the orchestrator treats
//! hosted and self-hosted backends uniformly, including cost accounting.

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::models::Usage;

pub mod anthropic;
pub mod ollama;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Error surface shared by every backend. Timeouts and connection failures
/// are distinguished so callers can tell "daemon not running" apart from
/// "generation too slow".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Cannot connect to {endpoint}. Is the daemon running?")]
    Connection { endpoint: String },

    #[error("Model returned empty content")]
    EmptyContent,
}

/// Raw model reply plus normalized usage accounting.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub text: String,
    pub usage: Usage,
}

/// One round-trip evaluation call against a model backend.
///
/// Implementations hold only configuration (endpoint, model id, credential)
/// and issue independent requests, so a single instance is safe to share
/// across concurrent callers.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn evaluate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    fn name(&self) -> &'static str;
}

/// Builds the provider selected by name, enforcing that the matching
/// credential is present before any network call is made.
pub fn build_provider(
    name: &str,
    model: Option<&str>,
    config: &EngineConfig,
) -> Result<Box<dyn Provider>, EngineError> {
    match name.to_lowercase().as_str() {
        "anthropic" => {
            let api_key = config.anthropic_api_key.clone().ok_or_else(|| {
                EngineError::Configuration(
                    "Missing ANTHROPIC_API_KEY for provider 'anthropic'".to_string(),
                )
            })?;
            let model = model
                .map(str::to_string)
                .or_else(|| config.anthropic_model.clone());
            Ok(Box::new(AnthropicProvider::new(api_key, model)))
        }
        "openai" => {
            let api_key = config.openai_api_key.clone().ok_or_else(|| {
                EngineError::Configuration(
                    "Missing OPENAI_API_KEY for provider 'openai'".to_string(),
                )
            })?;
            let model = model
                .map(str::to_string)
                .or_else(|| config.openai_model.clone());
            Ok(Box::new(OpenAiProvider::new(api_key, model)))
        }
        "ollama" => {
            let model = model
                .map(str::to_string)
                .or_else(|| config.ollama_model.clone());
            Ok(Box::new(OllamaProvider::new(
                config.ollama_base_url.clone(),
                model,
            )))
        }
        other => Err(EngineError::Configuration(format!(
            "Unsupported provider: {other}. Supported: 'anthropic', 'openai', 'ollama'"
        ))),
    }
}

/// One selectable model in the provider catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub cost_tier: &'static str,
}

/// Display metadata for a backend, used by hosting UIs to build pickers.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub display_name: &'static str,
    pub models: &'static [ModelInfo],
    pub default_model: &'static str,
}

/// The static provider catalog: display names, model menus, defaults.
pub fn provider_catalog() -> &'static [ProviderInfo] {
    const CATALOG: &[ProviderInfo] = &[
        ProviderInfo {
            id: "anthropic",
            display_name: "Anthropic Claude",
            models: &[
                ModelInfo {
                    id: "claude-3-5-haiku-20241022",
                    name: "Claude 3.5 Haiku",
                    cost_tier: "Low",
                },
                ModelInfo {
                    id: "claude-3-5-sonnet-20241022",
                    name: "Claude 3.5 Sonnet",
                    cost_tier: "Medium",
                },
            ],
            default_model: anthropic::DEFAULT_MODEL,
        },
        ProviderInfo {
            id: "openai",
            display_name: "OpenAI",
            models: &[
                ModelInfo {
                    id: "gpt-4o-mini",
                    name: "GPT-4o Mini",
                    cost_tier: "Very Low",
                },
                ModelInfo {
                    id: "gpt-4o",
                    name: "GPT-4o",
                    cost_tier: "Medium",
                },
                ModelInfo {
                    id: "gpt-4-turbo",
                    name: "GPT-4 Turbo",
                    cost_tier: "High",
                },
            ],
            default_model: openai::DEFAULT_MODEL,
        },
        ProviderInfo {
            id: "ollama",
            display_name: "Ollama (Local)",
            models: &[
                ModelInfo {
                    id: "phi3",
                    name: "Phi-3 (Fast)",
                    cost_tier: "Free",
                },
                ModelInfo {
                    id: "mistral",
                    name: "Mistral (Balanced)",
                    cost_tier: "Free",
                },
                ModelInfo {
                    id: "llama3",
                    name: "Llama 3 (Best)",
                    cost_tier: "Free",
                },
            ],
            default_model: ollama::DEFAULT_MODEL,
        },
    ];
    CATALOG
}

/// Rounds a dollar cost to micro-dollar precision, the finest granularity
/// any pricing table produces.
pub(crate) fn round_cost(cost: f64) -> f64 {
    (cost * 1_000_000.0).round() / 1_000_000.0
}
