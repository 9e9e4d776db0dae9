//! Self-hosted backend: a local Ollama daemon. Zero monetary cost; usage
//! reports wall-clock time instead.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{Provider, ProviderError, ProviderResponse};
use crate::models::Usage;

pub const DEFAULT_MODEL: &str = "mistral";

/// Short probe timeout: "is the daemon up" must answer fast.
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);
const LIST_TIMEOUT: Duration = Duration::from_secs(5);
/// Generation gets a much longer leash than the probe.
const GENERATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Output cap for quick scoring runs.
const NUM_PREDICT: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    prompt_eval_count: u64,
    #[serde(default)]
    eval_count: u64,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(base_url: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    /// Probes the daemon with a short timeout. Unreachable or slow daemons
    /// report `false`, never an error.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).timeout(PROBE_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Lists the models installed in the local daemon. Failures degrade to
    /// an empty list; the caller only needs this for menus.
    pub async fn list_models(&self) -> Vec<String> {
        let url = format!("{}/api/tags", self.base_url);
        let response = match self.client.get(&url).timeout(LIST_TIMEOUT).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("ollama model listing failed: {e}");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            return Vec::new();
        }
        match response.json::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn map_transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                seconds: GENERATE_TIMEOUT.as_secs(),
            }
        } else if error.is_connect() {
            ProviderError::Connection {
                endpoint: self.base_url.clone(),
            }
        } else {
            ProviderError::Http(error)
        }
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    async fn evaluate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let started = Instant::now();

        let response = self
            .client
            .post(&url)
            .timeout(GENERATE_TIMEOUT)
            .json(&json!({
                "model": self.model,
                "prompt": prompt,
                "stream": false,
                "options": {
                    "temperature": TEMPERATURE,
                    "num_predict": NUM_PREDICT,
                }
            }))
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: GenerateResponse = response.json().await?;
        let elapsed = started.elapsed().as_secs_f64();

        debug!(
            input_tokens = reply.prompt_eval_count,
            output_tokens = reply.eval_count,
            elapsed_seconds = elapsed,
            model = %self.model,
            "ollama call succeeded"
        );

        let usage = Usage {
            input_tokens: reply.prompt_eval_count,
            output_tokens: reply.eval_count,
            cost: 0.0, // local inference is free
            model: self.model.clone(),
            provider: self.name().to_string(),
            elapsed_seconds: Some((elapsed * 100.0).round() / 100.0),
        };

        Ok(ProviderResponse {
            text: reply.response,
            usage,
        })
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
