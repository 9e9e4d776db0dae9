//! Hosted backend A: the Anthropic Messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{round_cost, Provider, ProviderError, ProviderResponse};
use crate::models::Usage;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const MAX_TOKENS: u32 = 4096;
const REQUEST_TIMEOUT_SECS: u64 = 120;

/// $ per million input / output tokens by model id.
const PRICING: &[(&str, f64, f64)] = &[
    ("claude-3-5-haiku-20241022", 0.25, 1.25),
    ("claude-3-5-sonnet-20241022", 3.00, 15.00),
];

/// Unknown model ids are billed at the Haiku (default-tier) rates.
const FALLBACK_RATES: (f64, f64) = (0.25, 1.25);

fn rates_for(model: &str) -> (f64, f64) {
    PRICING
        .iter()
        .find(|(id, _, _)| *id == model)
        .map(|(_, input, output)| (*input, *output))
        .unwrap_or(FALLBACK_RATES)
}

fn compute_cost(model: &str, input_tokens: u64, output_tokens: u64) -> f64 {
    let (input_rate, output_rate) = rates_for(model);
    let cost = (input_tokens as f64 / 1_000_000.0) * input_rate
        + (output_tokens as f64 / 1_000_000.0) * output_rate;
    round_cost(cost)
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: TokenCounts,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenCounts {
    input_tokens: u64,
    output_tokens: u64,
}

impl MessagesResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl AnthropicProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    async fn evaluate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let request_body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: MessagesResponse = response.json().await?;
        let text = reply.text().ok_or(ProviderError::EmptyContent)?.to_string();

        debug!(
            input_tokens = reply.usage.input_tokens,
            output_tokens = reply.usage.output_tokens,
            model = %self.model,
            "anthropic call succeeded"
        );

        let usage = Usage {
            input_tokens: reply.usage.input_tokens,
            output_tokens: reply.usage.output_tokens,
            cost: compute_cost(&self.model, reply.usage.input_tokens, reply.usage.output_tokens),
            model: self.model.clone(),
            provider: self.name().to_string(),
            elapsed_seconds: None,
        };

        Ok(ProviderResponse { text, usage })
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }
}
