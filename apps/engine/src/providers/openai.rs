//! Hosted backend B: the OpenAI Chat Completions API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{round_cost, Provider, ProviderError, ProviderResponse};
use crate::models::Usage;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o";
const MAX_TOKENS: u32 = 4096;
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT_SECS: u64 = 120;

const SYSTEM_MESSAGE: &str =
    "You are an expert recruiter evaluating candidates for job positions.";

/// $ per million prompt / completion tokens by model id.
const PRICING: &[(&str, f64, f64)] = &[
    ("gpt-4o", 2.50, 10.00),
    ("gpt-4o-mini", 0.15, 0.60),
    ("gpt-4", 30.00, 60.00),
    ("gpt-4-turbo", 10.00, 30.00),
    ("gpt-3.5-turbo", 0.50, 1.50),
];

/// Unknown model ids are billed at the gpt-4o (default-tier) rates.
const FALLBACK_RATES: (f64, f64) = (2.50, 10.00);

fn rates_for(model: &str) -> (f64, f64) {
    PRICING
        .iter()
        .find(|(id, _, _)| *id == model)
        .map(|(_, input, output)| (*input, *output))
        .unwrap_or(FALLBACK_RATES)
}

fn compute_cost(model: &str, prompt_tokens: u64, completion_tokens: u64) -> f64 {
    let (input_rate, output_rate) = rates_for(model);
    let cost = (prompt_tokens as f64 / 1_000_000.0) * input_rate
        + (completion_tokens as f64 / 1_000_000.0) * output_rate;
    round_cost(cost)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: TokenCounts,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenCounts {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
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
impl Provider for OpenAiProvider {
    async fn evaluate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_MESSAGE,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(API_URL)
            .bearer_auth(&self.api_key)
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

        let reply: ChatResponse = response.json().await?;
        let text = reply
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .ok_or(ProviderError::EmptyContent)?
            .to_string();

        debug!(
            prompt_tokens = reply.usage.prompt_tokens,
            completion_tokens = reply.usage.completion_tokens,
            model = %self.model,
            "openai call succeeded"
        );

        let usage = Usage {
            input_tokens: reply.usage.prompt_tokens,
            output_tokens: reply.usage.completion_tokens,
            cost: compute_cost(
                &self.model,
                reply.usage.prompt_tokens,
                reply.usage.completion_tokens,
            ),
            model: self.model.clone(),
            provider: self.name().to_string(),
            elapsed_seconds: None,
        };

        Ok(ProviderResponse { text, usage })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gpt4o_mini_rates() {
        // $0.15/M input, $0.60/M output.
        let cost = compute_cost("gpt-4o-mini", 2_000_000, 1_000_000);
        assert_eq!(cost, 0.90);
    }

    #[test]
    fn test_unknown_model_billed_as_gpt4o() {
        assert_eq!(
            compute_cost("gpt-5-preview", 1000, 500),
            compute_cost("gpt-4o", 1000, 500)
        );
    }

    #[test]
    fn test_provider_uses_default_model_when_unset() {
        let provider = OpenAiProvider::new("sk-test".to_string(), None);
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_chat_response_deserializes() {
        let reply: ChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"content": "SCORE: 70"}}],
                "usage": {"prompt_tokens": 100, "completion_tokens": 20}
            }"#,
        )
        .unwrap();
        assert_eq!(reply.choices[0].message.content.as_deref(), Some("SCORE: 70"));
        assert_eq!(reply.usage.prompt_tokens, 100);
    }
}
