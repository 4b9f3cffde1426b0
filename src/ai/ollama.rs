//! Ollama Local Provider
//!
//! Talks to a local Ollama server over its `/api/generate` endpoint.
//! No API key; the endpoint URL is validated at construction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::{LlmProvider, LlmRequest, LlmResponse, ProviderConfig, TokenUsage};
use crate::types::{AgentseedError, ErrorCategory, ErrorClassifier, LlmError, Result};

#[derive(Debug)]
pub struct OllamaProvider {
    base_url: Url,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.ollama_url).map_err(|e| {
            AgentseedError::Config(format!(
                "Invalid Ollama URL '{}': {}",
                config.ollama_url, e
            ))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                AgentseedError::llm(
                    ErrorCategory::Unknown,
                    format!("Failed to create HTTP client: {}", e),
                )
            })?;

        Ok(Self {
            base_url,
            model: config.model,
            temperature: config.temperature,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse> {
        info!("Generating with Ollama (model: {})", self.model);

        let body = GenerateRequest {
            model: self.model.clone(),
            prompt: request.prompt.clone(),
            system: request.system_prompt.clone(),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
            },
        };

        let url = self.base_url.join("/api/generate").map_err(|e| {
            AgentseedError::Config(format!("Invalid Ollama endpoint: {}", e))
        })?;
        debug!("Sending request to Ollama at {}", url);

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify(&e.to_string(), "ollama"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(status, &body, "ollama").into());
        }

        let response_body: GenerateResponse = response.json().await.map_err(|e| {
            LlmError::with_provider(
                ErrorCategory::Unknown,
                format!("Failed to parse Ollama response: {}", e),
                "ollama",
            )
        })?;

        Ok(LlmResponse {
            content: response_body.response,
            usage: TokenUsage {
                input_tokens: response_body.prompt_eval_count.unwrap_or(0),
                output_tokens: response_body.eval_count.unwrap_or(0),
            },
        })
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}
