//! Anthropic Messages API Provider

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{LlmProvider, LlmRequest, LlmResponse, ProviderConfig, TokenUsage};
use crate::types::{AgentseedError, ErrorCategory, ErrorClassifier, LlmError, Result};

const API_BASE: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Anthropic provider with secure API key handling
pub struct ClaudeProvider {
    api_key: SecretString,
    model: String,
    temperature: f32,
    client: reqwest::Client,
}

impl std::fmt::Debug for ClaudeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeProvider")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ClaudeProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.ok_or_else(|| {
            AgentseedError::Config(
                "ANTHROPIC_API_KEY is required. Set it via environment variable or .agentseedrc"
                    .to_string(),
            )
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
            api_key: SecretString::from(api_key),
            model: config.model,
            temperature: config.temperature,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse> {
        info!(
            "Generating with Claude (model: {}, temperature: {})",
            self.model, request.temperature
        );

        let body = MessagesRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            system: request.system_prompt.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
        };

        let url = format!("{}/v1/messages", API_BASE);
        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify(&e.to_string(), "claude"))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ErrorClassifier::classify_http_status(status, &body, "claude").into());
        }

        let response_body: MessagesResponse = response.json().await.map_err(|e| {
            LlmError::with_provider(
                ErrorCategory::Unknown,
                format!("Failed to parse Claude response: {}", e),
                "claude",
            )
        })?;

        let content = response_body
            .content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.clone())
            .ok_or_else(|| {
                LlmError::with_provider(
                    ErrorCategory::Unknown,
                    "No text block in Claude response",
                    "claude",
                )
            })?;

        Ok(LlmResponse {
            content,
            usage: TokenUsage {
                input_tokens: response_body.usage.input_tokens,
                output_tokens: response_body.usage.output_tokens,
            },
        })
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: UsageInfo,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> ProviderConfig {
        ProviderConfig {
            model: "claude-sonnet-4-5-20250929".to_string(),
            api_key: Some("sk-ant-test".to_string()),
            ollama_url: "http://localhost:11434".to_string(),
            timeout_secs: 300,
            temperature: 0.3,
        }
    }

    #[test]
    fn test_new_requires_api_key() {
        let mut config = config_with_key();
        config.api_key = None;
        assert!(matches!(
            ClaudeProvider::new(config),
            Err(AgentseedError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let provider = ClaudeProvider::new(config_with_key()).unwrap();
        let debug = format!("{:?}", provider);
        assert!(!debug.contains("sk-ant-test"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r##"{
            "content": [{"type": "text", "text": "# AGENTS.md"}],
            "usage": {"input_tokens": 1200, "output_tokens": 800}
        }"##;
        let parsed: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.content[0].text.as_deref(), Some("# AGENTS.md"));
        assert_eq!(parsed.usage.input_tokens, 1200);
    }
}
