//! LLM Provider Abstraction
//!
//! Defines the `LlmProvider` trait for document refinement. All providers
//! return an `LlmResponse` with token usage metrics for cost reporting.

mod claude;
mod ollama;
mod openai;
mod retry;
mod usage;

pub use claude::ClaudeProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use retry::generate_with_retry;
pub use usage::UsageTracker;

// Re-export error types from centralized location
pub use crate::types::{ErrorCategory, ErrorClassifier, LlmError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::Config;
use crate::types::{AgentseedError, Result};

/// Default generation ceiling for refinement responses
pub const DEFAULT_MAX_TOKENS: usize = 4096;

// =============================================================================
// Request / Response
// =============================================================================

/// A single text-generation request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    pub system_prompt: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: Some(system_prompt.into()),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

/// Plain-text response with usage counters
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
    pub usage: TokenUsage,
}

/// Token usage metrics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl TokenUsage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}

/// Shared provider handle for sequential subfolder passes
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Connection settings for a provider.
///
/// API keys are never serialized and are redacted in debug output; each
/// provider converts the key to a SecretString internally.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub model: String,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    pub ollama_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("ollama_url", &self.ollama_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ProviderConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.resolved_model(),
            api_key: config.api_key.clone(),
            ollama_url: config.ollama_url.clone(),
            timeout_secs: config.timeout_secs,
            temperature: config.temperature,
        }
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// Text-generation provider
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate plain text for a prompt
    async fn generate(&self, request: &LlmRequest) -> Result<LlmResponse>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;
}

/// Create a shared provider from configuration
pub fn create_provider(config: &Config) -> Result<SharedProvider> {
    let provider_config = ProviderConfig::from_config(config);
    match config.provider.as_str() {
        "claude" => Ok(Arc::new(ClaudeProvider::new(provider_config)?)),
        "openai" => Ok(Arc::new(OpenAiProvider::new(provider_config)?)),
        "ollama" => Ok(Arc::new(OllamaProvider::new(provider_config)?)),
        other => Err(AgentseedError::Config(format!(
            "Unknown provider: {}. Supported: claude, openai, ollama",
            other
        ))),
    }
}
