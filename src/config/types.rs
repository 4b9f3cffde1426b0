//! Configuration Types
//!
//! Analysis and generation settings with sensible defaults.
//! Loaded from `.agentseedrc` (TOML) at the repository root, overridable
//! via `AGENTSEED_`-prefixed environment variables and CLI flags.

use serde::{Deserialize, Serialize};

/// Directory names excluded from every traversal by default
pub const DEFAULT_IGNORE: &[&str] = &[
    "node_modules",
    ".git",
    "dist",
    "build",
    "coverage",
    "__pycache__",
    ".next",
    ".nuxt",
    "vendor",
    "target",
];

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider name: "claude", "openai", "ollama"
    pub provider: String,

    /// Model name (provider default when unset)
    pub model: Option<String>,

    /// API key. Resolved from provider env vars when unset.
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Ollama endpoint
    pub ollama_url: String,

    /// Skip the LLM pass and emit static analysis only
    pub no_llm: bool,

    /// Maximum files to sample for LLM context
    pub max_files: usize,

    /// Byte budget for sampled file content
    pub max_token_budget: usize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Temperature for LLM generation
    pub temperature: f32,

    /// Directory names excluded from traversal (matched anywhere in the tree)
    pub ignore: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "claude".to_string(),
            model: None,
            api_key: None,
            ollama_url: "http://localhost:11434".to_string(),
            no_llm: false,
            max_files: 15,
            max_token_budget: 65536,
            timeout_secs: 300,
            temperature: 0.3,
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `AgentseedError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if !matches!(self.provider.as_str(), "claude" | "openai" | "ollama") {
            return Err(crate::types::AgentseedError::Config(format!(
                "Unknown provider '{}'. Supported: claude, openai, ollama",
                self.provider
            )));
        }

        if self.max_files == 0 {
            return Err(crate::types::AgentseedError::Config(
                "max_files must be greater than 0".to_string(),
            ));
        }

        if self.max_token_budget == 0 {
            return Err(crate::types::AgentseedError::Config(
                "max_token_budget must be greater than 0".to_string(),
            ));
        }

        if self.timeout_secs == 0 {
            return Err(crate::types::AgentseedError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(crate::types::AgentseedError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        Ok(())
    }

    /// Resolve the model name, falling back to the provider default
    pub fn resolved_model(&self) -> String {
        self.model.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "openai" => "gpt-4o",
                "ollama" => "llama3",
                _ => "claude-sonnet-4-5-20250929",
            }
            .to_string()
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider, "claude");
        assert_eq!(config.max_files, 15);
        assert!(config.ignore.contains(&"node_modules".to_string()));
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let config = Config {
            provider: "gemini".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_budget() {
        let config = Config {
            max_token_budget: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolved_model_defaults() {
        let claude = Config::default();
        assert_eq!(claude.resolved_model(), "claude-sonnet-4-5-20250929");

        let openai = Config {
            provider: "openai".to_string(),
            ..Default::default()
        };
        assert_eq!(openai.resolved_model(), "gpt-4o");

        let explicit = Config {
            model: Some("gpt-4o-mini".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.resolved_model(), "gpt-4o-mini");
    }
}
