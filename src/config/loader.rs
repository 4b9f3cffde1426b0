//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources:
//! 1. Built-in defaults (Serialized)
//! 2. Project config (`.agentseedrc`, TOML)
//! 3. Environment variables (`AGENTSEED_*` prefix)
//! 4. CLI overrides
//!
//! A present-but-unparseable config file is a fatal `Config` error; analysis
//! never begins with malformed configuration.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::Config;
use crate::types::{AgentseedError, Result};

/// Project config file name (TOML)
pub const CONFIG_FILE: &str = ".agentseedrc";

/// CLI-level overrides applied on top of file and environment sources
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub no_llm: Option<bool>,
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a repository root:
    /// defaults → `.agentseedrc` → env vars → CLI overrides
    pub fn load(root: &Path, overrides: &ConfigOverrides) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        let config_path = Self::config_path(root);
        if config_path.exists() {
            debug!("Loading config from {}", config_path.display());
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(Env::prefixed("AGENTSEED_"));

        let mut config: Config = figment
            .extract()
            .map_err(|e| AgentseedError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))?;

        if let Some(provider) = &overrides.provider {
            config.provider = provider.clone();
        }
        if let Some(model) = &overrides.model {
            config.model = Some(model.clone());
        }
        if let Some(no_llm) = overrides.no_llm {
            config.no_llm = no_llm;
        }

        if config.api_key.is_none() {
            config.api_key = Self::resolve_api_key(&config.provider);
        }

        config.validate()?;
        Ok(config)
    }

    /// Path to the project config file
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Resolve API key from provider-specific environment variables
    fn resolve_api_key(provider: &str) -> Option<String> {
        match provider {
            "claude" => env::var("ANTHROPIC_API_KEY").ok(),
            "openai" => env::var("OPENAI_API_KEY").ok(),
            // Ollama is local and needs no key
            _ => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = ConfigLoader::load(temp.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.provider, "claude");
        assert_eq!(config.max_files, 15);
    }

    #[test]
    fn test_load_project_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE),
            "provider = \"ollama\"\nmax_files = 5\n",
        )
        .unwrap();

        let config = ConfigLoader::load(temp.path(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.max_files, 5);
    }

    #[test]
    fn test_unparseable_config_is_fatal() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "provider = [not toml").unwrap();

        let err = ConfigLoader::load(temp.path(), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, AgentseedError::Config(_)));
    }

    #[test]
    fn test_cli_overrides_win() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE), "provider = \"claude\"\n").unwrap();

        let overrides = ConfigOverrides {
            provider: Some("ollama".to_string()),
            model: Some("mistral".to_string()),
            no_llm: Some(true),
        };
        let config = ConfigLoader::load(temp.path(), &overrides).unwrap();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model.as_deref(), Some("mistral"));
        assert!(config.no_llm);
    }
}
