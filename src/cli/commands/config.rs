//! Config Command
//!
//! Inspect the effective configuration and its file locations.
//!
//! Usage:
//!   agentseed config show [-f json]
//!   agentseed config path

use console::style;

use crate::config::{ConfigLoader, ConfigOverrides, CONFIG_FILE};
use crate::types::{AgentseedError, Result};

/// Show the merged effective configuration (defaults + file + env)
pub fn show(format: &str) -> Result<()> {
    let root = std::env::current_dir()?;
    let config = ConfigLoader::load(&root, &ConfigOverrides::default())?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        "text" | "toml" => {
            println!("{}", style("# Effective configuration").dim());
            let rendered = toml::to_string_pretty(&config)
                .map_err(|e| AgentseedError::Config(format!("Failed to render config: {}", e)))?;
            print!("{}", rendered);
        }
        other => {
            return Err(AgentseedError::Config(format!(
                "Unknown output format '{}'. Supported: text, toml, json",
                other
            )));
        }
    }
    Ok(())
}

/// Show where configuration is read from
pub fn path() -> Result<()> {
    let root = std::env::current_dir()?;
    let config_path = ConfigLoader::config_path(&root);

    let status = if config_path.exists() {
        style("present").green()
    } else {
        style("absent").yellow()
    };
    println!("Project config: {} ({})", config_path.display(), status);
    println!("Environment:    {} variables", style("AGENTSEED_*").bold());
    println!(
        "{}",
        style(format!(
            "Create {} at the repository root to override defaults.",
            CONFIG_FILE
        ))
        .dim()
    );
    Ok(())
}
