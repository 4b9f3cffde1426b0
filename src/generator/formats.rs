//! Output Formats
//!
//! The five agent-context document formats and their on-disk locations.

use std::path::{Path, PathBuf};

use crate::types::{AgentseedError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Agents,
    Claude,
    Cursor,
    Copilot,
    Windsurf,
}

pub const ALL_FORMATS: &[OutputFormat] = &[
    OutputFormat::Agents,
    OutputFormat::Claude,
    OutputFormat::Cursor,
    OutputFormat::Copilot,
    OutputFormat::Windsurf,
];

impl OutputFormat {
    /// Display name of the generated file
    pub fn name(&self) -> &'static str {
        match self {
            Self::Agents => "AGENTS.md",
            Self::Claude => "CLAUDE.md",
            Self::Cursor => ".cursorrules",
            Self::Copilot => "copilot-instructions.md",
            Self::Windsurf => ".windsurfrules",
        }
    }

    /// Path of the generated file relative to the target directory
    pub fn output_path(&self, dir: &Path) -> PathBuf {
        match self {
            Self::Agents => dir.join("AGENTS.md"),
            Self::Claude => dir.join("CLAUDE.md"),
            Self::Cursor => dir.join(".cursorrules"),
            Self::Copilot => dir.join(".github").join("copilot-instructions.md"),
            Self::Windsurf => dir.join(".windsurfrules"),
        }
    }

    /// Tag stored in the embedded metadata comment
    pub fn meta_label(&self) -> &'static str {
        match self {
            Self::Agents => "agents",
            Self::Claude => "claude",
            Self::Cursor => "cursor",
            Self::Copilot => "copilot",
            Self::Windsurf => "windsurf",
        }
    }
}

/// Resolve a CLI format argument to the list of formats to generate
pub fn resolve_formats(format: &str) -> Result<Vec<OutputFormat>> {
    match format {
        "all" => Ok(ALL_FORMATS.to_vec()),
        "agents" => Ok(vec![OutputFormat::Agents]),
        "claude" => Ok(vec![OutputFormat::Claude]),
        "cursor" => Ok(vec![OutputFormat::Cursor]),
        "copilot" => Ok(vec![OutputFormat::Copilot]),
        "windsurf" => Ok(vec![OutputFormat::Windsurf]),
        other => Err(AgentseedError::Config(format!(
            "Unknown format '{}'. Supported: agents, claude, cursor, copilot, windsurf, all",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all() {
        let formats = resolve_formats("all").unwrap();
        assert_eq!(formats.len(), 5);
    }

    #[test]
    fn test_resolve_single() {
        assert_eq!(resolve_formats("claude").unwrap(), vec![OutputFormat::Claude]);
        assert!(resolve_formats("markdown").is_err());
    }

    #[test]
    fn test_copilot_nested_path() {
        let path = OutputFormat::Copilot.output_path(Path::new("repo"));
        assert_eq!(path, Path::new("repo/.github/copilot-instructions.md"));
    }
}
