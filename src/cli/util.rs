//! Command Helpers
//!
//! Small filesystem and terminal helpers shared by the CLI commands.

use std::fs;
use std::path::Path;

use crate::ai::UsageTracker;
use crate::types::Result;

/// Read an existing generated file, `None` when absent or unreadable
pub fn read_existing(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok()
}

/// Write a generated document, creating parent directories as needed
/// (the Copilot format lives under `.github/`)
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Print the accumulated token usage, if any LLM calls were made
pub fn print_usage(tracker: &UsageTracker) {
    let summary = tracker.summary();
    if !summary.is_empty() {
        println!("{}", summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_output_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".github").join("copilot-instructions.md");

        write_output(&path, "content").unwrap();
        assert_eq!(read_existing(&path).unwrap(), "content");
    }

    #[test]
    fn test_read_existing_absent() {
        let temp = TempDir::new().unwrap();
        assert!(read_existing(&temp.path().join("AGENTS.md")).is_none());
    }
}
