//! Git Staleness Tracking
//!
//! Best-effort git plumbing behind the regeneration decision. A metadata tag
//! embedded as a trailing comment in each generated file records the commit
//! it was generated from; comparing it against the current SHA decides
//! whether a file is stale. All git failures degrade to "regenerate".

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Command;
use std::sync::LazyLock;

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!-- agentseed:meta (.+?) -->").unwrap());

/// Provenance recorded in every generated file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub sha: String,
    pub timestamp: String,
    pub format: String,
}

impl FileMeta {
    pub fn new(sha: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            sha: sha.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            format: format.into(),
        }
    }
}

fn git_stdout(cwd: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).current_dir(cwd).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn is_git_repo(cwd: &Path) -> bool {
    git_stdout(cwd, &["rev-parse", "--git-dir"]).is_some()
}

/// Current HEAD commit SHA, `None` outside a repository
pub fn head_sha(cwd: &Path) -> Option<String> {
    git_stdout(cwd, &["rev-parse", "HEAD"]).filter(|s| !s.is_empty())
}

/// Latest commit SHA touching `relative_path`, falling back to HEAD for
/// paths with no commits yet
pub fn path_sha(cwd: &Path, relative_path: &str) -> Option<String> {
    git_stdout(cwd, &["log", "-1", "--format=%H", "--", relative_path])
        .filter(|s| !s.is_empty())
        .or_else(|| head_sha(cwd))
}

/// Whether `relative_path` (or the whole tree) has staged or unstaged
/// changes. Assumes changes when git fails.
pub fn has_uncommitted_changes(cwd: &Path, relative_path: Option<&str>) -> bool {
    let mut args = vec!["status", "--porcelain"];
    if let Some(path) = relative_path {
        args.push("--");
        args.push(path);
    }
    match git_stdout(cwd, &args) {
        Some(status) => !status.is_empty(),
        None => true,
    }
}

/// Build the metadata comment embedded in generated files
pub fn build_meta_tag(meta: &FileMeta) -> String {
    // serialization of three plain strings cannot fail
    let json = serde_json::to_string(meta).unwrap_or_default();
    format!("<!-- agentseed:meta {} -->", json)
}

/// Parse metadata back out of an existing generated file
pub fn parse_meta_tag(content: &str) -> Option<FileMeta> {
    let captures = META_TAG.captures(content)?;
    serde_json::from_str(&captures[1]).ok()
}

/// Decide whether a generated file needs regeneration.
///
/// Uncommitted changes are only consulted when a `relative_path` is given:
/// at root level the generated files themselves show up as uncommitted,
/// so the HEAD SHA comparison alone is used there.
pub fn needs_regeneration(
    existing_content: Option<&str>,
    current_sha: Option<&str>,
    cwd: &Path,
    relative_path: Option<&str>,
) -> bool {
    let (Some(content), Some(current_sha)) = (existing_content, current_sha) else {
        return true;
    };

    let Some(meta) = parse_meta_tag(content) else {
        return true;
    };

    if meta.sha != current_sha {
        return true;
    }

    if let Some(path) = relative_path {
        if has_uncommitted_changes(cwd, Some(path)) {
            return true;
        }
    }

    false
}

// =============================================================================
// Tests
// =============================================================================
