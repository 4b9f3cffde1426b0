//! Subfolder Scanner
//!
//! Applies the qualification heuristics across the directory tree and prunes
//! candidates whose ancestor already qualifies, so a monorepo with nested
//! packages yields one scoped summary per package, not one per nesting level.

mod heuristics;

pub use heuristics::{qualify_subfolder, CONFIG_INDICATORS};

use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::analyzer::walk::RepoWalker;
use crate::types::SubfolderCandidate;

/// Detect every directory under `root` that deserves its own scoped
/// analysis, deduplicated to the shallowest qualifying ancestor.
pub fn detect_subfolders(root: &Path, ignore: &[String]) -> Vec<SubfolderCandidate> {
    let dirs = RepoWalker::new(root, ignore).dirs();

    let candidates: Vec<SubfolderCandidate> = dirs
        .iter()
        .filter_map(|dir| {
            let candidate = qualify_subfolder(root, dir)?;
            debug!(
                "Subfolder candidate: {} ({})",
                candidate.relative_path, candidate.reason
            );
            Some(candidate)
        })
        .collect();

    deduplicate_candidates(candidates)
}

/// Remove any candidate with a proper path-prefix ancestor in the set
fn deduplicate_candidates(candidates: Vec<SubfolderCandidate>) -> Vec<SubfolderCandidate> {
    let paths: HashSet<String> = candidates.iter().map(|c| c.relative_path.clone()).collect();

    candidates
        .into_iter()
        .filter(|c| {
            let parts: Vec<&str> = c.relative_path.split('/').collect();
            (1..parts.len()).all(|i| !paths.contains(&parts[..i].join("/")))
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_nested_package_deduplicated_to_shallowest() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "packages/ui/package.json");
        for i in 0..5 {
            touch(temp.path(), &format!("packages/ui/src/c{i}.tsx"));
        }

        let candidates = detect_subfolders(temp.path(), &[]);
        let paths: Vec<&str> = candidates.iter().map(|c| c.relative_path.as_str()).collect();
        assert!(paths.contains(&"packages/ui"));
        assert!(!paths.contains(&"packages/ui/src"));
    }

    #[test]
    fn test_siblings_both_survive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "packages/ui/package.json");
        touch(temp.path(), "packages/api/package.json");

        let candidates = detect_subfolders(temp.path(), &[]);
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn test_denylisted_dirs_never_candidates() {
        let temp = TempDir::new().unwrap();
        for i in 0..10 {
            touch(temp.path(), &format!("tests/unit/f{i}.py"));
        }

        let candidates = detect_subfolders(temp.path(), &[]);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_ignore_names_prune_scan() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "node_modules/dep/package.json");

        let ignore = vec!["node_modules".to_string()];
        assert!(detect_subfolders(temp.path(), &ignore).is_empty());
    }

    proptest! {
        /// No candidate's path is a strict path-prefix of another's
        #[test]
        fn prop_dedup_removes_all_prefixes(
            raw in proptest::collection::vec("[a-c]{1,2}(/[a-c]{1,2}){0,3}", 0..12)
        ) {
            let candidates: Vec<SubfolderCandidate> = raw
                .into_iter()
                .map(|p| SubfolderCandidate { relative_path: p, reason: "test".into() })
                .collect();

            let deduped = deduplicate_candidates(candidates);
            for a in &deduped {
                for b in &deduped {
                    let prefixed = b.relative_path.starts_with(&format!("{}/", a.relative_path));
                    prop_assert!(!prefixed, "{} is an ancestor of {}", a.relative_path, b.relative_path);
                }
            }
        }
    }
}
