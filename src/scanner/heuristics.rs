//! Subfolder Qualification Heuristics
//!
//! Decides whether a single directory deserves its own scoped analysis.
//! Evaluated in order, first true wins: denylisted path component →
//! disqualified; own manifest → qualifies; enough direct-child source
//! files → qualifies.

use std::fs;
use std::path::Path;

use crate::types::SubfolderCandidate;

/// Manifest files that mark a directory as its own sub-project
pub const CONFIG_INDICATORS: &[&str] = &[
    "package.json",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
    "setup.py",
    "Gemfile",
    "composer.json",
    "pom.xml",
    "build.gradle",
    "deno.json",
    "deno.jsonc",
];

#[rustfmt::skip]
const SOURCE_EXTENSIONS: &[&str] = &[
    // Web
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "vue", "svelte",
    // Systems
    "c", "cpp", "cc", "h", "hpp", "rs", "go", "zig",
    // JVM
    "java", "kt", "scala", "clj", "cljs",
    // Scripting
    "py", "rb", "php", "pl", "pm", "lua", "r",
    // Mobile
    "swift", "dart",
    // Functional
    "ex", "exs", "erl", "hs", "ml", "mli",
    // .NET
    "cs", "fs",
    // Shell
    "sh", "bash",
    // Data
    "sql",
];

/// Minimum direct-child source files for a directory to qualify without
/// a manifest
const MIN_SOURCE_FILES: usize = 5;

/// Directories that are never meaningful sub-projects, matched
/// case-insensitively against every path component
const NON_CODE_DIRS: &[&str] = &[
    "docs",
    "doc",
    "documentation",
    "examples",
    "example",
    "demos",
    "demo",
    "samples",
    "sample",
    "test",
    "tests",
    "testing",
    "__tests__",
    "spec",
    "specs",
    "benchmarks",
    "benchmark",
    "benches",
    "static",
    "assets",
    "public",
    "media",
    "fixtures",
    "scripts",
    "docker",
    "vendor",
];

/// Qualify `relative_path` (a '/'-separated path under `root`) for its own
/// scoped analysis. `None` means the directory does not qualify.
pub fn qualify_subfolder(root: &Path, relative_path: &str) -> Option<SubfolderCandidate> {
    for component in relative_path.split('/') {
        let lower = component.to_lowercase();
        if NON_CODE_DIRS.contains(&lower.as_str()) {
            return None;
        }
    }

    let dir = root.join(relative_path);

    for manifest in CONFIG_INDICATORS {
        if dir.join(manifest).is_file() {
            return Some(SubfolderCandidate {
                relative_path: relative_path.to_string(),
                reason: format!("Has own {manifest}"),
            });
        }
    }

    let source_count = count_source_files(&dir);
    if source_count >= MIN_SOURCE_FILES {
        return Some(SubfolderCandidate {
            relative_path: relative_path.to_string(),
            reason: format!("{source_count} source files"),
        });
    }

    None
}

/// Count source files (by extension) that are direct children of `dir`
fn count_source_files(dir: &Path) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };

    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .count()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_manifest_qualifies() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "packages/ui/package.json");

        let candidate = qualify_subfolder(temp.path(), "packages/ui").unwrap();
        assert_eq!(candidate.reason, "Has own package.json");
    }

    #[test]
    fn test_manifest_checked_before_source_count() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "svc/Cargo.toml");
        for i in 0..6 {
            touch(temp.path(), &format!("svc/f{i}.rs"));
        }

        let candidate = qualify_subfolder(temp.path(), "svc").unwrap();
        assert_eq!(candidate.reason, "Has own Cargo.toml");
    }

    #[test]
    fn test_source_file_threshold() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(temp.path(), &format!("core/f{i}.py"));
        }
        let candidate = qualify_subfolder(temp.path(), "core").unwrap();
        assert_eq!(candidate.reason, "5 source files");

        let sparse = TempDir::new().unwrap();
        for i in 0..4 {
            touch(sparse.path(), &format!("core/f{i}.py"));
        }
        assert!(qualify_subfolder(sparse.path(), "core").is_none());
    }

    #[test]
    fn test_nested_files_are_not_direct_children() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(temp.path(), &format!("core/nested/f{i}.py"));
        }
        assert!(qualify_subfolder(temp.path(), "core").is_none());
    }

    #[test]
    fn test_denylist_beats_everything() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "tests/unit/package.json");
        for i in 0..10 {
            touch(temp.path(), &format!("tests/unit/f{i}.py"));
        }

        assert!(qualify_subfolder(temp.path(), "tests/unit").is_none());
    }

    #[test]
    fn test_denylist_case_insensitive() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Docs/api/package.json");
        assert!(qualify_subfolder(temp.path(), "Docs/api").is_none());
    }

    #[test]
    fn test_non_source_files_not_counted() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            touch(temp.path(), &format!("data/f{i}.csv"));
        }
        assert!(qualify_subfolder(temp.path(), "data").is_none());
    }
}
