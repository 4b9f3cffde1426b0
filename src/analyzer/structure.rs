//! Structure Mapper
//!
//! Depth-bounded tree builder and entry-point locator. The tree is truncated
//! for readability (directories to the first 50, depth limits per entry type)
//! and lexicographically sorted by path.

use glob::{MatchOptions, Pattern};
use std::path::Path;
use std::sync::LazyLock;

use super::walk::{path_depth, RepoWalker};
use crate::types::{DirectoryEntry, EntryType, StructureInfo};

/// Conventional entry-file globs, in priority order. All matches are
/// returned; there is no ranking among them.
const ENTRY_POINT_PATTERNS: &[&str] = &[
    "src/index.*",
    "src/main.*",
    "src/app.*",
    "src/cli.*",
    "index.*",
    "main.*",
    "app.*",
    "server.*",
    "src/server.*",
    "cmd/main.*",
    "lib/index.*",
    "manage.py",
    "app.py",
    "main.py",
    "dbt_project.yml",
    "airflow.cfg",
    "alembic.ini",
];

static ENTRY_POINT_GLOBS: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    ENTRY_POINT_PATTERNS
        .iter()
        .map(|p| Pattern::new(p).unwrap())
        .collect()
});

const MAX_TREE_DIRS: usize = 50;
const MAX_FILE_DEPTH: usize = 2;
const MAX_DIR_DEPTH: usize = 3;

/// Build the depth-bounded structural summary of `root`
pub fn map_structure(root: &Path, ignore: &[String]) -> StructureInfo {
    let files = RepoWalker::new(root, ignore).with_max_depth(6).files();
    let dirs = RepoWalker::new(root, ignore).with_max_depth(4).dirs();

    let mut tree: Vec<DirectoryEntry> = Vec::new();

    for dir in dirs.iter().take(MAX_TREE_DIRS) {
        let depth = path_depth(dir);
        if depth <= MAX_DIR_DEPTH {
            tree.push(DirectoryEntry {
                path: dir.clone(),
                entry_type: EntryType::Directory,
                depth,
            });
        }
    }

    for file in &files {
        let depth = path_depth(file);
        if depth <= MAX_FILE_DEPTH {
            tree.push(DirectoryEntry {
                path: file.clone(),
                entry_type: EntryType::File,
                depth,
            });
        }
    }

    tree.sort_by(|a, b| a.path.cmp(&b.path));

    // `*` must not cross separators, so src/index.* stays one level deep
    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };

    let mut entry_points: Vec<String> = Vec::new();
    for pattern in ENTRY_POINT_GLOBS.iter() {
        for file in &files {
            if pattern.matches_with(file, options) && !entry_points.contains(file) {
                entry_points.push(file.clone());
            }
        }
    }

    StructureInfo {
        total_files: files.len(),
        total_dirs: dirs.len(),
        tree,
        entry_points,
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

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_tree_sorted_and_depth_bounded() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/lib/core/deep/file.rs");
        touch(temp.path(), "src/main.rs");
        touch(temp.path(), "README.md");

        let structure = map_structure(temp.path(), &[]);

        for pair in structure.tree.windows(2) {
            assert!(pair[0].path <= pair[1].path);
        }
        for entry in &structure.tree {
            match entry.entry_type {
                EntryType::File => assert!(entry.depth <= 2),
                EntryType::Directory => assert!(entry.depth <= 3),
            }
        }
        // deep file exceeds the file depth bound but still counts
        assert!(!structure.tree.iter().any(|e| e.path.contains("deep/file")));
        assert_eq!(structure.total_files, 3);
    }

    #[test]
    fn test_entry_points_matched_and_deduplicated() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/index.ts");
        touch(temp.path(), "main.py");
        touch(temp.path(), "src/util.ts");

        let structure = map_structure(temp.path(), &[]);
        assert!(structure.entry_points.contains(&"src/index.ts".to_string()));
        assert!(structure.entry_points.contains(&"main.py".to_string()));
        assert!(!structure.entry_points.contains(&"src/util.ts".to_string()));

        let unique: std::collections::BTreeSet<_> = structure.entry_points.iter().collect();
        assert_eq!(unique.len(), structure.entry_points.len());
    }

    #[test]
    fn test_glob_star_does_not_cross_separator() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/nested/index.ts");

        let structure = map_structure(temp.path(), &[]);
        assert!(structure.entry_points.is_empty());
    }

    #[test]
    fn test_ignored_dirs_excluded_from_totals() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/main.rs");
        touch(temp.path(), "node_modules/pkg/index.js");

        let ignore = vec!["node_modules".to_string()];
        let structure = map_structure(temp.path(), &ignore);
        assert_eq!(structure.total_files, 1);
    }
}
