//! Repository Traversal
//!
//! Exclusion-aware file and directory enumeration shared by the detectors.
//! Hidden entries are skipped, gitignore rules are respected, and symlinks
//! are never followed.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Walks a repository subtree, honoring a caller-supplied list of
/// directory names to exclude (matched against any path component).
pub struct RepoWalker {
    root: PathBuf,
    ignore_names: Vec<String>,
    max_depth: Option<usize>,
}

impl RepoWalker {
    pub fn new<P: AsRef<Path>>(root: P, ignore: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_names: ignore.to_vec(),
            max_depth: None,
        }
    }

    /// Bound traversal depth (number of path components below the root)
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Relative file paths ('/'-separated), lexicographically sorted
    pub fn files(&self) -> Vec<String> {
        let mut files: Vec<String> = self
            .walk()
            .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|e| self.relative(e.path()))
            .collect();
        files.sort();
        files
    }

    /// Relative directory paths below the root, lexicographically sorted
    pub fn dirs(&self) -> Vec<String> {
        let mut dirs: Vec<String> = self
            .walk()
            .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|e| self.relative(e.path()))
            .filter(|p| !p.is_empty())
            .collect();
        dirs.sort();
        dirs
    }

    fn walk(&self) -> impl Iterator<Item = ignore::DirEntry> {
        let ignore_names = self.ignore_names.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false);

        if let Some(depth) = self.max_depth {
            builder.max_depth(Some(depth));
        }

        builder
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                if !is_dir {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !ignore_names.iter().any(|ig| ig == name))
                    .unwrap_or(true)
            })
            .build()
            .filter_map(|e| e.ok())
    }

    fn relative(&self, path: &Path) -> Option<String> {
        path.strip_prefix(&self.root)
            .ok()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
    }
}

/// Depth of a relative path: number of '/' separators
pub fn path_depth(relative: &str) -> usize {
    relative.matches('/').count()
}

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
    fn test_files_sorted_and_relative() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.rs");
        touch(temp.path(), "a/c.rs");

        let files = RepoWalker::new(temp.path(), &[]).files();
        assert_eq!(files, vec!["a/c.rs".to_string(), "b.rs".to_string()]);
    }

    #[test]
    fn test_ignore_names_prune_subtrees() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "src/main.rs");
        touch(temp.path(), "node_modules/pkg/index.js");

        let ignore = vec!["node_modules".to_string()];
        let files = RepoWalker::new(temp.path(), &ignore).files();
        assert_eq!(files, vec!["src/main.rs".to_string()]);
    }

    #[test]
    fn test_hidden_entries_skipped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".hidden/secret.txt");
        touch(temp.path(), "visible.txt");

        let files = RepoWalker::new(temp.path(), &[]).files();
        assert_eq!(files, vec!["visible.txt".to_string()]);
    }

    #[test]
    fn test_max_depth_bounds_traversal() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a/b/c/deep.rs");
        touch(temp.path(), "shallow.rs");

        let files = RepoWalker::new(temp.path(), &[]).with_max_depth(2).files();
        assert_eq!(files, vec!["shallow.rs".to_string()]);
    }

    #[test]
    fn test_path_depth() {
        assert_eq!(path_depth("a.rs"), 0);
        assert_eq!(path_depth("src/a.rs"), 1);
        assert_eq!(path_depth("src/lib/a.rs"), 2);
    }
}
