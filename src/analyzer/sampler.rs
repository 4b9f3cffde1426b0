//! File Sampler
//!
//! Picks a bounded set of representative files for LLM context, walking
//! priority tiers (entry → config → source → test) until the file or byte
//! budget is exhausted. Oversized and binary files are skipped.

use glob::{MatchOptions, Pattern};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::walk::RepoWalker;
use crate::types::{SamplePriority, SampledFile};

/// Per-file size ceiling; anything larger is never sampled
const MAX_FILE_SIZE: u64 = 32768;

const PRIORITY_TIERS: &[(SamplePriority, &[&str])] = &[
    (
        SamplePriority::Entry,
        &[
            "src/index.{ts,tsx,js,jsx}",
            "src/main.{ts,tsx,js,jsx}",
            "src/app.{ts,tsx,js,jsx}",
            "src/cli.{ts,tsx,js,jsx}",
            "index.{ts,tsx,js,jsx}",
            "main.{ts,tsx,js,jsx,py,go,rs}",
            "app.{ts,tsx,js,jsx,py}",
            "server.{ts,js}",
            "manage.py",
            "cmd/main.go",
        ],
    ),
    (
        SamplePriority::Config,
        &[
            "package.json",
            "tsconfig.json",
            "pyproject.toml",
            "Cargo.toml",
            "go.mod",
            "Makefile",
            "Dockerfile",
            "docker-compose.yml",
            ".env.example",
            "dbt_project.yml",
            "profiles.yml",
            "airflow.cfg",
            "alembic.ini",
        ],
    ),
    (
        SamplePriority::Source,
        &[
            "src/**/*.{ts,tsx,js,jsx,py,go,rs,java,rb}",
            "lib/**/*.{ts,tsx,js,jsx,py,go,rs,java,rb}",
            "app/**/*.{ts,tsx,js,jsx,py,rb}",
            "models/**/*.sql",
            "dags/**/*.py",
            "sql/**/*.sql",
            "queries/**/*.sql",
            "macros/**/*.sql",
            "staging/**/*.sql",
            "marts/**/*.sql",
            "transforms/**/*.{sql,py}",
            "pipelines/**/*.{py,yml,yaml}",
            "etl/**/*.{py,sql}",
        ],
    ),
    (
        SamplePriority::Test,
        &[
            "tests/**/*.{ts,tsx,js,jsx,py}",
            "test/**/*.{ts,tsx,js,jsx,py}",
            "**/*.test.{ts,tsx,js,jsx}",
            "**/*.spec.{ts,tsx,js,jsx}",
            "**/*_test.{go,py}",
        ],
    ),
];

const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "svg", "woff", "woff2", "ttf", "eot", "zip", "tar", "gz",
    "bz2", "pdf", "doc", "docx", "exe", "dll", "so", "dylib", "lock", "lockb",
];

/// Sample up to `max_files` files within `max_budget` total bytes
pub fn sample_files(
    root: &Path,
    ignore: &[String],
    max_files: usize,
    max_budget: usize,
) -> Vec<SampledFile> {
    let files = RepoWalker::new(root, ignore).files();

    let options = MatchOptions {
        require_literal_separator: true,
        ..MatchOptions::default()
    };

    let mut sampled: Vec<SampledFile> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut total_size = 0usize;

    'tiers: for (priority, patterns) in PRIORITY_TIERS {
        for pattern in *patterns {
            if sampled.len() >= max_files || total_size >= max_budget {
                break 'tiers;
            }
            let globs = expand_braces(pattern);

            for file in &files {
                if sampled.len() >= max_files || total_size >= max_budget {
                    break 'tiers;
                }
                if seen.contains(file.as_str()) || is_binary(file) {
                    continue;
                }
                if !globs.iter().any(|g| g.matches_with(file, options)) {
                    continue;
                }

                let full_path = root.join(file);
                let Ok(meta) = fs::metadata(&full_path) else {
                    continue;
                };
                if meta.len() > MAX_FILE_SIZE {
                    continue;
                }
                let Ok(content) = fs::read_to_string(&full_path) else {
                    continue;
                };

                let size_bytes = content.len();
                if total_size + size_bytes > max_budget {
                    continue;
                }

                seen.insert(file.as_str());
                total_size += size_bytes;
                sampled.push(SampledFile {
                    path: file.clone(),
                    content,
                    priority: *priority,
                    size_bytes,
                });
            }
        }
    }

    sampled
}

/// Expand one level of `{a,b,c}` alternation into plain glob patterns
fn expand_braces(pattern: &str) -> Vec<Pattern> {
    let mut expanded = vec![String::new()];
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let prefix = &rest[..open];
        let alternatives: Vec<&str> = rest[open + 1..open + close].split(',').collect();
        expanded = expanded
            .iter()
            .flat_map(|base| {
                alternatives
                    .iter()
                    .map(move |alt| format!("{base}{prefix}{alt}"))
            })
            .collect();
        rest = &rest[open + close + 1..];
    }

    expanded
        .into_iter()
        .map(|p| format!("{p}{rest}"))
        .filter_map(|p| Pattern::new(&p).ok())
        .collect()
}

fn is_binary(file: &str) -> bool {
    file.rsplit_once('.')
        .map(|(_, ext)| BINARY_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_priority_order() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/index.ts", "export {};");
        write(temp.path(), "package.json", "{}");
        write(temp.path(), "src/util/helpers.ts", "export const x = 1;");
        write(temp.path(), "tests/helpers.test.ts", "test();");

        let sampled = sample_files(temp.path(), &[], 10, 65536);
        assert_eq!(sampled[0].path, "src/index.ts");
        assert_eq!(sampled[0].priority, SamplePriority::Entry);
        assert_eq!(sampled[1].path, "package.json");
        assert_eq!(sampled[1].priority, SamplePriority::Config);
        let last = sampled.last().unwrap();
        assert_eq!(last.priority, SamplePriority::Test);
    }

    #[test]
    fn test_max_files_cap() {
        let temp = TempDir::new().unwrap();
        for i in 0..10 {
            write(temp.path(), &format!("src/mod{i}.ts"), "export {};");
        }

        let sampled = sample_files(temp.path(), &[], 3, 65536);
        assert_eq!(sampled.len(), 3);
    }

    #[test]
    fn test_budget_skips_files_that_overflow() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/big.ts", &"x".repeat(100));
        write(temp.path(), "src/small.ts", "ok");

        let sampled = sample_files(temp.path(), &[], 10, 50);
        assert_eq!(sampled.len(), 1);
        assert_eq!(sampled[0].path, "src/small.ts");
    }

    #[test]
    fn test_no_duplicate_paths_across_tiers() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/main.ts", "export {};");

        let sampled = sample_files(temp.path(), &[], 10, 65536);
        // matches both the entry tier and the source tier; sampled once
        let hits: Vec<_> = sampled.iter().filter(|s| s.path == "src/main.ts").collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].priority, SamplePriority::Entry);
    }

    #[test]
    fn test_binary_extensions_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "src/logo.svg", "<svg/>");
        write(temp.path(), "src/main.ts", "export {};");

        let sampled = sample_files(temp.path(), &[], 10, 65536);
        assert!(sampled.iter().all(|s| s.path != "src/logo.svg"));
    }

    #[test]
    fn test_expand_braces() {
        let globs = expand_braces("src/index.{ts,js}");
        assert_eq!(globs.len(), 2);
        let options = MatchOptions {
            require_literal_separator: true,
            ..MatchOptions::default()
        };
        assert!(globs.iter().any(|g| g.matches_with("src/index.ts", options)));
        assert!(globs.iter().any(|g| g.matches_with("src/index.js", options)));
        assert!(!globs.iter().any(|g| g.matches_with("src/index.py", options)));
    }
}
