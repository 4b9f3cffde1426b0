//! Pattern Detector
//!
//! Naming-convention and file-organization classifiers plus monorepo and
//! config/CI file discovery. Both classifiers pick a single label via
//! majority/precedence rules so renderers never see conflicting conventions.

use glob::glob;
use std::collections::BTreeSet;
use std::path::Path;

use super::walk::{path_depth, RepoWalker};
use crate::types::{FileOrganization, NamingConvention, PatternInfo};

/// Config files surfaced by literal presence check at the root
const CONFIG_FILES: &[&str] = &[
    "tsconfig.json",
    "jsconfig.json",
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    ".eslintrc.yml",
    "eslint.config.js",
    "eslint.config.mjs",
    ".prettierrc",
    ".prettierrc.js",
    ".prettierrc.json",
    "prettier.config.js",
    ".editorconfig",
    "biome.json",
    ".env.example",
    "docker-compose.yml",
    "docker-compose.yaml",
    "Dockerfile",
    "pyproject.toml",
    "setup.py",
    "setup.cfg",
    "Cargo.toml",
    "go.mod",
    "Gemfile",
    "composer.json",
];

/// CI descriptors, globbed so hidden directories are found
const CI_PATTERNS: &[&str] = &[
    ".github/workflows/*.yml",
    ".github/workflows/*.yaml",
    ".gitlab-ci.yml",
    "Jenkinsfile",
    ".circleci/config.yml",
    ".travis.yml",
    "bitbucket-pipelines.yml",
];

const MONOREPO_MARKERS: &[&str] = &["lerna.json", "pnpm-workspace.yaml", "turbo.json", "nx.json"];

const FEATURE_DIRS: &[&str] = &["features", "modules", "domains", "pages", "routes"];

const MODULE_DIRS: &[&str] = &[
    "router",
    "routers",
    "middleware",
    "middlewares",
    "adapter",
    "adapters",
    "helper",
    "helpers",
    "plugin",
    "plugins",
    "handler",
    "handlers",
    "client",
    "utils",
    "hooks",
    "providers",
];

const LAYER_DIRS: &[&str] = &["controllers", "services", "models", "repositories"];

/// Detect naming, organization, monorepo, and config/CI conventions at `root`
pub fn detect_patterns(root: &Path, ignore: &[String]) -> PatternInfo {
    // Bounded-depth sample of source files under src/
    let source_files: Vec<String> = RepoWalker::new(root.join("src"), ignore)
        .with_max_depth(3)
        .files()
        .into_iter()
        .map(|f| format!("src/{f}"))
        .collect();

    PatternInfo {
        naming_convention: detect_naming_convention(&source_files),
        file_organization: detect_file_organization(root, ignore, &source_files),
        has_monorepo: detect_monorepo(root),
        config_files: CONFIG_FILES
            .iter()
            .filter(|f| root.join(f).exists())
            .map(|f| f.to_string())
            .collect(),
        ci_files: discover_ci_files(root),
    }
}

// =============================================================================
// Naming convention
// =============================================================================

/// Classify sampled basenames (extension stripped) and pick the plurality
/// class. "Mixed" when nothing classified or the plurality is below 50%.
/// Exact ties break kebab > snake > Pascal > camel.
fn detect_naming_convention(files: &[String]) -> NamingConvention {
    let mut camel = 0usize;
    let mut snake = 0usize;
    let mut kebab = 0usize;
    let mut pascal = 0usize;

    for file in files {
        let basename = file.rsplit('/').next().unwrap_or(file);
        let stem = basename.rsplit_once('.').map(|(s, _)| s).unwrap_or(basename);

        if stem.contains('_') {
            snake += 1;
        } else if stem.contains('-') {
            kebab += 1;
        } else if stem.starts_with(|c: char| c.is_ascii_uppercase()) {
            pascal += 1;
        } else if has_camel_transition(stem) {
            camel += 1;
        }
        // names matching no rule are not counted
    }

    let total = camel + snake + kebab + pascal;
    if total == 0 {
        return NamingConvention::Mixed;
    }

    let max = camel.max(snake).max(kebab).max(pascal);
    if (max as f64) / (total as f64) < 0.5 {
        return NamingConvention::Mixed;
    }

    if max == kebab {
        NamingConvention::Kebab
    } else if max == snake {
        NamingConvention::Snake
    } else if max == pascal {
        NamingConvention::Pascal
    } else {
        NamingConvention::Camel
    }
}

fn has_camel_transition(name: &str) -> bool {
    name.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_lowercase() && w[1].is_ascii_uppercase())
}

// =============================================================================
// File organization
// =============================================================================

/// Strict precedence, first match wins:
/// feature dirs → ≥2 module dirs → ≥2 layer dirs → components →
/// ≥3 src subdirs → flat.
fn detect_file_organization(
    root: &Path,
    ignore: &[String],
    source_files: &[String],
) -> FileOrganization {
    let top_dirs: BTreeSet<String> = RepoWalker::new(root, ignore)
        .with_max_depth(1)
        .dirs()
        .into_iter()
        .collect();

    let src_sub_dirs: BTreeSet<String> = source_files
        .iter()
        .filter(|f| path_depth(f) > 1)
        .filter_map(|f| f.split('/').nth(1))
        .map(|d| d.to_string())
        .collect();

    let has = |name: &str| top_dirs.contains(name) || src_sub_dirs.contains(name);

    if FEATURE_DIRS.iter().any(|d| has(d)) {
        return FileOrganization::FeatureBased;
    }

    let module_count = MODULE_DIRS.iter().filter(|d| has(d)).count();
    if module_count >= 2 {
        return FileOrganization::ModuleBased;
    }

    let layer_count = LAYER_DIRS.iter().filter(|d| has(d)).count();
    if layer_count >= 2 {
        return FileOrganization::LayerBased;
    }

    if has("components") {
        return FileOrganization::ComponentBased;
    }

    if src_sub_dirs.len() >= 3 {
        return FileOrganization::DomainBased;
    }

    FileOrganization::Flat
}

// =============================================================================
// Monorepo and CI discovery
// =============================================================================

fn detect_monorepo(root: &Path) -> bool {
    if MONOREPO_MARKERS.iter().any(|m| root.join(m).exists()) {
        return true;
    }
    ["packages", "apps"]
        .iter()
        .any(|ws| workspace_has_package(root, ws))
}

/// True if `<workspace>/*/package.json` matches at least one path
fn workspace_has_package(root: &Path, workspace: &str) -> bool {
    let Ok(entries) = std::fs::read_dir(root.join(workspace)) else {
        return false;
    };
    entries
        .filter_map(|e| e.ok())
        .any(|e| e.path().join("package.json").is_file())
}

fn discover_ci_files(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    for pattern in CI_PATTERNS {
        let full = root.join(pattern);
        let Some(full) = full.to_str() else { continue };
        let Ok(paths) = glob(full) else { continue };
        for path in paths.filter_map(|p| p.ok()) {
            if let Ok(relative) = path.strip_prefix(root) {
                found.push(relative.to_string_lossy().replace('\\', "/"));
            }
        }
    }
    found
}

// =============================================================================
// Tests
// =============================================================================
