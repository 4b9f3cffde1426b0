//! Manifest Access
//!
//! Shared loaders for project manifests consulted by the command and
//! framework detectors. Every loader fails closed: a missing or unparseable
//! manifest reads as "absent", never as an error.

use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::trace;

/// Parsed `package.json` (only the fields the detectors consult)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub dependencies: HashMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: HashMap<String, String>,
    #[serde(default)]
    pub scripts: HashMap<String, String>,
}

impl PackageJson {
    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name) || self.dev_dependencies.contains_key(name)
    }

    pub fn has_dev_dependency(&self, name: &str) -> bool {
        self.dev_dependencies.contains_key(name)
    }
}

pub fn load_package_json(root: &Path) -> Option<PackageJson> {
    let content = fs::read_to_string(root.join("package.json")).ok()?;
    match serde_json::from_str(&content) {
        Ok(pkg) => Some(pkg),
        Err(e) => {
            trace!("Skipping malformed package.json: {}", e);
            None
        }
    }
}

pub fn load_pyproject(root: &Path) -> Option<toml::Value> {
    let content = fs::read_to_string(root.join("pyproject.toml")).ok()?;
    match content.parse::<toml::Value>() {
        Ok(value) => Some(value),
        Err(e) => {
            trace!("Skipping malformed pyproject.toml: {}", e);
            None
        }
    }
}

pub fn file_exists(root: &Path, relative: &str) -> bool {
    root.join(relative).exists()
}

// =============================================================================
// Python dependency set
// =============================================================================

/// Merged, case-normalized Python dependency names from every descriptor the
/// ecosystem commonly uses. Version specifiers, extras, and environment
/// markers are stripped.
pub fn python_deps(root: &Path) -> BTreeSet<String> {
    let mut deps = BTreeSet::new();

    if let Ok(content) = fs::read_to_string(root.join("requirements.txt")) {
        for line in content.lines() {
            if let Some(name) = normalize_requirement(line) {
                deps.insert(name);
            }
        }
    }

    if let Some(pyproject) = load_pyproject(root) {
        if let Some(list) = pyproject
            .get("project")
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_array())
        {
            for entry in list {
                if let Some(name) = entry.as_str().and_then(normalize_requirement) {
                    deps.insert(name);
                }
            }
        }

        if let Some(table) = pyproject
            .get("tool")
            .and_then(|t| t.get("poetry"))
            .and_then(|p| p.get("dependencies"))
            .and_then(|d| d.as_table())
        {
            for key in table.keys() {
                let lower = key.to_lowercase();
                // "python" is a version constraint, not a package
                if lower != "python" {
                    deps.insert(lower);
                }
            }
        }
    }

    if let Ok(content) = fs::read_to_string(root.join("setup.cfg")) {
        for name in parse_install_requires(&content) {
            deps.insert(name);
        }
    }

    if let Ok(content) = fs::read_to_string(root.join("Pipfile")) {
        if let Ok(pipfile) = content.parse::<toml::Value>() {
            if let Some(table) = pipfile.get("packages").and_then(|p| p.as_table()) {
                for key in table.keys() {
                    deps.insert(key.to_lowercase());
                }
            }
        }
    }

    deps
}

/// Strip a PEP 508 requirement line down to its lowercase package name.
/// Returns `None` for blank lines, comments, and pip option lines.
pub fn normalize_requirement(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('-') {
        return None;
    }

    let end = trimmed
        .find(|c: char| matches!(c, '[' | '<' | '>' | '=' | '!' | '~' | ';' | '@' | ' '))
        .unwrap_or(trimmed.len());
    let name = trimmed[..end].trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

/// Line-oriented `install_requires` extraction from setup.cfg: the entries
/// follow the key as indented lines (or inline after `=`) until the next
/// unindented line.
fn parse_install_requires(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_block = false;

    for line in content.lines() {
        if in_block {
            if line.starts_with(' ') || line.starts_with('\t') {
                if let Some(name) = normalize_requirement(line) {
                    names.push(name);
                }
                continue;
            }
            in_block = false;
        }
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix("install_requires") {
            in_block = true;
            if let Some(inline) = rest.trim_start().strip_prefix('=') {
                if let Some(name) = normalize_requirement(inline) {
                    names.push(name);
                }
            }
        }
    }

    names
}

// =============================================================================
// Package-manager prefix inference
// =============================================================================

/// Python lockfiles in precedence order, each mapped to the runner prefix
/// applied to every Python-ecosystem command for the root.
const PYTHON_LOCKFILES: &[(&str, &str)] = &[
    ("uv.lock", "uv run "),
    ("poetry.lock", "poetry run "),
    ("Pipfile.lock", "pipenv run "),
    ("pdm.lock", "pdm run "),
];

/// Infer the Python command prefix from whichever lockfile is present.
/// No lockfile means bare invocation.
pub fn python_prefix(root: &Path) -> &'static str {
    PYTHON_LOCKFILES
        .iter()
        .find(|(lockfile, _)| file_exists(root, lockfile))
        .map(|(_, prefix)| *prefix)
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_package_json() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies":{"react":"^18.0.0"},"devDependencies":{"vitest":"^1.0.0"},"scripts":{"build":"vite build"}}"#,
        )
        .unwrap();

        let pkg = load_package_json(temp.path()).unwrap();
        assert!(pkg.has_dependency("react"));
        assert!(pkg.has_dependency("vitest"));
        assert!(pkg.has_dev_dependency("vitest"));
        assert!(!pkg.has_dev_dependency("react"));
        assert_eq!(pkg.scripts["build"], "vite build");
    }

    #[test]
    fn test_malformed_package_json_is_absent() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("package.json"), "{not json").unwrap();
        assert!(load_package_json(temp.path()).is_none());
    }

    #[test]
    fn test_normalize_requirement() {
        assert_eq!(normalize_requirement("Django==4.2"), Some("django".into()));
        assert_eq!(
            normalize_requirement("uvicorn[standard]>=0.23"),
            Some("uvicorn".into())
        );
        assert_eq!(
            normalize_requirement("requests ; python_version < '3.12'"),
            Some("requests".into())
        );
        assert_eq!(normalize_requirement("# comment"), None);
        assert_eq!(normalize_requirement("-r base.txt"), None);
        assert_eq!(normalize_requirement(""), None);
    }

    #[test]
    fn test_python_deps_merges_sources() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "pandas>=2.0\nFlask\n").unwrap();
        fs::write(
            temp.path().join("pyproject.toml"),
            "[project]\ndependencies = [\"fastapi>=0.100\"]\n\n[tool.poetry.dependencies]\npython = \"^3.11\"\ndagster = \"^1.5\"\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("Pipfile"),
            "[packages]\nprefect = \"*\"\n",
        )
        .unwrap();

        let deps = python_deps(temp.path());
        assert!(deps.contains("pandas"));
        assert!(deps.contains("flask"));
        assert!(deps.contains("fastapi"));
        assert!(deps.contains("dagster"));
        assert!(deps.contains("prefect"));
        assert!(!deps.contains("python"));
    }

    #[test]
    fn test_setup_cfg_install_requires() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("setup.cfg"),
            "[options]\ninstall_requires =\n    numpy>=1.24\n    scipy\npackages = find:\n",
        )
        .unwrap();

        let deps = python_deps(temp.path());
        assert!(deps.contains("numpy"));
        assert!(deps.contains("scipy"));
        assert!(!deps.contains("packages"));
    }

    #[test]
    fn test_python_prefix_precedence() {
        let temp = TempDir::new().unwrap();
        assert_eq!(python_prefix(temp.path()), "");

        fs::write(temp.path().join("pdm.lock"), "").unwrap();
        assert_eq!(python_prefix(temp.path()), "pdm run ");

        fs::write(temp.path().join("poetry.lock"), "").unwrap();
        assert_eq!(python_prefix(temp.path()), "poetry run ");

        fs::write(temp.path().join("uv.lock"), "").unwrap();
        assert_eq!(python_prefix(temp.path()), "uv run ");
    }
}
