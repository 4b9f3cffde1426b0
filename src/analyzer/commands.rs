//! Command Extractor
//!
//! Unions the commands inferable from every recognized ecosystem manifest at
//! the root. Each per-ecosystem probe is independent and fails closed: a
//! missing or malformed manifest contributes nothing and never aborts the
//! sibling probes.
//!
//! The Python package-manager prefix is computed once per root from lockfile
//! precedence (uv → poetry → pipenv → pdm) and threaded into every
//! Python-ecosystem probe.

use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::manifest::{self, file_exists, PackageJson};
use crate::types::CommandInfo;

/// package.json script names surfaced regardless of prefix rules
const IMPORTANT_SCRIPTS: &[&str] = &[
    "dev", "start", "build", "test", "lint", "format", "preview", "serve", "watch", "check",
    "typecheck", "e2e", "test:unit", "test:e2e", "test:watch",
];

static MAKE_TARGET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Za-z_][\w-]*):").unwrap());

/// Extract every command inferable from the manifests at `root`
pub fn extract_commands(root: &Path) -> Vec<CommandInfo> {
    let pkg = manifest::load_package_json(root);
    let py_deps = manifest::python_deps(root);
    let prefix = manifest::python_prefix(root);

    let mut commands = Vec::new();
    commands.extend(from_package_json(root, pkg.as_ref()));
    commands.extend(from_makefile(root));
    commands.extend(from_python_project(root, prefix));
    commands.extend(from_cargo(root));
    commands.extend(from_dbt(root));
    commands.extend(from_airflow(root));
    commands.extend(from_dagster(&py_deps, prefix));
    commands.extend(from_prefect(&py_deps, prefix));
    commands.extend(from_spark(&py_deps, prefix));
    commands.extend(from_alembic(root, &py_deps, prefix));
    commands.extend(from_great_expectations(root, &py_deps, prefix));
    commands.extend(from_mlflow(&py_deps, prefix));
    commands.extend(from_dvc(root, &py_deps, prefix));
    commands.extend(from_jupyter(&py_deps, prefix));
    commands
}

// =============================================================================
// Script-runner manifests
// =============================================================================

fn from_package_json(root: &Path, pkg: Option<&PackageJson>) -> Vec<CommandInfo> {
    let Some(pkg) = pkg else {
        return Vec::new();
    };

    // Lockfile decides the runner, precedence pnpm → yarn → bun
    let runner = if file_exists(root, "pnpm-lock.yaml") {
        "pnpm"
    } else if file_exists(root, "yarn.lock") {
        "yarn"
    } else if file_exists(root, "bun.lockb") || file_exists(root, "bun.lock") {
        "bun run"
    } else {
        "npm run"
    };

    let mut names: Vec<&String> = pkg
        .scripts
        .keys()
        .filter(|name| {
            IMPORTANT_SCRIPTS.contains(&name.as_str())
                || name.starts_with("test")
                || name.starts_with("build")
        })
        .collect();
    names.sort();

    names
        .into_iter()
        .map(|name| CommandInfo::new(name, format!("{runner} {name}"), "package.json scripts"))
        .collect()
}

fn from_makefile(root: &Path) -> Vec<CommandInfo> {
    let Ok(content) = fs::read_to_string(root.join("Makefile")) else {
        return Vec::new();
    };

    MAKE_TARGET
        .captures_iter(&content)
        .map(|c| c[1].to_string())
        .filter(|name| !name.starts_with('.') && !name.starts_with('_'))
        .map(|name| {
            let command = format!("make {name}");
            CommandInfo::new(name, command, "Makefile")
        })
        .collect()
}

// =============================================================================
// Python project manifest
// =============================================================================

fn from_python_project(root: &Path, prefix: &str) -> Vec<CommandInfo> {
    let mut commands = Vec::new();
    let pyproject = manifest::load_pyproject(root);

    if file_exists(root, "manage.py") {
        commands.push(CommandInfo::new(
            "runserver",
            format!("{prefix}python manage.py runserver"),
            "Django",
        ));
        commands.push(CommandInfo::new(
            "test",
            format!("{prefix}python manage.py test"),
            "Django",
        ));
    }

    let has_pytest_config = file_exists(root, "pytest.ini")
        || pyproject
            .as_ref()
            .and_then(|p| p.get("tool"))
            .and_then(|t| t.get("pytest"))
            .is_some();
    if has_pytest_config {
        commands.push(CommandInfo::new("test", format!("{prefix}pytest"), "pytest"));
    }

    if let Some(pyproject) = &pyproject {
        commands.extend(script_table(
            pyproject,
            &["project", "scripts"],
            |name| format!("{prefix}{name}"),
            "pyproject.toml scripts",
        ));
        commands.extend(script_table(
            pyproject,
            &["tool", "poetry", "scripts"],
            |name| format!("poetry run {name}"),
            "Poetry scripts",
        ));
        commands.extend(script_table(
            pyproject,
            &["tool", "poe", "tasks"],
            |name| format!("{prefix}poe {name}"),
            "poe tasks",
        ));
        commands.extend(script_table(
            pyproject,
            &["tool", "hatch", "envs", "default", "scripts"],
            |name| format!("hatch run {name}"),
            "hatch scripts",
        ));
    }

    commands
}

/// One command per key of a pyproject script table, in declaration order
fn script_table(
    pyproject: &toml::Value,
    path: &[&str],
    invocation: impl Fn(&str) -> String,
    source: &str,
) -> Vec<CommandInfo> {
    let mut node = pyproject;
    for key in path {
        match node.get(key) {
            Some(next) => node = next,
            None => return Vec::new(),
        }
    }
    let Some(table) = node.as_table() else {
        return Vec::new();
    };
    table
        .keys()
        .map(|name| CommandInfo::new(name, invocation(name), source))
        .collect()
}

// =============================================================================
// Fixed-command ecosystems
// =============================================================================

fn fixed(triples: &[(&str, String)], source: &str) -> Vec<CommandInfo> {
    triples
        .iter()
        .map(|(name, command)| CommandInfo::new(*name, command.clone(), source))
        .collect()
}

fn from_cargo(root: &Path) -> Vec<CommandInfo> {
    if !file_exists(root, "Cargo.toml") {
        return Vec::new();
    }
    fixed(
        &[
            ("build", "cargo build".to_string()),
            ("test", "cargo test".to_string()),
            ("run", "cargo run".to_string()),
            ("check", "cargo check".to_string()),
        ],
        "Cargo.toml",
    )
}

fn from_dbt(root: &Path) -> Vec<CommandInfo> {
    if !file_exists(root, "dbt_project.yml") {
        return Vec::new();
    }
    fixed(
        &[
            ("run", "dbt run".to_string()),
            ("test", "dbt test".to_string()),
            ("build", "dbt build".to_string()),
            ("compile", "dbt compile".to_string()),
            ("docs", "dbt docs generate && dbt docs serve".to_string()),
            ("seed", "dbt seed".to_string()),
            ("snapshot", "dbt snapshot".to_string()),
        ],
        "dbt",
    )
}

fn from_airflow(root: &Path) -> Vec<CommandInfo> {
    if !file_exists(root, "airflow.cfg") && !root.join("dags").is_dir() {
        return Vec::new();
    }
    fixed(
        &[
            ("webserver", "airflow webserver".to_string()),
            ("scheduler", "airflow scheduler".to_string()),
            ("test-dag", "airflow dags test <dag_id>".to_string()),
            ("list-dags", "airflow dags list".to_string()),
        ],
        "Airflow",
    )
}

fn from_dagster(py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    if !py_deps.contains("dagster") {
        return Vec::new();
    }
    fixed(&[("dev", format!("{prefix}dagster dev"))], "Dagster")
}

fn from_prefect(py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    if !py_deps.contains("prefect") {
        return Vec::new();
    }
    fixed(
        &[
            ("server", format!("{prefix}prefect server start")),
            ("deploy", format!("{prefix}prefect deploy")),
        ],
        "Prefect",
    )
}

fn from_spark(py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    if !py_deps.contains("pyspark") {
        return Vec::new();
    }
    fixed(
        &[("submit", format!("{prefix}spark-submit <script.py>"))],
        "Spark",
    )
}

fn from_alembic(root: &Path, py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    if !file_exists(root, "alembic.ini") && !py_deps.contains("alembic") {
        return Vec::new();
    }
    fixed(
        &[
            ("upgrade", format!("{prefix}alembic upgrade head")),
            ("downgrade", format!("{prefix}alembic downgrade -1")),
            (
                "revision",
                format!("{prefix}alembic revision --autogenerate -m \"<message>\""),
            ),
        ],
        "Alembic",
    )
}

fn from_great_expectations(
    root: &Path,
    py_deps: &BTreeSet<String>,
    prefix: &str,
) -> Vec<CommandInfo> {
    let present = py_deps.contains("great-expectations")
        || py_deps.contains("great_expectations")
        || root.join("great_expectations").is_dir();
    if !present {
        return Vec::new();
    }
    fixed(
        &[(
            "checkpoint",
            format!("{prefix}great_expectations checkpoint run <checkpoint>"),
        )],
        "Great Expectations",
    )
}

fn from_mlflow(py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    if !py_deps.contains("mlflow") {
        return Vec::new();
    }
    fixed(&[("ui", format!("{prefix}mlflow ui"))], "MLflow")
}

fn from_dvc(root: &Path, py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    let present =
        file_exists(root, "dvc.yaml") || root.join(".dvc").is_dir() || py_deps.contains("dvc");
    if !present {
        return Vec::new();
    }
    fixed(
        &[
            ("repro", format!("{prefix}dvc repro")),
            ("pull", format!("{prefix}dvc pull")),
            ("push", format!("{prefix}dvc push")),
        ],
        "DVC",
    )
}

fn from_jupyter(py_deps: &BTreeSet<String>, prefix: &str) -> Vec<CommandInfo> {
    let present = ["jupyter", "jupyterlab", "notebook"]
        .iter()
        .any(|d| py_deps.contains(*d));
    if !present {
        return Vec::new();
    }
    fixed(&[("lab", format!("{prefix}jupyter lab"))], "Jupyter")
}

// =============================================================================
// Tests
// =============================================================================
