//! Framework Detector
//!
//! Scores a fixed catalog of framework signatures against indicator files and
//! dependency manifests. The catalog is ordered data, not a dispatch
//! hierarchy: iteration in declaration order gives deterministic tie-breaks.

use std::collections::BTreeSet;
use std::path::Path;

use super::manifest::{self, PackageJson};
use crate::types::{FrameworkCategory, FrameworkInfo};

struct FrameworkSignature {
    name: &'static str,
    category: FrameworkCategory,
    /// First existing file contributes 0.5, no stacking within the class
    files: &'static [&'static str],
    /// Found in runtime or dev dependency map: 0.8; in the Python set: 0.8
    dependencies: &'static [&'static str],
    /// Found specifically in the dev dependency map: 0.7
    dev_dependencies: &'static [&'static str],
}

macro_rules! sig {
    ($name:literal, $category:ident, files: $files:expr, deps: $deps:expr, dev: $dev:expr) => {
        FrameworkSignature {
            name: $name,
            category: FrameworkCategory::$category,
            files: $files,
            dependencies: $deps,
            dev_dependencies: $dev,
        }
    };
}

#[rustfmt::skip]
const FRAMEWORKS: &[FrameworkSignature] = &[
    // Web frameworks
    sig!("Next.js", Web, files: &["next.config.js", "next.config.mjs", "next.config.ts"], deps: &["next"], dev: &[]),
    sig!("React", Web, files: &[], deps: &["react"], dev: &[]),
    sig!("Vue", Web, files: &[], deps: &["vue"], dev: &[]),
    sig!("Nuxt", Web, files: &["nuxt.config.ts", "nuxt.config.js"], deps: &["nuxt"], dev: &[]),
    sig!("Svelte", Web, files: &[], deps: &["svelte"], dev: &[]),
    sig!("SvelteKit", Web, files: &["svelte.config.js"], deps: &["@sveltejs/kit"], dev: &[]),
    sig!("Angular", Web, files: &["angular.json"], deps: &["@angular/core"], dev: &[]),
    sig!("Astro", Web, files: &["astro.config.mjs", "astro.config.ts"], deps: &["astro"], dev: &[]),
    sig!("Remix", Web, files: &[], deps: &["@remix-run/react"], dev: &[]),
    sig!("Gatsby", Web, files: &["gatsby-config.js", "gatsby-config.ts"], deps: &["gatsby"], dev: &[]),

    // API frameworks
    sig!("Express", Api, files: &[], deps: &["express"], dev: &[]),
    sig!("Fastify", Api, files: &[], deps: &["fastify"], dev: &[]),
    sig!("NestJS", Api, files: &[], deps: &["@nestjs/core"], dev: &[]),
    sig!("Hono", Api, files: &[], deps: &["hono"], dev: &[]),
    sig!("Koa", Api, files: &[], deps: &["koa"], dev: &[]),
    sig!("Flask", Api, files: &["app.py"], deps: &["flask"], dev: &[]),
    sig!("Django", Api, files: &["manage.py"], deps: &["django"], dev: &[]),
    sig!("FastAPI", Api, files: &[], deps: &["fastapi"], dev: &[]),
    sig!("Spring Boot", Api, files: &["pom.xml", "build.gradle"], deps: &[], dev: &[]),

    // Testing
    sig!("Vitest", Testing, files: &[], deps: &[], dev: &["vitest"]),
    sig!("Jest", Testing, files: &[], deps: &[], dev: &["jest"]),
    sig!("Mocha", Testing, files: &[], deps: &[], dev: &["mocha"]),
    sig!("Playwright", Testing, files: &[], deps: &[], dev: &["@playwright/test", "playwright"]),
    sig!("Cypress", Testing, files: &[], deps: &[], dev: &["cypress"]),
    sig!("pytest", Testing, files: &["pytest.ini"], deps: &["pytest"], dev: &[]),

    // Build tools
    sig!("Vite", Build, files: &["vite.config.ts", "vite.config.js"], deps: &[], dev: &["vite"]),
    sig!("Webpack", Build, files: &["webpack.config.js", "webpack.config.ts"], deps: &[], dev: &["webpack"]),
    sig!("tsup", Build, files: &[], deps: &[], dev: &["tsup"]),
    sig!("esbuild", Build, files: &[], deps: &[], dev: &["esbuild"]),
    sig!("Turbopack", Build, files: &["turbo.json"], deps: &[], dev: &[]),
    sig!("Rollup", Build, files: &["rollup.config.js", "rollup.config.ts"], deps: &[], dev: &["rollup"]),

    // ORM / migrations
    sig!("Prisma", Orm, files: &["prisma/schema.prisma"], deps: &["@prisma/client"], dev: &[]),
    sig!("Drizzle", Orm, files: &[], deps: &["drizzle-orm"], dev: &[]),
    sig!("TypeORM", Orm, files: &[], deps: &["typeorm"], dev: &[]),
    sig!("Sequelize", Orm, files: &[], deps: &["sequelize"], dev: &[]),
    sig!("SQLAlchemy", Orm, files: &[], deps: &["sqlalchemy"], dev: &[]),
    sig!("Alembic", Orm, files: &["alembic.ini", "alembic"], deps: &["alembic"], dev: &[]),

    // Data / ETL
    sig!("dbt", Data, files: &["dbt_project.yml"], deps: &["dbt-core"], dev: &[]),
    sig!("Apache Airflow", Etl, files: &["airflow.cfg", "dags"], deps: &["apache-airflow", "airflow"], dev: &[]),
    sig!("Dagster", Etl, files: &[], deps: &["dagster"], dev: &[]),
    sig!("Prefect", Etl, files: &[], deps: &["prefect"], dev: &[]),
    sig!("Luigi", Etl, files: &[], deps: &["luigi"], dev: &[]),
    sig!("Apache Spark", Data, files: &[], deps: &["pyspark"], dev: &[]),
    sig!("Pandas", Data, files: &[], deps: &["pandas"], dev: &[]),
    sig!("Polars", Data, files: &[], deps: &["polars"], dev: &[]),
    sig!("Great Expectations", Data, files: &["great_expectations"], deps: &["great-expectations", "great_expectations"], dev: &[]),
    sig!("Flyway", Data, files: &["flyway.conf"], deps: &[], dev: &[]),
    sig!("Liquibase", Data, files: &["liquibase.properties", "changelog.xml"], deps: &[], dev: &[]),
    sig!("Terraform", Other, files: &["main.tf", "terraform.tfvars"], deps: &[], dev: &[]),

    // MLOps
    sig!("MLflow", Mlops, files: &["MLproject"], deps: &["mlflow"], dev: &[]),
    sig!("DVC", Mlops, files: &["dvc.yaml", ".dvc"], deps: &["dvc"], dev: &[]),
    sig!("Weights & Biases", Mlops, files: &[], deps: &["wandb"], dev: &[]),
    sig!("Kubeflow", Mlops, files: &[], deps: &["kfp"], dev: &[]),

    // Streaming
    sig!("Apache Kafka", Streaming, files: &[], deps: &["kafka-python", "confluent-kafka", "kafkajs"], dev: &[]),
    sig!("Apache Flink", Streaming, files: &[], deps: &["apache-flink", "pyflink"], dev: &[]),
    sig!("Apache Beam", Streaming, files: &[], deps: &["apache-beam"], dev: &[]),
];

/// Score the signature catalog against `root`.
///
/// Descending confidence; ties keep catalog declaration order.
pub fn detect_frameworks(root: &Path) -> Vec<FrameworkInfo> {
    let pkg = manifest::load_package_json(root);
    let py_deps = manifest::python_deps(root);

    let mut detected: Vec<FrameworkInfo> = FRAMEWORKS
        .iter()
        .filter_map(|sig| {
            let confidence = score(sig, root, pkg.as_ref(), &py_deps);
            (confidence > 0.0).then(|| FrameworkInfo {
                name: sig.name.to_string(),
                category: sig.category,
                confidence,
            })
        })
        .collect();

    // Stable sort keeps catalog order on equal confidence
    detected.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    detected
}

fn score(
    sig: &FrameworkSignature,
    root: &Path,
    pkg: Option<&PackageJson>,
    py_deps: &BTreeSet<String>,
) -> f32 {
    let mut confidence: f32 = 0.0;

    if sig.files.iter().any(|f| root.join(f).exists()) {
        confidence += 0.5;
    }

    if let Some(pkg) = pkg {
        if sig.dependencies.iter().any(|d| pkg.has_dependency(d)) {
            confidence += 0.8;
        }
        if sig
            .dev_dependencies
            .iter()
            .any(|d| pkg.has_dev_dependency(d))
        {
            confidence += 0.7;
        }
    }

    if !py_deps.is_empty()
        && sig
            .dependencies
            .iter()
            .any(|d| py_deps.contains(&d.to_lowercase()))
    {
        confidence += 0.8;
    }

    confidence.min(1.0)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn find<'a>(frameworks: &'a [FrameworkInfo], name: &str) -> Option<&'a FrameworkInfo> {
        frameworks.iter().find(|f| f.name == name)
    }

    #[test]
    fn test_dependency_scores_point_eight() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies":{"react":"^18.0.0"}}"#,
        )
        .unwrap();

        let frameworks = detect_frameworks(temp.path());
        let react = find(&frameworks, "React").unwrap();
        assert!((react.confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_file_and_dependency_clamped_to_one() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("next.config.ts"), "").unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies":{"next":"^14.0.0","react":"^18.0.0"}}"#,
        )
        .unwrap();

        let frameworks = detect_frameworks(temp.path());
        let next = find(&frameworks, "Next.js").unwrap();
        assert!((next.confidence - 1.0).abs() < 1e-6);
        // clamped hit sorts above the bare dependency hit
        assert_eq!(frameworks[0].name, "Next.js");
    }

    #[test]
    fn test_indicator_file_alone_scores_half() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("turbo.json"), "{}").unwrap();

        let frameworks = detect_frameworks(temp.path());
        let turbo = find(&frameworks, "Turbopack").unwrap();
        assert!((turbo.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_dev_dependency_scores_point_seven() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"devDependencies":{"vitest":"^1.0.0"}}"#,
        )
        .unwrap();

        let frameworks = detect_frameworks(temp.path());
        let vitest = find(&frameworks, "Vitest").unwrap();
        assert!((vitest.confidence - 0.7).abs() < 1e-6);
        assert_eq!(vitest.category, FrameworkCategory::Testing);
    }

    #[test]
    fn test_python_dependency_scores_point_eight() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "Django==4.2\npandas\n").unwrap();

        let frameworks = detect_frameworks(temp.path());
        assert!((find(&frameworks, "Django").unwrap().confidence - 0.8).abs() < 1e-6);
        assert!(find(&frameworks, "Pandas").is_some());
    }

    #[test]
    fn test_zero_confidence_omitted() {
        let temp = TempDir::new().unwrap();
        let frameworks = detect_frameworks(temp.path());
        assert!(frameworks.is_empty());
        // invariant holds on non-empty results too
        fs::write(temp.path().join("requirements.txt"), "mlflow\n").unwrap();
        for fw in detect_frameworks(temp.path()) {
            assert!(fw.confidence > 0.0 && fw.confidence <= 1.0);
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("package.json"),
            r#"{"dependencies":{"react":"^18.0.0","vue":"^3.0.0"}}"#,
        )
        .unwrap();

        let frameworks = detect_frameworks(temp.path());
        let react_pos = frameworks.iter().position(|f| f.name == "React").unwrap();
        let vue_pos = frameworks.iter().position(|f| f.name == "Vue").unwrap();
        assert!(react_pos < vue_pos);
    }

    #[test]
    fn test_mlops_and_streaming_categories() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("requirements.txt"),
            "mlflow\nconfluent-kafka\n",
        )
        .unwrap();

        let frameworks = detect_frameworks(temp.path());
        assert_eq!(
            find(&frameworks, "MLflow").unwrap().category,
            FrameworkCategory::Mlops
        );
        assert_eq!(
            find(&frameworks, "Apache Kafka").unwrap().category,
            FrameworkCategory::Streaming
        );
    }
}
