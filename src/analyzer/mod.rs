//! Repository Analyzer
//!
//! Fans the five detectors out concurrently over one root path and joins
//! them into an immutable `AnalysisResult`. The detectors share no mutable
//! state, so the join barrier is the only synchronization.

mod commands;
mod frameworks;
mod language;
pub mod manifest;
mod patterns;
mod sampler;
mod structure;
pub mod walk;

pub use commands::extract_commands;
pub use frameworks::detect_frameworks;
pub use language::detect_languages;
pub use patterns::detect_patterns;
pub use sampler::sample_files;
pub use structure::map_structure;

use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::types::{AgentseedError, AnalysisResult, Result};

/// Analyze the repository at `root`.
///
/// File sampling is skipped when the LLM pass is disabled; the rest of the
/// result is identical either way.
#[instrument(skip(config), fields(root = %root.display()))]
pub async fn analyze(root: &Path, config: &Config) -> Result<AnalysisResult> {
    let root = root.to_path_buf();
    let ignore = config.ignore.clone();

    let (languages, frameworks, commands, structure, patterns) = tokio::join!(
        blocking(&root, &ignore, |r, ig| detect_languages(r, ig)),
        blocking(&root, &ignore, |r, _| detect_frameworks(r)),
        blocking(&root, &ignore, |r, _| extract_commands(r)),
        blocking(&root, &ignore, |r, ig| map_structure(r, ig)),
        blocking(&root, &ignore, |r, ig| detect_patterns(r, ig)),
    );

    let sampled_files = if config.no_llm {
        Vec::new()
    } else {
        let max_files = config.max_files;
        let max_budget = config.max_token_budget;
        blocking(&root, &ignore, move |r, ig| {
            sample_files(r, ig, max_files, max_budget)
        })
        .await?
    };

    let result = AnalysisResult {
        languages: languages?,
        frameworks: frameworks?,
        commands: commands?,
        structure: structure?,
        patterns: patterns?,
        sampled_files,
    };

    debug!(
        languages = result.languages.len(),
        frameworks = result.frameworks.len(),
        commands = result.commands.len(),
        "Analysis complete"
    );
    Ok(result)
}

/// Run one detector on the blocking pool
async fn blocking<T, F>(root: &Path, ignore: &[String], detector: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&Path, &[String]) -> T + Send + 'static,
{
    let root: PathBuf = root.to_path_buf();
    let ignore = ignore.to_vec();
    task::spawn_blocking(move || detector(&root, &ignore))
        .await
        .map_err(|e| AgentseedError::Analysis(format!("Detector task failed: {}", e)))
}

// =============================================================================
// Tests
// =============================================================================
