//! Document Generation
//!
//! Turns an analysis result into format-agnostic core content (statically or
//! via an LLM provider) and renders it for each requested output format.
//! Subfolder documents are scoped against the root so they only carry what
//! differs.

mod differ;
mod formats;
mod markdown;
mod prompt;

pub use differ::compute_subfolder_delta;
pub use formats::{resolve_formats, OutputFormat, ALL_FORMATS};
pub use markdown::{render_core_content, render_for_format};

use tracing::debug;

use crate::ai::{generate_with_retry, LlmRequest, SharedProvider, UsageTracker};
use crate::config::Config;
use crate::types::{AnalysisResult, Result};
use prompt::{build_root_prompt, build_subfolder_prompt, SYSTEM_PROMPT};

/// Core content for the repository root.
///
/// With a provider the analysis is turned into a prompt and refined by the
/// LLM; without one the static renderer is used. The content is
/// format-agnostic, the caller renders it per format.
pub async fn generate_root_content(
    analysis: &AnalysisResult,
    provider: Option<&SharedProvider>,
    config: &Config,
    usage: &mut UsageTracker,
) -> Result<String> {
    let Some(provider) = provider else {
        return Ok(render_core_content(analysis, None));
    };

    debug!(
        provider = provider.name(),
        model = provider.model(),
        "generating root content"
    );

    let request = LlmRequest::new(build_root_prompt(analysis), SYSTEM_PROMPT)
        .with_temperature(config.temperature);
    let response = generate_with_retry(provider.as_ref(), &request).await?;
    usage.record(&response.usage);
    Ok(render_core_content(analysis, Some(&response.content)))
}

/// Core content for one subfolder, scoped against the root document.
///
/// The static path diffs the subfolder analysis against the root analysis so
/// ancestor coverage is not repeated; the LLM path gives the model the root
/// document and asks for differing sections only.
pub async fn generate_subfolder_content(
    root_analysis: &AnalysisResult,
    root_content: &str,
    subfolder_analysis: AnalysisResult,
    subfolder_path: &str,
    provider: Option<&SharedProvider>,
    config: &Config,
    usage: &mut UsageTracker,
) -> Result<String> {
    let Some(provider) = provider else {
        let delta = compute_subfolder_delta(root_analysis, subfolder_analysis);
        return Ok(render_core_content(&delta, None));
    };

    debug!(
        provider = provider.name(),
        path = subfolder_path,
        "generating subfolder content"
    );

    let prompt = build_subfolder_prompt(&subfolder_analysis, root_content, subfolder_path);
    let request = LlmRequest::new(prompt, SYSTEM_PROMPT).with_temperature(config.temperature);
    let response = generate_with_retry(provider.as_ref(), &request).await?;
    usage.record(&response.usage);
    Ok(render_core_content(&subfolder_analysis, Some(&response.content)))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LanguageInfo;

    fn analysis() -> AnalysisResult {
        AnalysisResult {
            languages: vec![LanguageInfo {
                name: "Rust".to_string(),
                file_count: 12,
                percentage: 100,
            }],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_static_root_content_without_provider() {
        let config = Config::default();
        let mut usage = UsageTracker::new();
        let content = generate_root_content(&analysis(), None, &config, &mut usage)
            .await
            .unwrap();

        assert!(content.contains("## Project Context"));
        assert!(content.contains("## Commands"));
        assert_eq!(usage.calls(), 0);
    }

    #[tokio::test]
    async fn test_static_subfolder_content_diffs_against_root() {
        let config = Config::default();
        let mut usage = UsageTracker::new();
        let root = analysis();
        let root_content = render_core_content(&root, None);

        let content = generate_subfolder_content(
            &root,
            &root_content,
            analysis(),
            "packages/core",
            None,
            &config,
            &mut usage,
        )
        .await
        .unwrap();

        assert!(content.contains("## Project Context"));
        assert_eq!(usage.calls(), 0);
    }
}
