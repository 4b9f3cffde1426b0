//! Init Command
//!
//! Analyze the current directory and write agent-context documents at the
//! repository root. Skips files whose embedded staleness tag still matches
//! the current commit, unless `--force` is given.

use console::style;
use std::path::PathBuf;

use crate::ai::{create_provider, UsageTracker};
use crate::analyzer;
use crate::cli::util::{print_usage, read_existing, write_output};
use crate::config::{ConfigLoader, ConfigOverrides};
use crate::generator::{generate_root_content, render_for_format, resolve_formats};
use crate::git::{self, FileMeta};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct InitOptions {
    pub format: String,
    pub output: Option<PathBuf>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub force: bool,
    pub dry_run: bool,
}

pub async fn run(options: InitOptions) -> Result<()> {
    let root = std::env::current_dir()?;
    let formats = resolve_formats(&options.format)?;
    let use_llm = options.provider.is_some();

    println!(
        "{} {}",
        style("agentseed init").bold(),
        style(format!("({})", root.display())).dim()
    );
    let names: Vec<&str> = formats.iter().map(|f| f.name()).collect();
    println!("{}", style(format!("Formats: {}", names.join(", "))).dim());
    if !use_llm {
        println!(
            "{}",
            style("Static analysis mode. Use --provider claude for LLM enhancement.").dim()
        );
    }

    let config = ConfigLoader::load(
        &root,
        &ConfigOverrides {
            provider: options.provider,
            model: options.model,
            no_llm: Some(!use_llm),
        },
    )?;

    let git_repo = git::is_git_repo(&root);
    let current_sha = if git_repo { git::head_sha(&root) } else { None };

    // Skip the whole run when every requested file is still current
    if !options.force && !options.dry_run && current_sha.is_some() {
        let all_fresh = formats.iter().all(|fmt| {
            let path = options
                .output
                .clone()
                .map(|out| root.join(out))
                .unwrap_or_else(|| fmt.output_path(&root));
            let existing = read_existing(&path);
            !git::needs_regeneration(existing.as_deref(), current_sha.as_deref(), &root, None)
        });
        if all_fresh {
            println!(
                "{} {}",
                style("All files are up to date.").green(),
                style("Use --force to regenerate.").dim()
            );
            return Ok(());
        }
    }

    println!("Analyzing repository...");
    let analysis = analyzer::analyze(&root, &config).await?;

    let provider = if config.no_llm {
        None
    } else {
        Some(create_provider(&config)?)
    };
    let mut usage = UsageTracker::new();
    let core_content =
        generate_root_content(&analysis, provider.as_ref(), &config, &mut usage).await?;

    if options.dry_run {
        for fmt in &formats {
            println!("\n{}\n", style(format!("--- {} (dry run) ---", fmt.name())).bold());
            println!("{}", render_for_format(*fmt, &analysis, &core_content, None, None));
        }
        print_usage(&usage);
        return Ok(());
    }

    let mut skipped = 0;
    for fmt in &formats {
        let path = options
            .output
            .clone()
            .map(|out| root.join(out))
            .unwrap_or_else(|| fmt.output_path(&root));

        // Per-file staleness check
        if !options.force && current_sha.is_some() {
            if let Some(existing) = read_existing(&path) {
                if !git::needs_regeneration(
                    Some(&existing),
                    current_sha.as_deref(),
                    &root,
                    None,
                ) {
                    println!("{}", style(format!("  {} is up to date, skipping", fmt.name())).dim());
                    skipped += 1;
                    continue;
                }
            }
        }

        let meta = current_sha
            .as_deref()
            .map(|sha| FileMeta::new(sha, fmt.meta_label()));
        let formatted = render_for_format(*fmt, &analysis, &core_content, None, meta.as_ref());
        write_output(&path, &formatted)?;
        println!(
            "{} {} written to {}",
            style("✓").green(),
            fmt.name(),
            style(path.display()).bold()
        );
    }

    if skipped > 0 {
        println!(
            "{}",
            style(format!(
                "{} file(s) skipped (unchanged). Use --force to regenerate all.",
                skipped
            ))
            .dim()
        );
    }
    print_usage(&usage);
    Ok(())
}
