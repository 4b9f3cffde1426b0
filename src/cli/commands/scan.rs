//! Scan Command
//!
//! Full-tree pass: analyze the root, detect qualifying subfolders, and write
//! scoped documents into each one. Subfolders are processed strictly
//! sequentially so outbound LLM calls never overlap and progress output
//! stays ordered.

use console::style;
use std::path::PathBuf;

use crate::ai::{create_provider, UsageTracker};
use crate::analyzer;
use crate::cli::util::{print_usage, read_existing, write_output};
use crate::config::{ConfigLoader, ConfigOverrides};
use crate::generator::{
    generate_root_content, generate_subfolder_content, render_core_content, render_for_format,
    resolve_formats, OutputFormat,
};
use crate::git::{self, FileMeta};
use crate::scanner;
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub path: PathBuf,
    pub format: String,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub force: bool,
    pub dry_run: bool,
}

pub async fn run(options: ScanOptions) -> Result<()> {
    let root = if options.path.is_absolute() {
        options.path.clone()
    } else {
        std::env::current_dir()?.join(&options.path)
    };
    let formats = resolve_formats(&options.format)?;
    let use_llm = options.provider.is_some();

    println!(
        "{} {}",
        style("agentseed scan").bold(),
        style(format!("({})", root.display())).dim()
    );
    let names: Vec<&str> = formats.iter().map(|f| f.name()).collect();
    println!("{}", style(format!("Formats: {}", names.join(", "))).dim());

    let config = ConfigLoader::load(
        &root,
        &ConfigOverrides {
            provider: options.provider,
            model: options.model,
            no_llm: Some(!use_llm),
        },
    )?;

    let provider = if config.no_llm {
        None
    } else {
        Some(create_provider(&config)?)
    };
    let mut usage = UsageTracker::new();

    let git_repo = git::is_git_repo(&root);
    let root_sha = if git_repo { git::head_sha(&root) } else { None };

    println!("Analyzing root...");
    let root_analysis = analyzer::analyze(&root, &config).await?;

    // Root regenerates unless every requested file carries the current SHA
    let root_needs_regen = options.force
        || options.dry_run
        || root_sha.is_none()
        || formats.iter().any(|fmt| {
            let existing = read_existing(&fmt.output_path(&root));
            git::needs_regeneration(existing.as_deref(), root_sha.as_deref(), &root, None)
        });

    let root_content = if !root_needs_regen {
        println!("{}", style("Root files are up to date, skipping generation").dim());
        // Subfolder prompts still need the root document for diffing
        read_existing(&OutputFormat::Agents.output_path(&root))
            .unwrap_or_else(|| render_core_content(&root_analysis, None))
    } else {
        generate_root_content(&root_analysis, provider.as_ref(), &config, &mut usage).await?
    };

    println!("Detecting subfolders...");
    let subfolders = scanner::detect_subfolders(&root, &config.ignore);

    if options.dry_run {
        for fmt in &formats {
            println!("\n{}\n", style(format!("--- Root {} ---", fmt.name())).bold());
            println!("{}", render_for_format(*fmt, &root_analysis, &root_content, None, None));
        }
        println!("\n{}", style(format!("Detected {} subfolder(s):", subfolders.len())).bold());
        for sf in &subfolders {
            println!("  {} - {}", style(&sf.relative_path).cyan(), sf.reason);
        }
        print_usage(&usage);
        return Ok(());
    }

    if root_needs_regen {
        for fmt in &formats {
            let meta = root_sha
                .as_deref()
                .map(|sha| FileMeta::new(sha, fmt.meta_label()));
            let formatted =
                render_for_format(*fmt, &root_analysis, &root_content, None, meta.as_ref());
            write_output(&fmt.output_path(&root), &formatted)?;
        }
        println!(
            "{} Root files written ({})",
            style("✓").green(),
            names.join(", ")
        );
    }

    let total = subfolders.len();
    let mut skipped = 0;

    for (i, sf) in subfolders.iter().enumerate() {
        let progress = style(format!("[{}/{}]", i + 1, total)).dim();
        let sf_dir = root.join(&sf.relative_path);

        let sf_sha = if git_repo {
            git::path_sha(&root, &sf.relative_path)
        } else {
            None
        };

        if !options.force && sf_sha.is_some() {
            let all_fresh = formats.iter().all(|fmt| {
                let existing = read_existing(&fmt.output_path(&sf_dir));
                !git::needs_regeneration(
                    existing.as_deref(),
                    sf_sha.as_deref(),
                    &root,
                    Some(&sf.relative_path),
                )
            });
            if all_fresh {
                println!(
                    "{} {} {}",
                    progress,
                    style(format!("{}/", sf.relative_path)).dim(),
                    style("unchanged, skipping").yellow()
                );
                skipped += 1;
                continue;
            }
        }

        println!("{} Analyzing {}/...", progress, sf.relative_path);
        let sf_analysis = analyzer::analyze(&sf_dir, &config).await?;
        let sf_content = generate_subfolder_content(
            &root_analysis,
            &root_content,
            sf_analysis.clone(),
            &sf.relative_path,
            provider.as_ref(),
            &config,
            &mut usage,
        )
        .await?;

        for fmt in &formats {
            let meta = sf_sha
                .as_deref()
                .map(|sha| FileMeta::new(sha, fmt.meta_label()));
            let formatted = render_for_format(
                *fmt,
                &sf_analysis,
                &sf_content,
                Some(&sf.relative_path),
                meta.as_ref(),
            );
            write_output(&fmt.output_path(&sf_dir), &formatted)?;
        }
        println!(
            "{} {} {}/ files written",
            progress,
            style("✓").green(),
            sf.relative_path
        );
    }

    if skipped > 0 {
        println!(
            "{}",
            style(format!(
                "{} subfolder(s) skipped (unchanged). Use --force to regenerate all.",
                skipped
            ))
            .dim()
        );
    }
    print_usage(&usage);
    Ok(())
}
