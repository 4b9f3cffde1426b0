use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agentseed::cli::commands::{config, init, scan};

#[derive(Parser)]
#[command(name = "agentseed")]
#[command(
    version,
    about = "Generate AI-agent context files (AGENTS.md, CLAUDE.md, ...) from repository analysis"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long)]
    verbose: bool,

    #[arg(long, short)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the current directory and write context files at the root
    Init {
        #[arg(
            short = 'f',
            long,
            default_value = "agents",
            help = "Output format: agents, claude, cursor, copilot, windsurf, all"
        )]
        format: String,
        #[arg(short = 'o', long, help = "Override the output file path")]
        output: Option<PathBuf>,
        #[arg(long, help = "LLM provider for refinement (claude, openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Regenerate even if files are up to date")]
        force: bool,
        #[arg(long = "dry-run", help = "Print generated content without writing files")]
        dry_run: bool,
    },

    /// Analyze a repository tree and write scoped context files into
    /// qualifying subfolders
    Scan {
        #[arg(default_value = ".", help = "Repository root to scan")]
        path: PathBuf,
        #[arg(
            short = 'f',
            long,
            default_value = "agents",
            help = "Output format: agents, claude, cursor, copilot, windsurf, all"
        )]
        format: String,
        #[arg(long, help = "LLM provider for refinement (claude, openai, ollama)")]
        provider: Option<String>,
        #[arg(long, help = "Model to use")]
        model: Option<String>,
        #[arg(long, help = "Regenerate even if files are up to date")]
        force: bool,
        #[arg(long = "dry-run", help = "Print generated content without writing files")]
        dry_run: bool,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration (defaults + file + environment)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, toml, json"
        )]
        format: String,
    },
    /// Show configuration file locations
    Path,
}

fn main() -> ExitCode {
    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", console::style("Error:").red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Init {
            format,
            output,
            provider,
            model,
            force,
            dry_run,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(init::run(init::InitOptions {
                format,
                output,
                provider,
                model,
                force,
                dry_run,
            }))?;
        }
        Commands::Scan {
            path,
            format,
            provider,
            model,
            force,
            dry_run,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(scan::run(scan::ScanOptions {
                path,
                format,
                provider,
                model,
                force,
                dry_run,
            }))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => config::show(&format)?,
            ConfigAction::Path => config::path()?,
        },
    }

    Ok(())
}
