//! Markdown Rendering
//!
//! Renders the format-agnostic core content from an analysis (used directly
//! when the LLM pass is skipped) and wraps it per output format. Each format
//! shares the same core content with tool-specific framing.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::formats::OutputFormat;
use crate::git::{build_meta_tag, FileMeta};
use crate::types::{AnalysisResult, EntryType, FileOrganization, FrameworkCategory};

/// Well-known directory descriptions for the Architecture section
static DIR_DESCRIPTIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("src", "Source code"),
        ("lib", "Library code"),
        ("app", "Application code"),
        ("bin", "CLI entry points / executables"),
        ("dist", "Build output"),
        ("build", "Build output"),
        ("out", "Build output"),
        ("tests", "Test files"),
        ("test", "Test files"),
        ("__tests__", "Test files"),
        ("spec", "Test specifications"),
        ("docs", "Documentation"),
        ("doc", "Documentation"),
        ("config", "Configuration files"),
        ("scripts", "Build/automation scripts"),
        ("public", "Static public assets"),
        ("static", "Static assets"),
        ("assets", "Project assets"),
        ("styles", "Stylesheets"),
        ("components", "UI components"),
        ("pages", "Page components / routes"),
        ("routes", "Route handlers"),
        ("api", "API endpoints"),
        ("middleware", "Middleware functions"),
        ("middlewares", "Middleware functions"),
        ("utils", "Utility functions"),
        ("helpers", "Helper functions"),
        ("hooks", "Custom hooks"),
        ("types", "Type definitions"),
        ("models", "Data models / dbt models"),
        ("services", "Service layer"),
        ("controllers", "Request handlers"),
        ("schemas", "Validation / schema definitions"),
        ("migrations", "Database migrations"),
        ("fixtures", "Test fixtures / seed data"),
        ("packages", "Monorepo packages"),
        ("apps", "Monorepo applications"),
        ("plugins", "Plugin modules"),
        ("adapters", "Platform adapters"),
        ("adapter", "Platform adapters"),
        ("router", "Routing logic"),
        ("routers", "Routing logic"),
        ("client", "Client-side code"),
        ("server", "Server-side code"),
        ("benchmarks", "Performance benchmarks"),
        ("examples", "Example code"),
        ("templates", "Template files"),
        ("i18n", "Internationalization"),
        ("locales", "Locale files"),
        ("dags", "Airflow DAG definitions"),
        ("pipelines", "Data pipelines"),
        ("etl", "ETL jobs"),
        ("sql", "SQL queries / scripts"),
        ("queries", "SQL queries"),
        ("macros", "dbt macros / reusable SQL"),
        ("seeds", "dbt seed data (CSV)"),
        ("snapshots", "dbt snapshots"),
        ("analyses", "dbt ad-hoc analyses"),
        ("transforms", "Data transformations"),
        ("warehouse", "Data warehouse definitions"),
        ("staging", "Staging layer models"),
        ("marts", "Data mart models"),
        ("raw", "Raw data ingestion"),
        ("alembic", "Alembic migration scripts"),
        ("notebooks", "Jupyter / data notebooks"),
        ("data", "Data files"),
        ("jobs", "Scheduled jobs / tasks"),
        ("connectors", "Data source connectors"),
    ])
});

/// Core content: LLM output when available, static rendering otherwise
pub fn render_core_content(analysis: &AnalysisResult, llm_content: Option<&str>) -> String {
    match llm_content {
        Some(content) => content.trim().to_string(),
        None => render_static_content(analysis),
    }
}

/// Wrap core content for one output format, appending the staleness tag
pub fn render_for_format(
    format: OutputFormat,
    analysis: &AnalysisResult,
    core_content: &str,
    subfolder_path: Option<&str>,
    meta: Option<&FileMeta>,
) -> String {
    let mut output = match format {
        OutputFormat::Agents => render_agents_md(core_content, subfolder_path),
        OutputFormat::Claude => render_claude_md(core_content, analysis, subfolder_path),
        OutputFormat::Cursor => render_cursor_rules(core_content, analysis),
        OutputFormat::Copilot => render_copilot_instructions(core_content),
        OutputFormat::Windsurf => format!("{}\n", core_content.trim()),
    };

    if let Some(meta) = meta {
        output = format!("{}\n\n{}\n", output.trim_end(), build_meta_tag(meta));
    }

    output
}

fn render_agents_md(content: &str, subfolder_path: Option<&str>) -> String {
    let mut lines = Vec::new();
    if let Some(path) = subfolder_path {
        lines.push(format!(
            "> Scoped context for `{}`. See root AGENTS.md for general project info.",
            path
        ));
        lines.push(String::new());
    }
    lines.push(content.trim().to_string());
    lines.push(String::new());
    lines.join("\n")
}

// Claude Code reads CLAUDE.md automatically; it benefits from an explicit
// command block when the core content lacks one.
fn render_claude_md(
    content: &str,
    analysis: &AnalysisResult,
    subfolder_path: Option<&str>,
) -> String {
    let mut lines = Vec::new();

    if let Some(path) = subfolder_path {
        lines.push(format!(
            "> Context for `{}`. See root CLAUDE.md for general rules.",
            path
        ));
        lines.push(String::new());
    }

    lines.push(content.trim().to_string());
    lines.push(String::new());

    if !analysis.commands.is_empty() && !content.contains("## Commands") {
        lines.push("## Quick Reference Commands".to_string());
        lines.push(String::new());
        lines.push("```bash".to_string());
        for cmd in analysis.commands.iter().take(8) {
            lines.push(format!("{}  # {}", cmd.command, cmd.name));
        }
        lines.push("```".to_string());
        lines.push(String::new());
    }

    lines.join("\n")
}

// Cursor wants concise rule-style text plus explicit technology context.
fn render_cursor_rules(content: &str, analysis: &AnalysisResult) -> String {
    let mut lines = vec!["# Project Rules".to_string(), String::new()];
    lines.push(content.trim().to_string());
    lines.push(String::new());

    if !analysis.frameworks.is_empty()
        && !content.contains("## Stack")
        && !content.contains("## Tech")
    {
        let tech_list: Vec<&str> = analysis.frameworks.iter().map(|f| f.name.as_str()).collect();
        lines.push("## Tech Stack Context".to_string());
        lines.push(String::new());
        lines.push(format!("This project uses: {}", tech_list.join(", ")));
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_copilot_instructions(content: &str) -> String {
    format!(
        "<!-- GitHub Copilot Custom Instructions -->\n<!-- See: https://docs.github.com/copilot/customizing-copilot -->\n\n{}\n",
        content.trim()
    )
}

// =============================================================================
// Static rendering
// =============================================================================

fn render_static_content(analysis: &AnalysisResult) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Project Context
    lines.push("## Project Context".to_string());
    lines.push(String::new());
    if let Some(primary) = analysis.languages.first() {
        let frameworks: Vec<&str> = analysis
            .frameworks
            .iter()
            .filter(|f| {
                matches!(f.category, FrameworkCategory::Web | FrameworkCategory::Api)
            })
            .map(|f| f.name.as_str())
            .collect();

        let mut extras = Vec::new();
        if analysis.patterns.has_monorepo {
            extras.push("monorepo".to_string());
        }
        if analysis.patterns.file_organization != FileOrganization::Flat {
            extras.push(format!("{} architecture", analysis.patterns.file_organization));
        }
        let suffix = if extras.is_empty() {
            String::new()
        } else {
            format!(" Uses {}.", extras.join(", "))
        };

        if frameworks.is_empty() {
            lines.push(format!(
                "A {} project with {} files across {} directories.{}",
                primary.name,
                analysis.structure.total_files,
                analysis.structure.total_dirs,
                suffix
            ));
        } else {
            lines.push(format!(
                "A {} project using {}. Contains {} files across {} directories.{}",
                primary.name,
                frameworks.join(", "),
                analysis.structure.total_files,
                analysis.structure.total_dirs,
                suffix
            ));
        }
    } else {
        lines.push("Project details could not be determined from static analysis alone.".to_string());
    }
    lines.push(String::new());

    // Stack
    lines.push("## Stack".to_string());
    lines.push(String::new());
    if !analysis.languages.is_empty() {
        lines.push("**Languages:**".to_string());
        for lang in analysis.languages.iter().take(5) {
            lines.push(format!("- {} ({}%)", lang.name, lang.percentage));
        }
        lines.push(String::new());
    }
    if !analysis.frameworks.is_empty() {
        lines.push("**Frameworks & Tools:**".to_string());
        for fw in &analysis.frameworks {
            lines.push(format!("- {} ({})", fw.name, fw.category));
        }
        lines.push(String::new());
    }

    // Commands
    lines.push("## Commands".to_string());
    lines.push(String::new());
    if analysis.commands.is_empty() {
        lines.push(
            "No commands detected. Check project documentation for build/run instructions."
                .to_string(),
        );
    } else {
        lines.push("```bash".to_string());
        for cmd in &analysis.commands {
            lines.push(format!("{}  # {}", cmd.command, cmd.name));
        }
        lines.push("```".to_string());
    }
    lines.push(String::new());

    // Conventions
    lines.push("## Conventions".to_string());
    lines.push(String::new());
    lines.push(format!("- **Naming**: {}", analysis.patterns.naming_convention));
    lines.push(format!(
        "- **File organization**: {}",
        analysis.patterns.file_organization
    ));
    if analysis.patterns.has_monorepo {
        lines.push("- **Monorepo**: Yes".to_string());
    }
    if !analysis.patterns.config_files.is_empty() {
        lines.push(format!(
            "- **Config files**: {}",
            analysis.patterns.config_files.join(", ")
        ));
    }
    if !analysis.patterns.ci_files.is_empty() {
        lines.push(format!("- **CI/CD**: {}", analysis.patterns.ci_files.join(", ")));
    }
    lines.push(String::new());

    // Architecture
    lines.push("## Architecture".to_string());
    lines.push(String::new());
    if !analysis.structure.entry_points.is_empty() {
        lines.push(format!(
            "**Entry points:** {}",
            analysis.structure.entry_points.join(", ")
        ));
        lines.push(String::new());
    }
    lines.push("**Key directories:**".to_string());
    let top_dirs = analysis
        .structure
        .tree
        .iter()
        .filter(|e| e.entry_type == EntryType::Directory && e.depth == 0)
        .take(15);
    for dir in top_dirs {
        let name = dir.path.trim_end_matches('/');
        match DIR_DESCRIPTIONS.get(name) {
            Some(desc) => lines.push(format!("- `{}/` - {}", name, desc)),
            None => lines.push(format!("- `{}/`", name)),
        }
    }
    lines.push(String::new());

    // Boundaries
    lines.push("## Boundaries".to_string());
    lines.push(String::new());
    lines.push("**Always:**".to_string());

    match analysis.commands.iter().find(|c| c.name == "test") {
        Some(test_cmd) => lines.push(format!(
            "- Run `{}` before committing changes",
            test_cmd.command
        )),
        None => lines.push("- Run existing tests before committing changes".to_string()),
    }

    if let Some(lint_cmd) = analysis
        .commands
        .iter()
        .find(|c| matches!(c.name.as_str(), "lint" | "check" | "typecheck"))
    {
        lines.push(format!("- Run `{}` before committing", lint_cmd.command));
    }

    lines.push(format!(
        "- Follow {} naming convention",
        analysis.patterns.naming_convention
    ));
    lines.push(format!(
        "- Follow {} file organization",
        analysis.patterns.file_organization
    ));
    lines.push(String::new());

    lines.push("**Ask first:**".to_string());
    lines.push("- Adding new dependencies".to_string());
    lines.push("- Changing project configuration files".to_string());
    if !analysis.patterns.ci_files.is_empty() {
        lines.push("- Modifying CI/CD pipelines".to_string());
    }
    if analysis.patterns.has_monorepo {
        lines.push("- Adding new packages/workspaces".to_string());
    }
    lines.push(String::new());

    lines.push("**Never:**".to_string());
    lines.push("- Commit secrets, API keys, or .env files".to_string());
    lines.push("- Delete or overwrite test files without understanding them".to_string());
    lines.push("- Force push to main/master branch".to_string());
    if analysis.patterns.has_monorepo {
        lines.push("- Make cross-package changes without checking downstream effects".to_string());
    }

    lines.join("\n")
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandInfo, DirectoryEntry, LanguageInfo};

    fn sample_analysis() -> AnalysisResult {
        AnalysisResult {
            languages: vec![LanguageInfo {
                name: "TypeScript".to_string(),
                file_count: 10,
                percentage: 100,
            }],
            commands: vec![
                CommandInfo::new("test", "pnpm test", "package.json scripts"),
                CommandInfo::new("lint", "pnpm lint", "package.json scripts"),
            ],
            structure: crate::types::StructureInfo {
                total_files: 12,
                total_dirs: 3,
                tree: vec![DirectoryEntry {
                    path: "src".to_string(),
                    entry_type: EntryType::Directory,
                    depth: 0,
                }],
                entry_points: vec!["src/index.ts".to_string()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_static_content_sections() {
        let content = render_core_content(&sample_analysis(), None);
        for section in [
            "## Project Context",
            "## Stack",
            "## Commands",
            "## Conventions",
            "## Architecture",
            "## Boundaries",
        ] {
            assert!(content.contains(section), "missing {section}");
        }
        assert!(content.contains("- Run `pnpm test` before committing changes"));
        assert!(content.contains("- `src/` - Source code"));
    }

    #[test]
    fn test_llm_content_passes_through() {
        let content = render_core_content(&sample_analysis(), Some("  custom body\n"));
        assert_eq!(content, "custom body");
    }

    #[test]
    fn test_agents_subfolder_banner() {
        let analysis = sample_analysis();
        let output = render_for_format(
            OutputFormat::Agents,
            &analysis,
            "body",
            Some("packages/ui"),
            None,
        );
        assert!(output.starts_with("> Scoped context for `packages/ui`."));
    }

    #[test]
    fn test_claude_adds_command_block_when_missing() {
        let analysis = sample_analysis();
        let output = render_for_format(OutputFormat::Claude, &analysis, "body", None, None);
        assert!(output.contains("## Quick Reference Commands"));

        let with_commands =
            render_for_format(OutputFormat::Claude, &analysis, "## Commands\nbody", None, None);
        assert!(!with_commands.contains("## Quick Reference Commands"));
    }

    #[test]
    fn test_meta_tag_appended_last() {
        let analysis = sample_analysis();
        let meta = FileMeta::new("abc123", "agents");
        let output =
            render_for_format(OutputFormat::Agents, &analysis, "body", None, Some(&meta));
        assert!(output.trim_end().ends_with("-->"));
        assert!(crate::git::parse_meta_tag(&output).is_some());
    }

    #[test]
    fn test_cursor_tech_stack_context() {
        let mut analysis = sample_analysis();
        analysis.frameworks.push(crate::types::FrameworkInfo {
            name: "React".to_string(),
            category: FrameworkCategory::Web,
            confidence: 0.8,
        });

        let output = render_for_format(OutputFormat::Cursor, &analysis, "body", None, None);
        assert!(output.starts_with("# Project Rules"));
        assert!(output.contains("This project uses: React"));
    }

    #[test]
    fn test_empty_analysis_static_render() {
        let analysis = AnalysisResult::default();
        let content = render_core_content(&analysis, None);
        assert!(content.contains("could not be determined"));
        assert!(content.contains("No commands detected"));
    }
}
