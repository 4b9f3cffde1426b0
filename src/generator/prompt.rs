//! Prompt Construction
//!
//! Builds the textual prompts sent to LLM providers from an analysis result.
//! The root prompt asks for the six canonical sections; the subfolder prompt
//! asks only for sections that differ from the root document.

use std::fmt::Write;

use crate::types::AnalysisResult;

pub const SYSTEM_PROMPT: &str = "You are an expert at analyzing codebases and generating clear, \
concise documentation for AI coding agents. Focus on practical, actionable information.";

/// Prompt for the root document
pub fn build_root_prompt(analysis: &AnalysisResult) -> String {
    let mut prompt = String::from(
        "You are generating an AGENTS.md file for a code repository. This file helps AI coding \
agents understand the project.\n\n\
Based on the analysis and code samples below, generate the content for each section. Be concise \
and practical - focus on what an AI agent needs to know to work effectively in this codebase.\n\n\
## Repository Analysis\n\n",
    );

    push_analysis_summary(&mut prompt, analysis, true);
    push_code_samples(&mut prompt, analysis);

    prompt.push_str(
        "## Instructions\n\n\
Generate EXACTLY these 6 sections in markdown. Each section should be practical and actionable \
for an AI coding agent:\n\n\
1. **Project Context** - What this project is (2-3 sentences max)\n\
2. **Stack** - List of languages, frameworks, and key libraries with versions if detectable\n\
3. **Commands** - Copy-pasteable commands for build, run, test, lint. Use the exact commands from analysis.\n\
4. **Conventions** - Naming conventions, file structure patterns, import style, any coding standards\n\
5. **Architecture** - What lives where, key directories and their purposes, how components connect\n\
6. **Boundaries** - Rules as three sub-lists:\n\
   - **Always**: Things to always do (e.g., \"run tests before committing\")\n\
   - **Ask first**: Things that need human approval (e.g., \"adding new dependencies\")\n\
   - **Never**: Things to never do (e.g., \"commit secrets or .env files\")\n\n\
Output ONLY the markdown content. Do NOT wrap in code blocks. Start directly with the first \
section heading.",
    );

    prompt
}

/// Prompt for one subfolder, given the already-rendered root document
pub fn build_subfolder_prompt(
    analysis: &AnalysisResult,
    root_markdown: &str,
    subfolder_path: &str,
) -> String {
    let mut prompt = format!(
        "You are generating a subfolder AGENTS.md file for the {subfolder_path} directory in a \
larger repository.\n\n\
This file should ONLY include sections that DIFFER from the root AGENTS.md. If a section is \
identical to root, omit it entirely.\n\n\
## Root AGENTS.md\n{root_markdown}\n\n\
## Subfolder Analysis ({subfolder_path})\n\n"
    );

    push_analysis_summary(&mut prompt, analysis, false);
    push_code_samples(&mut prompt, analysis);

    prompt.push_str(
        "## Instructions\n\n\
Generate markdown with ONLY the sections that differ from the root AGENTS.md. Possible sections:\n\
1. Project Context - only if this subfolder has a distinctly different purpose\n\
2. Stack - only if it uses additional/different tech\n\
3. Commands - only if subfolder has its own commands\n\
4. Conventions - only if conventions differ from root\n\
5. Architecture - describe what lives in this subfolder specifically\n\
6. Boundaries - only if there are additional rules for this subfolder\n\n\
Start with a one-line note: \"This directory contains [purpose]. See root AGENTS.md for general \
project info.\"\n\n\
Output ONLY the markdown content. Do NOT wrap in code blocks.",
    );

    prompt
}

fn push_analysis_summary(prompt: &mut String, analysis: &AnalysisResult, detailed: bool) {
    prompt.push_str("### Languages\n");
    for lang in &analysis.languages {
        let _ = writeln!(
            prompt,
            "- {}: {}% ({} files)",
            lang.name, lang.percentage, lang.file_count
        );
    }

    prompt.push_str("\n### Frameworks & Libraries\n");
    for fw in &analysis.frameworks {
        if detailed {
            let _ = writeln!(
                prompt,
                "- {} ({}, confidence: {:.1})",
                fw.name, fw.category, fw.confidence
            );
        } else {
            let _ = writeln!(prompt, "- {} ({})", fw.name, fw.category);
        }
    }

    prompt.push_str("\n### Available Commands\n");
    for cmd in &analysis.commands {
        if detailed {
            let _ = writeln!(prompt, "- `{}` ({}, from {})", cmd.command, cmd.name, cmd.source);
        } else {
            let _ = writeln!(prompt, "- `{}` ({})", cmd.command, cmd.name);
        }
    }

    if detailed {
        let _ = write!(
            prompt,
            "\n### Project Structure\n\
- Total files: {}\n\
- Total directories: {}\n\
- Entry points: {}\n\n\
### Detected Patterns\n\
- Naming convention: {}\n\
- File organization: {}\n\
- Monorepo: {}\n\
- Config files: {}\n\
- CI files: {}\n\n",
            analysis.structure.total_files,
            analysis.structure.total_dirs,
            analysis.structure.entry_points.join(", "),
            analysis.patterns.naming_convention,
            analysis.patterns.file_organization,
            analysis.patterns.has_monorepo,
            analysis.patterns.config_files.join(", "),
            analysis.patterns.ci_files.join(", "),
        );
    } else {
        let _ = write!(
            prompt,
            "\n### Patterns\n\
- Naming: {}\n\
- Organization: {}\n\n",
            analysis.patterns.naming_convention, analysis.patterns.file_organization,
        );
    }
}

fn push_code_samples(prompt: &mut String, analysis: &AnalysisResult) {
    if analysis.sampled_files.is_empty() {
        return;
    }
    prompt.push_str("### Code Samples\n");
    for file in &analysis.sampled_files {
        let _ = write!(
            prompt,
            "#### {} ({})\n```\n{}\n```\n\n",
            file.path, file.priority, file.content
        );
    }
}

// =============================================================================
// Tests
// =============================================================================
