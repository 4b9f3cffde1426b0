//! Subfolder Delta
//!
//! Reduces a subfolder analysis to what differs from the root analysis, so
//! scoped documents do not repeat ancestor coverage.

use std::collections::HashSet;

use crate::types::AnalysisResult;

/// Keep only the parts of `subfolder` that differ from `root`.
///
/// Languages fall back to the subfolder's full list when nothing stands out;
/// frameworks and commands are strict differences. Structure, patterns, and
/// samples are always subfolder-local.
pub fn compute_subfolder_delta(root: &AnalysisResult, subfolder: AnalysisResult) -> AnalysisResult {
    let root_langs: HashSet<&str> = root.languages.iter().map(|l| l.name.as_str()).collect();
    let root_fws: HashSet<&str> = root.frameworks.iter().map(|f| f.name.as_str()).collect();
    let root_cmds: HashSet<&str> = root.commands.iter().map(|c| c.command.as_str()).collect();

    let diff_languages: Vec<_> = subfolder
        .languages
        .iter()
        .filter(|l| !root_langs.contains(l.name.as_str()) || l.percentage > 50)
        .cloned()
        .collect();

    let frameworks = subfolder
        .frameworks
        .into_iter()
        .filter(|f| !root_fws.contains(f.name.as_str()))
        .collect();

    let commands = subfolder
        .commands
        .into_iter()
        .filter(|c| !root_cmds.contains(c.command.as_str()))
        .collect();

    AnalysisResult {
        languages: if diff_languages.is_empty() {
            subfolder.languages
        } else {
            diff_languages
        },
        frameworks,
        commands,
        structure: subfolder.structure,
        patterns: subfolder.patterns,
        sampled_files: subfolder.sampled_files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandInfo, FrameworkCategory, FrameworkInfo, LanguageInfo};

    fn lang(name: &str, percentage: u8) -> LanguageInfo {
        LanguageInfo {
            name: name.to_string(),
            file_count: 1,
            percentage,
        }
    }

    fn framework(name: &str) -> FrameworkInfo {
        FrameworkInfo {
            name: name.to_string(),
            category: FrameworkCategory::Web,
            confidence: 0.8,
        }
    }

    #[test]
    fn test_shared_frameworks_and_commands_removed() {
        let root = AnalysisResult {
            frameworks: vec![framework("React")],
            commands: vec![CommandInfo::new("test", "pnpm test", "package.json scripts")],
            ..Default::default()
        };
        let subfolder = AnalysisResult {
            frameworks: vec![framework("React"), framework("Vite")],
            commands: vec![
                CommandInfo::new("test", "pnpm test", "package.json scripts"),
                CommandInfo::new("build", "pnpm build", "package.json scripts"),
            ],
            ..Default::default()
        };

        let delta = compute_subfolder_delta(&root, subfolder);
        assert_eq!(delta.frameworks.len(), 1);
        assert_eq!(delta.frameworks[0].name, "Vite");
        assert_eq!(delta.commands.len(), 1);
        assert_eq!(delta.commands[0].name, "build");
    }

    #[test]
    fn test_dominant_language_kept_even_if_shared() {
        let root = AnalysisResult {
            languages: vec![lang("TypeScript", 60), lang("Python", 40)],
            ..Default::default()
        };
        let subfolder = AnalysisResult {
            languages: vec![lang("Python", 90)],
            ..Default::default()
        };

        let delta = compute_subfolder_delta(&root, subfolder);
        assert_eq!(delta.languages.len(), 1);
        assert_eq!(delta.languages[0].name, "Python");
    }

    #[test]
    fn test_languages_fall_back_when_no_difference() {
        let root = AnalysisResult {
            languages: vec![lang("TypeScript", 100)],
            ..Default::default()
        };
        let subfolder = AnalysisResult {
            languages: vec![lang("TypeScript", 40)],
            ..Default::default()
        };

        let delta = compute_subfolder_delta(&root, subfolder);
        assert_eq!(delta.languages.len(), 1);
        assert_eq!(delta.languages[0].name, "TypeScript");
    }
}
