//! Language Detector
//!
//! Counts source files by extension via a fixed extension→language table and
//! computes integer percentage shares of classified files. Unclassified
//! extensions are excluded from the denominator. Zero classified files yields
//! an empty result, not an error.

use std::path::Path;

use super::walk::RepoWalker;
use crate::types::LanguageInfo;

/// Fixed extension→language table (extensions lowercase, without the dot)
const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("ts", "TypeScript"),
    ("tsx", "TypeScript"),
    ("js", "JavaScript"),
    ("jsx", "JavaScript"),
    ("mjs", "JavaScript"),
    ("cjs", "JavaScript"),
    ("py", "Python"),
    ("rs", "Rust"),
    ("go", "Go"),
    ("java", "Java"),
    ("kt", "Kotlin"),
    ("rb", "Ruby"),
    ("php", "PHP"),
    ("cs", "C#"),
    ("cpp", "C++"),
    ("c", "C"),
    ("h", "C"),
    ("hpp", "C++"),
    ("swift", "Swift"),
    ("scala", "Scala"),
    ("ex", "Elixir"),
    ("exs", "Elixir"),
    ("erl", "Erlang"),
    ("hs", "Haskell"),
    ("lua", "Lua"),
    ("r", "R"),
    ("dart", "Dart"),
    ("vue", "Vue"),
    ("svelte", "Svelte"),
    ("astro", "Astro"),
    ("sql", "SQL"),
    ("hql", "HiveQL"),
    ("ddl", "SQL"),
    ("dml", "SQL"),
    ("plsql", "PL/SQL"),
    ("pgsql", "PL/pgSQL"),
    ("sh", "Shell"),
    ("bash", "Shell"),
    ("zsh", "Shell"),
    ("css", "CSS"),
    ("scss", "SCSS"),
    ("less", "Less"),
    ("html", "HTML"),
    ("yml", "YAML"),
    ("yaml", "YAML"),
    ("toml", "TOML"),
    ("tf", "Terraform"),
    ("tfvars", "Terraform"),
];

fn language_for_extension(ext: &str) -> Option<&'static str> {
    let lower = ext.to_lowercase();
    EXTENSION_LANGUAGES
        .iter()
        .find(|(e, _)| *e == lower)
        .map(|(_, lang)| *lang)
}

/// Detect the language mix under `root`, respecting directory-name exclusions.
///
/// Sorted descending by percentage; ties preserve counting-pass insertion
/// order. Percentages are rounded independently and may not sum to 100.
pub fn detect_languages(root: &Path, ignore: &[String]) -> Vec<LanguageInfo> {
    let files = RepoWalker::new(root, ignore).files();

    // Vec preserves first-seen order for deterministic tie handling
    let mut counts: Vec<(&'static str, usize)> = Vec::new();

    for file in &files {
        let ext = match file.rsplit_once('.') {
            Some((_, ext)) if !ext.contains('/') => ext,
            _ => continue,
        };
        if let Some(lang) = language_for_extension(ext) {
            match counts.iter_mut().find(|(name, _)| *name == lang) {
                Some((_, count)) => *count += 1,
                None => counts.push((lang, 1)),
            }
        }
    }

    let total: usize = counts.iter().map(|(_, c)| c).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut languages: Vec<LanguageInfo> = counts
        .into_iter()
        .map(|(name, file_count)| LanguageInfo {
            name: name.to_string(),
            file_count,
            percentage: ((file_count as f64 / total as f64) * 100.0).round() as u8,
        })
        .collect();

    // Stable sort keeps insertion order on equal percentages
    languages.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    languages
}
