//! Analysis Result Types
//!
//! Immutable value types produced by one repository analysis pass.
//! An `AnalysisResult` is owned by the caller of `analyze`; no component
//! retains references across calls.

use serde::{Deserialize, Serialize};

// =============================================================================
// Languages
// =============================================================================

/// A detected language with its file-count share of classified files.
///
/// Percentages are rounded independently per language and are not guaranteed
/// to sum to 100 (display-only approximation).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub file_count: usize,
    pub percentage: u8,
}

// =============================================================================
// Frameworks
// =============================================================================

/// Framework signature category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkCategory {
    Web,
    Api,
    Testing,
    Build,
    Orm,
    Data,
    Etl,
    Mlops,
    Streaming,
    Other,
}

impl std::fmt::Display for FrameworkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Web => "web",
            Self::Api => "api",
            Self::Testing => "testing",
            Self::Build => "build",
            Self::Orm => "orm",
            Self::Data => "data",
            Self::Etl => "etl",
            Self::Mlops => "mlops",
            Self::Streaming => "streaming",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// A confidence-scored framework hit.
///
/// Confidence is a heuristic score in (0, 1], not a probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkInfo {
    pub name: String,
    pub category: FrameworkCategory,
    pub confidence: f32,
}

// =============================================================================
// Commands
// =============================================================================

/// A runnable command inferred from an ecosystem manifest.
///
/// No uniqueness across sources: the same logical action (e.g. "test") may
/// appear once per detected ecosystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    /// Literal invocable string
    pub command: String,
    /// Origin label, e.g. "Makefile", "Dagster"
    pub source: String,
}

impl CommandInfo {
    pub fn new(
        name: impl Into<String>,
        command: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            source: source.into(),
        }
    }
}

// =============================================================================
// Structure
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Directory,
}

/// One entry in the depth-bounded directory tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub depth: usize,
}

/// Depth-bounded structural summary of the tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureInfo {
    pub total_files: usize,
    pub total_dirs: usize,
    /// Lexicographically sorted, depth-bounded (dirs <=3, files <=2)
    pub tree: Vec<DirectoryEntry>,
    /// Deduplicated conventional entry points
    pub entry_points: Vec<String>,
}

// =============================================================================
// Patterns
// =============================================================================

/// Dominant file naming convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "camelCase")]
    Camel,
    #[serde(rename = "snake_case")]
    Snake,
    #[serde(rename = "kebab-case")]
    Kebab,
    #[serde(rename = "PascalCase")]
    Pascal,
    #[serde(rename = "mixed")]
    Mixed,
}

impl std::fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Camel => "camelCase",
            Self::Snake => "snake_case",
            Self::Kebab => "kebab-case",
            Self::Pascal => "PascalCase",
            Self::Mixed => "mixed",
        };
        write!(f, "{}", s)
    }
}

/// File organization classification, chosen by strict precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileOrganization {
    FeatureBased,
    ModuleBased,
    LayerBased,
    ComponentBased,
    DomainBased,
    Flat,
}

impl std::fmt::Display for FileOrganization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FeatureBased => "feature-based",
            Self::ModuleBased => "module-based",
            Self::LayerBased => "layer-based",
            Self::ComponentBased => "component-based",
            Self::DomainBased => "domain-based",
            Self::Flat => "flat",
        };
        write!(f, "{}", s)
    }
}

/// Naming and organization conventions plus discovered config/CI files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternInfo {
    pub naming_convention: NamingConvention,
    pub file_organization: FileOrganization,
    pub has_monorepo: bool,
    pub config_files: Vec<String>,
    pub ci_files: Vec<String>,
}

impl Default for PatternInfo {
    fn default() -> Self {
        Self {
            naming_convention: NamingConvention::Mixed,
            file_organization: FileOrganization::Flat,
            has_monorepo: false,
            config_files: Vec::new(),
            ci_files: Vec::new(),
        }
    }
}

// =============================================================================
// Sampled Files
// =============================================================================

/// Sampling priority, processed in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplePriority {
    Entry,
    Config,
    Source,
    Test,
}

impl std::fmt::Display for SamplePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Entry => "entry",
            Self::Config => "config",
            Self::Source => "source",
            Self::Test => "test",
        };
        write!(f, "{}", s)
    }
}

/// A file sampled for LLM context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampledFile {
    pub path: String,
    pub content: String,
    pub priority: SamplePriority,
    pub size_bytes: usize,
}

// =============================================================================
// Subfolder Candidates
// =============================================================================

/// A directory judged to deserve its own scoped analysis.
///
/// Lifetime is a single scan pass; never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubfolderCandidate {
    pub relative_path: String,
    pub reason: String,
}

// =============================================================================
// Aggregate
// =============================================================================

/// Immutable aggregate produced once per analyzed root
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub languages: Vec<LanguageInfo>,
    pub frameworks: Vec<FrameworkInfo>,
    pub commands: Vec<CommandInfo>,
    pub structure: StructureInfo,
    pub patterns: PatternInfo,
    pub sampled_files: Vec<SampledFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naming_convention_display() {
        assert_eq!(NamingConvention::Camel.to_string(), "camelCase");
        assert_eq!(NamingConvention::Kebab.to_string(), "kebab-case");
        assert_eq!(NamingConvention::Mixed.to_string(), "mixed");
    }

    #[test]
    fn test_file_organization_display() {
        assert_eq!(FileOrganization::FeatureBased.to_string(), "feature-based");
        assert_eq!(FileOrganization::Flat.to_string(), "flat");
    }

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&FrameworkCategory::Etl).unwrap();
        assert_eq!(json, "\"etl\"");
    }
}
