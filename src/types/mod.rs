//! Core Types
//!
//! Error types and analysis value types shared across the crate.

pub mod analysis;
pub mod error;

pub use analysis::{
    AnalysisResult, CommandInfo, DirectoryEntry, EntryType, FileOrganization, FrameworkCategory,
    FrameworkInfo, LanguageInfo, NamingConvention, PatternInfo, SampledFile, SamplePriority,
    StructureInfo, SubfolderCandidate,
};
pub use error::{AgentseedError, ErrorCategory, ErrorClassifier, LlmError, Result};
