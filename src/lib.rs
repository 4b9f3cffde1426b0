//! Agentseed - AI-Agent Context Generator for Repositories
//!
//! Inspects a repository's file tree and configuration files to infer its
//! language mix, frameworks, runnable commands, and structural conventions,
//! then renders that inference into agent-context documents (AGENTS.md,
//! CLAUDE.md, .cursorrules, copilot-instructions.md, .windsurfrules),
//! optionally refined by an LLM provider.
//!
//! ## Core Features
//!
//! - **Heuristic analysis**: extension-based language shares, signature-based
//!   framework detection, per-ecosystem command extraction
//! - **Subfolder scoping**: monorepo-aware detection of directories that
//!   deserve their own scoped documents, deduplicated against ancestors
//! - **Staleness tracking**: commit metadata embedded in generated files
//!   skips redundant regeneration
//! - **Provider chain**: Claude, OpenAI, or local Ollama with retry on
//!   transient failures
//!
//! ## Quick Start
//!
//! ```ignore
//! use agentseed::analyzer;
//! use agentseed::config::Config;
//!
//! let config = Config::default();
//! let analysis = analyzer::analyze(&root, &config).await?;
//! let subfolders = agentseed::scanner::detect_subfolders(&root, &config.ignore);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: concurrent detector fan-out producing an `AnalysisResult`
//! - [`scanner`]: subfolder qualification engine
//! - [`generator`]: core-content generation and per-format rendering
//! - [`ai`]: LLM provider abstraction with retry and usage tracking
//! - [`config`]: figment-based configuration loading

pub mod ai;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod generator;
pub mod git;
pub mod scanner;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, ConfigOverrides};

// Error Types
pub use types::{AgentseedError, ErrorCategory, Result};

// Analysis
pub use analyzer::analyze;
pub use scanner::detect_subfolders;
pub use types::{AnalysisResult, SubfolderCandidate};

// AI
pub use ai::{create_provider, LlmProvider, LlmRequest, LlmResponse, SharedProvider};
