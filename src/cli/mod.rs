//! Command-Line Interface
//!
//! Thin glue between argument parsing and the analyzer/generator core.

pub mod commands;
pub mod util;
