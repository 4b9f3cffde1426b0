//! CLI Commands

pub mod config;
pub mod init;
pub mod scan;
