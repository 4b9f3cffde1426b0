//! Configuration
//!
//! Settings types and the figment-based loader.

mod loader;
mod types;

pub use loader::{ConfigLoader, ConfigOverrides, CONFIG_FILE};
pub use types::{Config, DEFAULT_IGNORE};
