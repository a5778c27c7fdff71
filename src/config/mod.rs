//! Configuration module for the digit sound generator.
//!
//! Provides `GeneratorConfig` (top-level settings), its sub-tables,
//! `AppPaths` for the platform settings location, and TOML persistence via
//! `GeneratorConfig::load` / `GeneratorConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{BatchConfig, FailurePolicy, GeneratorConfig, InputConfig, OutputConfig};
