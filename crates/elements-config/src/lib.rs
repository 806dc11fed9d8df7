//! Configuration for the elements analyzer.
//!
//! Two kinds of configuration live here: the analyzer's own settings
//! ([`AnalyzerConfig`], merged from `elements.toml`, `package.json`, the
//! environment and CLI overrides) and the project's build configuration
//! ([`TsConfig`], discovered by walking upward to `tsconfig.json`).

pub mod config;
pub mod discovery;
pub mod error;
pub mod tsconfig;

pub use config::*;
pub use discovery::{ConfigDiscovery, ConfigSource};
pub use error::*;
pub use tsconfig::TsConfig;
