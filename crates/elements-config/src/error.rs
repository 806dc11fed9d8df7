//! Error types for analyzer configuration and tsconfig loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Build configuration discovery
    #[error("no tsconfig.json found in {} or any parent directory", .searched_from.display())]
    ConfigNotFound { searched_from: PathBuf },

    #[error("tsconfig not found: {}", .0.display())]
    TsConfigMissing(PathBuf),

    #[error("invalid tsconfig {}: {message}", .path.display())]
    InvalidTsConfig { path: PathBuf, message: String },

    #[error("tsconfig extends cycle through {}", .0.display())]
    ExtendsCycle(PathBuf),

    // Analyzer config parsing/loading
    #[error("config file not found: {}", .0.display())]
    ConfigFileMissing(PathBuf),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("invalid package.json {}: {message}", .path.display())]
    InvalidPackageJson { path: PathBuf, message: String },

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::InvalidValue(err.to_string())
    }
}
