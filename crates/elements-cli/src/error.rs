//! Error handling for the Elements CLI.
//!
//! Library errors are wrapped in [`CliError`]; `main` turns them into miette
//! reports via [`cli_error_to_miette`], adding a hint where one applies.
//!
//! # Example
//!
//! ```rust,no_run
//! use elements_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_template(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Set `template` in elements.toml")
//! }
//! ```

mod report;

use elements_analyzer::AnalyzerError;
use elements_config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Analyzer or build configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The analyzer pipeline failed
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// `check` found a stale output module
    #[error("Registration table is out of date: {}", .0.display())]
    Stale(PathBuf),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

impl CliError {
    /// A suggestion for fixing the error, when there is an obvious one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Config(err) | CliError::Analyzer(AnalyzerError::Config(err)) => config_hint(err),
            CliError::Stale(_) => Some("Run `elements generate` and commit the result"),
            CliError::FileNotFound(_) => Some("Paths are resolved against --cwd"),
            _ => None,
        }
    }
}

fn config_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::ConfigNotFound { .. } => {
            Some("Run from the library root or pass --tsconfig <FILE>")
        }
        ConfigError::TsConfigMissing(_) => Some("Check the `tsconfig` setting or --tsconfig"),
        ConfigError::ConfigFileMissing(_) => Some("Check the path given to --config"),
        ConfigError::InvalidValue(_) => {
            Some("Check elements.toml, the `elementsAnalyzer` field of package.json and ELEMENTS_* variables")
        }
        ConfigError::ExtendsCycle(_) => Some("Remove the circular `extends` chain"),
        _ => None,
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_names_the_output() {
        let err = CliError::Stale(PathBuf::from("src/analyzer/elements.config.ts"));
        let msg = err.to_string();
        assert!(msg.contains("out of date"));
        assert!(msg.contains("src/analyzer/elements.config.ts"));
        assert!(err.hint().unwrap().contains("elements generate"));
    }

    #[test]
    fn test_config_errors_carry_hints_through_the_analyzer() {
        let missing = ConfigError::ConfigNotFound {
            searched_from: PathBuf::from("/work/lib"),
        };
        let direct: CliError = ConfigError::ConfigNotFound {
            searched_from: PathBuf::from("/work/lib"),
        }
        .into();
        let wrapped: CliError = AnalyzerError::Config(missing).into();

        assert_eq!(direct.hint(), wrapped.hint());
        assert!(wrapped.hint().unwrap().contains("--tsconfig"));
        assert!(wrapped.to_string().contains("/work/lib"));
    }

    #[test]
    fn test_analyzer_errors_without_hint() {
        let err: CliError = AnalyzerError::FileSet {
            message: "bad glob".into(),
        }
        .into();
        assert!(err.hint().is_none());
        assert!(err.to_string().contains("bad glob"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/elements.config.ts").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::ConfigFileMissing(PathBuf::from("elements.toml")));

        let msg = result.with_hint("Try creating the file").unwrap_err().to_string();
        assert!(msg.contains("elements.toml"));
        assert!(msg.contains("Hint: Try creating the file"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), CliError> = Err(CliError::InvalidArgument("--cwd".into()));

        let msg = result.context("Failed to start").unwrap_err().to_string();
        assert!(msg.starts_with("Failed to start: Invalid argument"));
    }
}
