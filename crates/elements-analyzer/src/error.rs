use std::path::PathBuf;

use elements_config::ConfigError;
use elements_gen::GenError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Errors that stop an analyzer run.
///
/// Ambiguous source facts are never errors; they are dropped and logged.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    #[error(transparent)]
    #[diagnostic(code(elements::config))]
    Config(#[from] ConfigError),

    /// Failed to read or write a file.
    #[error("failed to access '{}': {source}", .path.display())]
    #[diagnostic(code(elements::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Walking the tsconfig directory failed.
    #[error("failed to collect source files: {message}")]
    #[diagnostic(code(elements::file_set))]
    FileSet { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Gen(#[from] GenError),

    /// The template module could not be parsed.
    #[error("failed to parse template '{}': {message}", .path.display())]
    #[diagnostic(code(elements::template_parse))]
    TemplateParse { path: PathBuf, message: String },

    /// The template does not declare the registered component array.
    #[error("template '{}' does not declare `{export}`", .path.display())]
    #[diagnostic(
        code(elements::missing_registration),
        help("add `export const {export} = [...]` listing the root components")
    )]
    MissingRegistration { path: PathBuf, export: String },

    /// A type's declaring file cannot be imported relative to the template.
    #[error("cannot import '{}' relative to '{}'", .to.display(), .from.display())]
    #[diagnostic(code(elements::import_path))]
    ImportPath { from: PathBuf, to: PathBuf },
}

impl AnalyzerError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
