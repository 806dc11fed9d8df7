//! Error types for TypeScript code generation

use miette::Diagnostic;
use thiserror::Error;

/// Errors that can occur while generating or reading modules
#[derive(Error, Debug, Diagnostic)]
pub enum GenError {
    /// Invalid identifier name
    #[error("Invalid identifier: '{identifier}'{}", suggestion.as_ref().map(|s| format!(" - {}", s)).unwrap_or_default())]
    #[diagnostic(code(elements::gen::invalid_identifier))]
    InvalidIdentifier {
        identifier: String,
        suggestion: Option<String>,
    },

    /// Code generation failed
    #[error("Code generation failed: {context}{}", reason.as_ref().map(|r| format!(" - {}", r)).unwrap_or_default())]
    #[diagnostic(code(elements::gen::codegen_failed))]
    CodegenFailed {
        context: String,
        reason: Option<String>,
    },

    /// Source could not be parsed
    #[error("Parse failed: {message}")]
    #[diagnostic(code(elements::gen::parse_failed))]
    ParseFailed { message: String },
}

impl GenError {
    /// Create a CodegenFailed error with reason
    pub fn codegen_failed_with_reason(
        context: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::CodegenFailed {
            context: context.into(),
            reason: Some(reason.into()),
        }
    }
}

/// Result type for code generation operations
pub type Result<T> = std::result::Result<T, GenError>;
