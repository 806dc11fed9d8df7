//! Code formatting options for generated modules

use oxc_codegen::CodegenOptions;

/// Quote style for string literals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Single quotes: `'hello'`
    Single,
    /// Double quotes: `"hello"`
    #[default]
    Double,
}

/// Formatting options for code generation
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Quote style for string literals
    pub quote_style: QuoteStyle,
}

impl FormatOptions {
    pub fn with_quote_style(quote_style: QuoteStyle) -> Self {
        Self { quote_style }
    }

    pub(crate) fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            single_quote: self.quote_style == QuoteStyle::Single,
            ..CodegenOptions::default()
        }
    }
}
