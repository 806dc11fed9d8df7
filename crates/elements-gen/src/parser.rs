//! Parser façade for reading existing TypeScript modules
//!
//! Wraps `oxc_parser` and exposes the top-level import table of a module,
//! which is what the generator needs to splice new imports into a
//! hand-written file.

#[cfg(feature = "parser")]
mod parser_impl {
    use crate::error::{GenError, Result};
    use oxc_allocator::Allocator;
    use oxc_ast::ast::{ImportDeclarationSpecifier, Statement};
    use oxc_parser::Parser;
    use oxc_span::{GetSpan, SourceType};

    /// Parse options for reading source code
    #[derive(Debug, Clone)]
    pub struct ParseOptions {
        /// Source type (JavaScript, TypeScript, JSX, TSX)
        pub source_type: SourceType,
        /// Allow parsing errors (returns the recovered AST)
        pub allow_errors: bool,
    }

    impl Default for ParseOptions {
        fn default() -> Self {
            Self::typescript()
        }
    }

    impl ParseOptions {
        /// Create parse options from file path (auto-detects source type)
        pub fn from_path(path: &str) -> Self {
            Self {
                source_type: SourceType::from_path(path).unwrap_or(SourceType::ts()),
                allow_errors: false,
            }
        }

        pub fn typescript() -> Self {
            Self {
                source_type: SourceType::ts(),
                allow_errors: false,
            }
        }

        /// Keep the recovered AST instead of failing on syntax errors
        pub fn allowing_errors(mut self) -> Self {
            self.allow_errors = true;
            self
        }
    }

    /// Parse diagnostic information
    #[derive(Debug, Clone)]
    pub struct ParseDiagnostic {
        pub message: String,
        /// Byte range of the first label, when the parser reported one
        pub span: Option<(u32, u32)>,
    }

    /// A top-level import declaration, copied out of the AST.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ImportInfo {
        /// Byte range of the whole declaration
        pub start: u32,
        pub end: u32,
        pub source: String,
        /// Local binding names introduced by the declaration
        pub locals: Vec<String>,
    }

    /// Parsed program with AST and metadata
    pub struct ParsedProgram<'a> {
        pub program: oxc_ast::ast::Program<'a>,
        pub diagnostics: Vec<ParseDiagnostic>,
        /// Parser gave up; the AST is empty
        pub panicked: bool,
    }

    impl<'a> ParsedProgram<'a> {
        pub fn ast(&self) -> &oxc_ast::ast::Program<'a> {
            &self.program
        }

        pub fn has_errors(&self) -> bool {
            !self.diagnostics.is_empty()
        }

        /// Top-level import declarations in source order
        pub fn imports(&self) -> Vec<ImportInfo> {
            self.program
                .body
                .iter()
                .filter_map(|stmt| match stmt {
                    Statement::ImportDeclaration(decl) => Some(decl),
                    _ => None,
                })
                .map(|decl| {
                    let locals = decl
                        .specifiers
                        .iter()
                        .flatten()
                        .map(|spec| match spec {
                            ImportDeclarationSpecifier::ImportSpecifier(s) => s.local.name.to_string(),
                            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                                s.local.name.to_string()
                            }
                            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                                s.local.name.to_string()
                            }
                        })
                        .collect();
                    let span = decl.span();
                    ImportInfo {
                        start: span.start,
                        end: span.end,
                        source: decl.source.value.to_string(),
                        locals,
                    }
                })
                .collect()
        }
    }

    /// Parse source code into an AST
    ///
    /// Fails on syntax errors unless `options.allow_errors` is set.
    pub fn parse<'a>(
        allocator: &'a Allocator,
        source: &'a str,
        options: ParseOptions,
    ) -> Result<ParsedProgram<'a>> {
        let parser = Parser::new(allocator, source, options.source_type);
        let result = parser.parse();

        let diagnostics: Vec<ParseDiagnostic> = result
            .errors
            .iter()
            .map(|err| ParseDiagnostic {
                message: err.to_string(),
                span: err
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.first())
                    .map(|label| {
                        let start = label.offset() as u32;
                        (start, start + label.len() as u32)
                    }),
            })
            .collect();

        if !options.allow_errors && !diagnostics.is_empty() {
            return Err(GenError::ParseFailed {
                message: diagnostics
                    .iter()
                    .map(|d| d.message.clone())
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(ParsedProgram {
            program: result.program,
            diagnostics,
            panicked: result.panicked,
        })
    }
}

#[cfg(feature = "parser")]
pub use parser_impl::*;
