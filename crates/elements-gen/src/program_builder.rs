//! Incremental program builder for module generation

use crate::error::{GenError, Result};
use crate::format::FormatOptions;
use crate::js_builder::JsBuilder;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_codegen::Codegen;
use oxc_span::{SPAN, SourceType};
use std::io::Write;

/// Incremental program builder
///
/// Collects statements and prints them as one TypeScript module.
pub struct ProgramBuilder<'a> {
    js: JsBuilder<'a>,
    body: Vec<Statement<'a>>,
    source_type: SourceType,
}

impl<'a> ProgramBuilder<'a> {
    /// Create a new program builder for a TypeScript module
    pub fn new(allocator: &'a Allocator) -> Self {
        Self::with_source_type(allocator, SourceType::ts())
    }

    pub fn with_source_type(allocator: &'a Allocator, source_type: SourceType) -> Self {
        Self {
            js: JsBuilder::new(allocator),
            body: Vec::new(),
            source_type,
        }
    }

    /// Node builder sharing this program's allocator
    pub fn js(&self) -> &JsBuilder<'a> {
        &self.js
    }

    pub fn push(&mut self, stmt: Statement<'a>) {
        self.body.push(stmt);
    }

    pub fn extend(&mut self, stmts: impl IntoIterator<Item = Statement<'a>>) {
        self.body.extend(stmts);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Write the program to a writer
    ///
    /// Consumes the builder since statements are moved into the program.
    pub fn write_to<W: Write>(self, writer: &mut W, opts: &FormatOptions) -> Result<()> {
        let code = self.generate(opts)?;
        writer
            .write_all(code.as_bytes())
            .map_err(|e| GenError::codegen_failed_with_reason("Write error", e.to_string()))
    }

    /// Generate the complete program as a string
    pub fn generate(self, opts: &FormatOptions) -> Result<String> {
        let options = opts.codegen_options();
        let program = self.build_program();
        let result = Codegen::new().with_options(options).build(&program);
        Ok(result.code)
    }

    /// Build the program AST
    pub fn build_program(self) -> Program<'a> {
        let ast = self.js.ast();
        let body_vec = ast.vec_from_iter(self.body);
        ast.program(
            SPAN,
            self.source_type,
            "",
            ast.vec(), // comments
            None,      // hashbang
            ast.vec(), // directives
            body_vec,
        )
    }
}
