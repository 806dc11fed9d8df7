//! Expression and statement builders over `oxc_ast::AstBuilder`

use crate::error::{GenError, Result};
use crate::format::FormatOptions;
use crate::program_builder::ProgramBuilder;
use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast::{AstBuilder, NONE};
use oxc_span::SPAN;

/// Builder for the small slice of TypeScript the generator emits:
/// literals, identifiers, arrays, objects, `const` bindings and named
/// imports.
///
/// All strings are copied into the allocator, so callers may pass
/// short-lived `&str`s.
#[derive(Clone, Copy)]
pub struct JsBuilder<'a> {
    ast: AstBuilder<'a>,
    allocator: &'a Allocator,
}

impl<'a> JsBuilder<'a> {
    pub fn new(allocator: &'a Allocator) -> Self {
        Self {
            ast: AstBuilder::new(allocator),
            allocator,
        }
    }

    /// The underlying AST builder
    pub fn ast(&self) -> AstBuilder<'a> {
        self.ast
    }

    pub fn allocator(&self) -> &'a Allocator {
        self.allocator
    }

    fn atom(&self, value: &str) -> Atom<'a> {
        self.ast.atom(value)
    }

    /// `name`
    pub fn ident(&self, name: &str) -> Expression<'a> {
        self.ast.expression_identifier(SPAN, self.atom(name))
    }

    /// `"value"`
    pub fn string(&self, value: &str) -> Expression<'a> {
        self.ast.expression_string_literal(SPAN, self.atom(value), None)
    }

    pub fn bool(&self, value: bool) -> Expression<'a> {
        self.ast.expression_boolean_literal(SPAN, value)
    }

    /// `[a, b, c]`
    pub fn array(&self, elements: Vec<Expression<'a>>) -> Expression<'a> {
        let elements = self
            .ast
            .vec_from_iter(elements.into_iter().map(ArrayExpressionElement::from));
        self.ast.expression_array(SPAN, elements)
    }

    /// `{ a: 1, b: 2 }`
    pub fn object(&self, props: Vec<ObjectPropertyKind<'a>>) -> Expression<'a> {
        let props = self.ast.vec_from_iter(props);
        self.ast.expression_object(SPAN, props)
    }

    /// `key: value` inside an object literal
    pub fn prop(&self, key: &str, value: Expression<'a>) -> ObjectPropertyKind<'a> {
        let key = self.ast.property_key_static_identifier(SPAN, self.atom(key));
        self.ast.object_property_kind_object_property(
            SPAN,
            PropertyKind::Init,
            key,
            value,
            false, // method
            false, // shorthand
            false, // computed
        )
    }

    fn const_declaration(&self, name: &str, init: Expression<'a>) -> Declaration<'a> {
        let kind = VariableDeclarationKind::Const;
        let id = self.ast.binding_pattern(
            self.ast.binding_pattern_kind_binding_identifier(SPAN, self.atom(name)),
            NONE,
            false,
        );
        let declarator = self.ast.variable_declarator(SPAN, kind, id, Some(init), false);
        self.ast
            .declaration_variable(SPAN, kind, self.ast.vec1(declarator), false)
    }

    /// `const name = init;`
    pub fn const_decl(&self, name: &str, init: Expression<'a>) -> Statement<'a> {
        Statement::from(self.const_declaration(name, init))
    }

    /// `export const name = init;`
    pub fn export_const(&self, name: &str, init: Expression<'a>) -> ModuleDeclaration<'a> {
        self.ast.module_declaration_export_named_declaration(
            SPAN,
            Some(self.const_declaration(name, init)),
            self.ast.vec(),
            None,
            ImportOrExportKind::Value,
            NONE,
        )
    }

    /// `import { a, b } from "source";`
    pub fn import_named(&self, names: Vec<&str>, source: &str) -> ModuleDeclaration<'a> {
        let specifiers = self.ast.vec_from_iter(names.into_iter().map(|name| {
            self.ast.import_declaration_specifier_import_specifier(
                SPAN,
                self.ast.module_export_name_identifier_name(SPAN, self.atom(name)),
                self.ast.binding_identifier(SPAN, self.atom(name)),
                ImportOrExportKind::Value,
            )
        }));
        self.ast.module_declaration_import_declaration(
            SPAN,
            Some(specifiers),
            self.ast.string_literal(SPAN, self.atom(source), None),
            None,
            NONE,
            ImportOrExportKind::Value,
        )
    }

    /// Print `stmts` as a module with default formatting
    pub fn program(&self, stmts: Vec<Statement<'a>>) -> Result<String> {
        self.program_with(stmts, &FormatOptions::default())
    }

    pub fn program_with(&self, stmts: Vec<Statement<'a>>, opts: &FormatOptions) -> Result<String> {
        let mut program = ProgramBuilder::new(self.allocator);
        program.extend(stmts);
        program.generate(opts)
    }
}

/// Reject names that cannot be printed as a bare identifier
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c == '_' || c == '$' || c.is_alphabetic());
    if valid_start && chars.all(|c| c == '_' || c == '$' || c.is_alphanumeric()) {
        return Ok(());
    }
    Err(GenError::InvalidIdentifier {
        identifier: name.to_string(),
        suggestion: Some("identifiers must start with a letter, '_' or '$'".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_validated() {
        assert!(validate_identifier("IgxGridComponent").is_ok());
        assert!(validate_identifier("$el_2").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("2fast").is_err());
        assert!(validate_identifier("a-b").is_err());
    }
}
