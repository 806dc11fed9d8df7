//! Lowering from the oxc AST to [`ModuleSummary`].

use std::path::Path;
use std::sync::Arc;

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, BindingPattern, BindingPatternKind, Class, ClassBody,
    ClassElement, Declaration, Decorator, ExportDefaultDeclarationKind, Expression,
    ImportDeclaration, ImportDeclarationSpecifier, MethodDefinitionKind, ObjectPropertyKind,
    Program, PropertyKey, Statement, TSAccessibility, TSLiteral, TSType, TSTypeName,
};
use oxc_span::{GetSpan, Span};
use rustc_hash::FxHashMap;

use super::jsdoc::{ParsedJsDoc, parse_jsdoc};
use super::summary::{
    Accessibility, ArgShape, ClassSummary, DecoratorCall, ExportEntry, ImportBinding, Imported,
    MemberKind, MemberSummary, ModuleSummary, NamePath, TypeShape,
};

/// JSDoc comments keyed by the start of the token they precede.
struct CommentMap<'s> {
    by_attachment: FxHashMap<u32, Span>,
    source: &'s str,
}

impl<'s> CommentMap<'s> {
    fn new(program: &Program<'_>, source: &'s str) -> Self {
        let mut by_attachment = FxHashMap::default();
        for comment in program.comments.iter() {
            if comment.is_jsdoc() {
                // The closest comment wins when several precede one token.
                by_attachment.insert(comment.attached_to, comment.content_span());
            }
        }
        Self {
            by_attachment,
            source,
        }
    }

    /// The doc comment attached at the first of `positions` that has one.
    fn doc_for(&self, positions: impl IntoIterator<Item = u32>) -> Option<ParsedJsDoc> {
        positions
            .into_iter()
            .find_map(|pos| self.by_attachment.get(&pos))
            .map(|span| parse_jsdoc(span.source_text(self.source)))
    }
}

/// Lower a parsed module.
pub fn lower_program(path: &Path, program: &Program<'_>, source: &str) -> ModuleSummary {
    let comments = CommentMap::new(program, source);
    let mut summary = ModuleSummary::new(path);

    for statement in &program.body {
        match statement {
            Statement::ImportDeclaration(decl) => lower_import(decl, &mut summary),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(decl) = &export.declaration {
                    for name in lower_declaration(decl, export.span, &comments, &mut summary) {
                        summary.exports.push(ExportEntry::Local {
                            exported: name.clone(),
                            local: name,
                        });
                    }
                }
                let specifier = export.source.as_ref().map(|s| s.value.to_string());
                for spec in &export.specifiers {
                    let exported = spec.exported.name().to_string();
                    let local = spec.local.name().to_string();
                    summary.exports.push(match &specifier {
                        Some(specifier) => ExportEntry::ReExport {
                            exported,
                            imported: imported_from_name(local),
                            specifier: specifier.clone(),
                        },
                        None => ExportEntry::Local { exported, local },
                    });
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                let local = match &export.declaration {
                    ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        lower_class(class, export.span, &comments, &mut summary)
                    }
                    ExportDefaultDeclarationKind::FunctionDeclaration(function) => {
                        function.id.as_ref().map(|id| {
                            let name = id.name.to_string();
                            summary.declarations.insert(name.clone());
                            name
                        })
                    }
                    ExportDefaultDeclarationKind::Identifier(ident) => Some(ident.name.to_string()),
                    _ => None,
                };
                if let Some(local) = local {
                    summary.exports.push(ExportEntry::Local {
                        exported: "default".to_string(),
                        local,
                    });
                }
            }
            Statement::ExportAllDeclaration(export) => {
                let specifier = export.source.value.to_string();
                summary.exports.push(match &export.exported {
                    Some(name) => ExportEntry::ReExport {
                        exported: name.name().to_string(),
                        imported: Imported::Namespace,
                        specifier,
                    },
                    None => ExportEntry::Star { specifier },
                });
            }
            _ => {
                if let Some(decl) = statement.as_declaration() {
                    lower_declaration(decl, statement.span(), &comments, &mut summary);
                }
            }
        }
    }

    summary
}

fn imported_from_name(name: String) -> Imported {
    if name == "default" {
        Imported::Default
    } else {
        Imported::Named(name)
    }
}

fn lower_import(decl: &ImportDeclaration<'_>, summary: &mut ModuleSummary) {
    let specifier = decl.source.value.to_string();
    for spec in decl.specifiers.iter().flatten() {
        let (local, imported) = match spec {
            ImportDeclarationSpecifier::ImportSpecifier(s) => (
                s.local.name.to_string(),
                imported_from_name(s.imported.name().to_string()),
            ),
            ImportDeclarationSpecifier::ImportDefaultSpecifier(s) => {
                (s.local.name.to_string(), Imported::Default)
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(s) => {
                (s.local.name.to_string(), Imported::Namespace)
            }
        };
        summary.imports.insert(
            local,
            ImportBinding {
                specifier: specifier.clone(),
                imported,
            },
        );
    }
}

/// Record a declaration and return the names it binds.
fn lower_declaration(
    decl: &Declaration<'_>,
    outer: Span,
    comments: &CommentMap<'_>,
    summary: &mut ModuleSummary,
) -> Vec<String> {
    let names: Vec<String> = match decl {
        Declaration::VariableDeclaration(var) => var
            .declarations
            .iter()
            .filter_map(|d| binding_name(&d.id))
            .collect(),
        Declaration::FunctionDeclaration(function) => {
            function.id.iter().map(|id| id.name.to_string()).collect()
        }
        Declaration::ClassDeclaration(class) => {
            return lower_class(class, outer, comments, summary).into_iter().collect();
        }
        Declaration::TSTypeAliasDeclaration(alias) => {
            let name = alias.id.name.to_string();
            summary
                .type_aliases
                .insert(name.clone(), lower_type(&alias.type_annotation));
            vec![name]
        }
        Declaration::TSInterfaceDeclaration(interface) => vec![interface.id.name.to_string()],
        Declaration::TSEnumDeclaration(e) => vec![e.id.name.to_string()],
        _ => Vec::new(),
    };
    summary.declarations.extend(names.iter().cloned());
    names
}

fn binding_name(pattern: &BindingPattern<'_>) -> Option<String> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(id) => Some(id.name.to_string()),
        BindingPatternKind::AssignmentPattern(assign) => binding_name(&assign.left),
        _ => None,
    }
}

fn lower_class(
    class: &Class<'_>,
    outer: Span,
    comments: &CommentMap<'_>,
    summary: &mut ModuleSummary,
) -> Option<String> {
    let name = class.id.as_ref()?.name.to_string();

    let positions = [Some(outer.start), class.decorators.first().map(|d| d.span.start), Some(class.span.start)];
    let doc = comments.doc_for(positions.into_iter().flatten());

    let lowered = ClassSummary {
        name: name.clone(),
        decorators: class.decorators.iter().map(lower_decorator).collect(),
        doc,
        super_class: class.super_class.as_ref().and_then(name_path),
        members: lower_members(&class.body, comments),
    };

    summary.declarations.insert(name.clone());
    if summary.classes.insert(name.clone(), Arc::new(lowered)).is_none() {
        summary.class_order.push(name.clone());
    }
    Some(name)
}

fn lower_members(body: &ClassBody<'_>, comments: &CommentMap<'_>) -> Vec<MemberSummary> {
    let mut members = Vec::new();

    for element in &body.body {
        match element {
            ClassElement::PropertyDefinition(prop) => {
                if prop.computed {
                    continue;
                }
                let Some((name, is_private_name)) = key_name(&prop.key) else {
                    continue;
                };
                members.push(MemberSummary {
                    name,
                    kind: MemberKind::Field,
                    accessibility: prop.accessibility.map(lower_accessibility),
                    is_static: prop.r#static,
                    is_private_name,
                    readonly: prop.readonly,
                    decorators: prop.decorators.iter().map(lower_decorator).collect(),
                    doc: member_doc(comments, &prop.decorators, element.span()),
                    declared_type: prop
                        .type_annotation
                        .as_ref()
                        .map(|t| lower_type(&t.type_annotation)),
                    initializer_type: prop.value.as_ref().and_then(literal_type),
                });
            }
            ClassElement::MethodDefinition(method) => {
                if method.kind == MethodDefinitionKind::Constructor {
                    lower_parameter_properties(method.value.params.items.iter(), comments, &mut members);
                    continue;
                }
                if method.computed {
                    continue;
                }
                let Some((name, is_private_name)) = key_name(&method.key) else {
                    continue;
                };
                let (kind, declared_type) = match method.kind {
                    MethodDefinitionKind::Get => (
                        MemberKind::Getter,
                        method
                            .value
                            .return_type
                            .as_ref()
                            .map(|t| lower_type(&t.type_annotation)),
                    ),
                    MethodDefinitionKind::Set => (
                        MemberKind::Setter,
                        method
                            .value
                            .params
                            .items
                            .first()
                            .and_then(|p| p.pattern.type_annotation.as_ref())
                            .map(|t| lower_type(&t.type_annotation)),
                    ),
                    _ => (MemberKind::Method, None),
                };
                members.push(MemberSummary {
                    name,
                    kind,
                    accessibility: method.accessibility.map(lower_accessibility),
                    is_static: method.r#static,
                    is_private_name,
                    readonly: false,
                    decorators: method.decorators.iter().map(lower_decorator).collect(),
                    doc: member_doc(comments, &method.decorators, element.span()),
                    declared_type,
                    initializer_type: None,
                });
            }
            _ => {}
        }
    }

    members
}

/// `constructor(public grid: GridType)` declares a property.
fn lower_parameter_properties<'p, 'a: 'p>(
    params: impl Iterator<Item = &'p oxc_ast::ast::FormalParameter<'a>>,
    comments: &CommentMap<'_>,
    members: &mut Vec<MemberSummary>,
) {
    for param in params {
        if param.accessibility.is_none() && !param.readonly {
            continue;
        }
        let Some(name) = binding_name(&param.pattern) else {
            continue;
        };
        members.push(MemberSummary {
            name,
            kind: MemberKind::Field,
            accessibility: param.accessibility.map(lower_accessibility),
            is_static: false,
            is_private_name: false,
            readonly: param.readonly,
            decorators: param.decorators.iter().map(lower_decorator).collect(),
            doc: member_doc(comments, &param.decorators, param.span),
            declared_type: param
                .pattern
                .type_annotation
                .as_ref()
                .map(|t| lower_type(&t.type_annotation)),
            initializer_type: None,
        });
    }
}

fn member_doc(
    comments: &CommentMap<'_>,
    decorators: &[Decorator<'_>],
    span: Span,
) -> Option<ParsedJsDoc> {
    let first_decorator = decorators.first().map(|d| d.span.start);
    comments.doc_for(first_decorator.into_iter().chain([span.start]))
}

fn key_name(key: &PropertyKey<'_>) -> Option<(String, bool)> {
    match key {
        PropertyKey::PrivateIdentifier(id) => Some((id.name.to_string(), true)),
        _ => key.static_name().map(|name| (name.into_owned(), false)),
    }
}

fn lower_accessibility(accessibility: TSAccessibility) -> Accessibility {
    match accessibility {
        TSAccessibility::Public => Accessibility::Public,
        TSAccessibility::Protected => Accessibility::Protected,
        TSAccessibility::Private => Accessibility::Private,
    }
}

fn lower_decorator(decorator: &Decorator<'_>) -> DecoratorCall {
    match &decorator.expression {
        Expression::CallExpression(call) => DecoratorCall {
            callee: name_path(&call.callee).unwrap_or_default(),
            args: call.arguments.iter().map(lower_argument).collect(),
        },
        other => DecoratorCall {
            callee: name_path(other).unwrap_or_default(),
            args: Vec::new(),
        },
    }
}

fn lower_argument(arg: &Argument<'_>) -> ArgShape {
    arg.as_expression().map_or(ArgShape::Unrecognized, lower_arg)
}

/// `Foo` or `ns.Foo` as a name path.
fn name_path(expr: &Expression<'_>) -> Option<NamePath> {
    match expr {
        Expression::Identifier(ident) => Some(vec![ident.name.to_string()]),
        Expression::StaticMemberExpression(member) => {
            let mut path = name_path(&member.object)?;
            path.push(member.property.name.to_string());
            Some(path)
        }
        Expression::ParenthesizedExpression(inner) => name_path(&inner.expression),
        _ => None,
    }
}

fn lower_arg(expr: &Expression<'_>) -> ArgShape {
    match expr {
        Expression::Identifier(_) | Expression::StaticMemberExpression(_) => {
            name_path(expr).map_or(ArgShape::Unrecognized, ArgShape::Reference)
        }
        Expression::CallExpression(call) => match name_path(&call.callee) {
            Some(callee) => ArgShape::Call {
                callee,
                args: call.arguments.iter().map(lower_argument).collect(),
            },
            None => ArgShape::Unrecognized,
        },
        Expression::ArrowFunctionExpression(arrow)
            if arrow.expression && arrow.params.items.is_empty() =>
        {
            match arrow.body.statements.first() {
                Some(Statement::ExpressionStatement(stmt)) => {
                    ArgShape::Arrow(Box::new(lower_arg(&stmt.expression)))
                }
                _ => ArgShape::Unrecognized,
            }
        }
        Expression::ObjectExpression(object) => ArgShape::Object(
            object
                .properties
                .iter()
                .filter_map(|prop| match prop {
                    ObjectPropertyKind::ObjectProperty(p) if !p.computed => p
                        .key
                        .static_name()
                        .map(|key| (key.into_owned(), lower_arg(&p.value))),
                    _ => None,
                })
                .collect(),
        ),
        Expression::ArrayExpression(array) => ArgShape::Array(
            array
                .elements
                .iter()
                .map(|element| match element {
                    ArrayExpressionElement::SpreadElement(_) | ArrayExpressionElement::Elision(_) => {
                        ArgShape::Unrecognized
                    }
                    other => other.as_expression().map_or(ArgShape::Unrecognized, lower_arg),
                })
                .collect(),
        ),
        Expression::BooleanLiteral(lit) => ArgShape::Bool(lit.value),
        Expression::StringLiteral(lit) => ArgShape::Str(lit.value.to_string()),
        Expression::TemplateLiteral(template) if template.expressions.is_empty() => template
            .quasis
            .first()
            .and_then(|quasi| quasi.value.cooked.as_ref())
            .map_or(ArgShape::Unrecognized, |cooked| ArgShape::Str(cooked.to_string())),
        Expression::ParenthesizedExpression(inner) => lower_arg(&inner.expression),
        Expression::TSAsExpression(inner) => lower_arg(&inner.expression),
        Expression::TSSatisfiesExpression(inner) => lower_arg(&inner.expression),
        Expression::TSNonNullExpression(inner) => lower_arg(&inner.expression),
        _ => ArgShape::Unrecognized,
    }
}

fn lower_type(ts_type: &TSType<'_>) -> TypeShape {
    match ts_type {
        TSType::TSBooleanKeyword(_) => TypeShape::Boolean,
        TSType::TSNumberKeyword(_) => TypeShape::Number,
        TSType::TSStringKeyword(_) => TypeShape::String,
        TSType::TSLiteralType(lit) => match &lit.literal {
            TSLiteral::BooleanLiteral(b) => TypeShape::BooleanLiteral(b.value),
            TSLiteral::NumericLiteral(_) => TypeShape::NumberLiteral,
            TSLiteral::StringLiteral(_) => TypeShape::String,
            _ => TypeShape::Other,
        },
        TSType::TSTypeReference(reference) => {
            type_name_path(&reference.type_name).map_or(TypeShape::Other, TypeShape::Reference)
        }
        TSType::TSUnionType(union) => TypeShape::Union(union.types.iter().map(lower_type).collect()),
        TSType::TSParenthesizedType(inner) => lower_type(&inner.type_annotation),
        _ => TypeShape::Other,
    }
}

fn type_name_path(name: &TSTypeName<'_>) -> Option<NamePath> {
    match name {
        TSTypeName::IdentifierReference(ident) => Some(vec![ident.name.to_string()]),
        TSTypeName::QualifiedName(qualified) => {
            let mut path = type_name_path(&qualified.left)?;
            path.push(qualified.right.name.to_string());
            Some(path)
        }
        _ => None,
    }
}

/// Widened type of an initializer, as TypeScript infers it for a mutable field.
fn literal_type(expr: &Expression<'_>) -> Option<TypeShape> {
    match expr {
        Expression::BooleanLiteral(_) => Some(TypeShape::Boolean),
        Expression::NumericLiteral(_) => Some(TypeShape::Number),
        Expression::StringLiteral(_) | Expression::TemplateLiteral(_) => Some(TypeShape::String),
        Expression::UnaryExpression(unary) => match &unary.argument {
            Expression::NumericLiteral(_) => Some(TypeShape::Number),
            _ => None,
        },
        Expression::ParenthesizedExpression(inner) => literal_type(&inner.expression),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use elements_gen::{ParseOptions, parse};
    use oxc_allocator::Allocator;

    fn lower(source: &str) -> ModuleSummary {
        let allocator = Allocator::default();
        let parsed = parse(&allocator, source, ParseOptions::typescript()).unwrap();
        lower_program(Path::new("/src/m.ts"), parsed.ast(), source)
    }

    #[test]
    fn import_and_export_tables() {
        let summary = lower(
            "import { A, B as C } from './a';\n\
             import D from './d';\n\
             import * as ns from './ns';\n\
             export { A as Alias };\n\
             export { default as Grid, X } from './grid';\n\
             export * from './all';\n\
             export * as tools from './tools';\n\
             export default C;\n",
        );

        assert_eq!(
            summary.imports.get("C"),
            Some(&ImportBinding {
                specifier: "./a".into(),
                imported: Imported::Named("B".into())
            })
        );
        assert_eq!(summary.imports["D"].imported, Imported::Default);
        assert_eq!(summary.imports["ns"].imported, Imported::Namespace);

        assert_eq!(
            summary.exports,
            vec![
                ExportEntry::Local {
                    exported: "Alias".into(),
                    local: "A".into()
                },
                ExportEntry::ReExport {
                    exported: "Grid".into(),
                    imported: Imported::Default,
                    specifier: "./grid".into()
                },
                ExportEntry::ReExport {
                    exported: "X".into(),
                    imported: Imported::Named("X".into()),
                    specifier: "./grid".into()
                },
                ExportEntry::Star {
                    specifier: "./all".into()
                },
                ExportEntry::ReExport {
                    exported: "tools".into(),
                    imported: Imported::Namespace,
                    specifier: "./tools".into()
                },
                ExportEntry::Local {
                    exported: "default".into(),
                    local: "C".into()
                },
            ]
        );
    }

    #[test]
    fn class_with_decorators_docs_and_members() {
        let summary = lower(
            r#"
/**
 * Toolbar.
 * @igxParent IgxGridComponent, *
 */
@Component({ selector: `igx-grid-toolbar`, providers: [{ provide: Token, useExisting: forwardRef(() => Toolbar) }] })
export class Toolbar extends ns.Base {
    /** @hidden */
    @Input() public hidden = false;

    @ContentChildren(Item, { descendants: true })
    public items: QueryList<Item>;

    public get size(): number { return 1; }
    public set size(value: number) {}

    #secret = 1;
    public static create() {}

    constructor(public readonly cdr: ChangeDetectorRef, private zone: NgZone, other: string) {
        super();
    }

    public show(): void {}
}
"#,
        );

        let class = &summary.classes["Toolbar"];
        assert_eq!(summary.class_order, vec!["Toolbar".to_string()]);
        assert_eq!(class.super_class, Some(vec!["ns".to_string(), "Base".to_string()]));
        assert_eq!(
            class.doc.as_ref().and_then(|d| d.tag_text("igxParent")),
            Some("IgxGridComponent, *")
        );

        let decorator = &class.decorators[0];
        assert_eq!(decorator.callee, vec!["Component".to_string()]);
        let options = &decorator.args[0];
        assert_eq!(options.get("selector"), Some(&ArgShape::Str("igx-grid-toolbar".into())));
        match options.get("providers") {
            Some(ArgShape::Array(items)) => {
                assert_eq!(items[0].get("provide"), Some(&ArgShape::Reference(vec!["Token".into()])));
                assert!(matches!(items[0].get("useExisting"), Some(ArgShape::Call { .. })));
            }
            other => panic!("unexpected providers shape: {other:?}"),
        }

        let names: Vec<_> = class.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["hidden", "items", "size", "size", "secret", "create", "cdr", "zone", "show"]
        );

        let hidden = &class.members[0];
        assert!(hidden.doc.as_ref().is_some_and(|d| d.has_tag("hidden")));
        assert_eq!(hidden.initializer_type, Some(TypeShape::Boolean));
        assert_eq!(hidden.accessibility, Some(Accessibility::Public));

        let items = &class.members[1];
        assert_eq!(
            items.decorators[0].args[1].get("descendants"),
            Some(&ArgShape::Bool(true))
        );

        assert_eq!(class.members[2].kind, MemberKind::Getter);
        assert_eq!(class.members[3].kind, MemberKind::Setter);
        assert_eq!(class.members[3].declared_type, Some(TypeShape::Number));
        assert!(class.members[4].is_private_name);
        assert!(class.members[5].is_static);

        let cdr = &class.members[6];
        assert!(cdr.readonly);
        assert_eq!(cdr.declared_type, Some(TypeShape::Reference(vec!["ChangeDetectorRef".into()])));
        assert_eq!(class.members[7].accessibility, Some(Accessibility::Private));
    }

    #[test]
    fn type_aliases_and_unions() {
        let summary = lower(
            "export type Flag = true | false;\n\
             type Size = (number);\n\
             export interface Shape {}\n\
             export const enumLike = 1;\n",
        );
        assert_eq!(
            summary.type_aliases["Flag"],
            TypeShape::Union(vec![TypeShape::BooleanLiteral(true), TypeShape::BooleanLiteral(false)])
        );
        assert_eq!(summary.type_aliases["Size"], TypeShape::Number);
        assert!(summary.declarations.contains("Shape"));
        assert!(summary.declarations.contains("enumLike"));
        assert!(!summary.exports.iter().any(|e| matches!(e, ExportEntry::Local { local, .. } if local == "Size")));
    }

    #[test]
    fn default_exported_class_is_declared() {
        let summary = lower("export default class Grid {}\n");
        assert!(summary.classes.contains_key("Grid"));
        assert_eq!(
            summary.exports,
            vec![ExportEntry::Local {
                exported: "default".into(),
                local: "Grid".into()
            }]
        );
    }
}
