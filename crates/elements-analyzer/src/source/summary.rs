//! Owned, AST-free facts about one module.
//!
//! A [`ModuleSummary`] is everything the later stages need from a source
//! file: its import and export tables, top-level declarations, classes with
//! their decorators and members, and type aliases. Lowering happens once per
//! file so the arena-backed AST never outlives parsing.

use std::path::PathBuf;
use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use super::jsdoc::ParsedJsDoc;

/// A dotted name as written in source: `Foo` or `ns.Foo`.
pub type NamePath = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    Named(String),
    Default,
    Namespace,
}

/// What a local import binding refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub specifier: String,
    pub imported: Imported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEntry {
    /// `export class A`, `export { a as b }`, `export default A`
    Local { exported: String, local: String },
    /// `export { a as b } from "./m"`, `export * as ns from "./m"`
    ReExport {
        exported: String,
        imported: Imported,
        specifier: String,
    },
    /// `export * from "./m"`
    Star { specifier: String },
}

/// Argument shapes the extractor understands.
///
/// Anything else lowers to `Unrecognized` and is skipped by callers.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgShape {
    Reference(NamePath),
    Call { callee: NamePath, args: Vec<ArgShape> },
    /// Parameterless arrow with an expression body: `() => T`
    Arrow(Box<ArgShape>),
    Object(Vec<(String, ArgShape)>),
    Array(Vec<ArgShape>),
    Bool(bool),
    Str(String),
    Unrecognized,
}

impl ArgShape {
    /// Value of `key` in an object shape.
    pub fn get(&self, key: &str) -> Option<&ArgShape> {
        match self {
            ArgShape::Object(props) => props.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecoratorCall {
    pub callee: NamePath,
    pub args: Vec<ArgShape>,
}

/// Declared types, reduced to what property classification needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeShape {
    Boolean,
    BooleanLiteral(bool),
    Number,
    NumberLiteral,
    String,
    Reference(NamePath),
    Union(Vec<TypeShape>),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Getter,
    Setter,
    Method,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Protected,
    Private,
}

/// One class element: a field, accessor half, method or constructor
/// parameter property.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberSummary {
    pub name: String,
    pub kind: MemberKind,
    pub accessibility: Option<Accessibility>,
    pub is_static: bool,
    /// `#name`
    pub is_private_name: bool,
    pub readonly: bool,
    pub decorators: Vec<DecoratorCall>,
    pub doc: Option<ParsedJsDoc>,
    /// Annotation, setter parameter type or getter return type.
    pub declared_type: Option<TypeShape>,
    /// Widened type of the initializer literal.
    pub initializer_type: Option<TypeShape>,
}

impl MemberSummary {
    pub fn has_any_tag(&self, tags: &[String]) -> bool {
        self.doc
            .as_ref()
            .is_some_and(|doc| tags.iter().any(|tag| doc.has_tag(tag)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSummary {
    pub name: String,
    pub decorators: Vec<DecoratorCall>,
    pub doc: Option<ParsedJsDoc>,
    pub super_class: Option<NamePath>,
    pub members: Vec<MemberSummary>,
}

#[derive(Debug, Default)]
pub struct ModuleSummary {
    pub path: PathBuf,
    /// Local binding -> import.
    pub imports: FxHashMap<String, ImportBinding>,
    pub exports: Vec<ExportEntry>,
    /// Top-level declared names of any kind.
    pub declarations: FxHashSet<String>,
    pub classes: FxHashMap<String, Arc<ClassSummary>>,
    /// Top-level class names in source order.
    pub class_order: Vec<String>,
    pub type_aliases: FxHashMap<String, TypeShape>,
}

impl ModuleSummary {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Name a callee or type reference refers to after import aliasing.
    ///
    /// `Cmp` with `import { Component as Cmp }` gives `Component`, `core.Input`
    /// with `import * as core` gives `Input`. Local names map to themselves.
    pub fn canonical_name(&self, path: &[String]) -> Option<String> {
        match path {
            [single] => match self.imports.get(single) {
                Some(ImportBinding {
                    imported: Imported::Named(name),
                    ..
                }) => Some(name.clone()),
                _ => Some(single.clone()),
            },
            [namespace, member] => match self.imports.get(namespace) {
                Some(ImportBinding {
                    imported: Imported::Namespace,
                    ..
                }) => Some(member.clone()),
                _ => None,
            },
            _ => None,
        }
    }

    /// Classes in source order.
    pub fn classes_in_order(&self) -> impl Iterator<Item = &Arc<ClassSummary>> {
        self.class_order.iter().filter_map(|name| self.classes.get(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(parts: &[&str]) -> NamePath {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn canonical_name_follows_import_aliases() {
        let mut summary = ModuleSummary::new("/m.ts");
        summary.imports.insert(
            "Cmp".into(),
            ImportBinding {
                specifier: "@angular/core".into(),
                imported: Imported::Named("Component".into()),
            },
        );
        summary.imports.insert(
            "core".into(),
            ImportBinding {
                specifier: "@angular/core".into(),
                imported: Imported::Namespace,
            },
        );

        assert_eq!(summary.canonical_name(&path(&["Cmp"])).as_deref(), Some("Component"));
        assert_eq!(summary.canonical_name(&path(&["core", "Input"])).as_deref(), Some("Input"));
        assert_eq!(summary.canonical_name(&path(&["Local"])).as_deref(), Some("Local"));
        assert_eq!(summary.canonical_name(&path(&["obj", "Input"])), None);
    }

    #[test]
    fn object_shape_lookup() {
        let shape = ArgShape::Object(vec![
            ("selector".into(), ArgShape::Str("igx-grid".into())),
            ("standalone".into(), ArgShape::Bool(true)),
        ]);
        assert_eq!(shape.get("selector"), Some(&ArgShape::Str("igx-grid".into())));
        assert_eq!(shape.get("missing"), None);
        assert_eq!(ArgShape::Bool(true).get("selector"), None);
    }
}
