//! Folding raw class members into properties and methods.

use std::path::{Path, PathBuf};

use elements_config::AnalyzerConfig;

use crate::error::Result;
use crate::model::TypeRef;
use crate::source::{Accessibility, ClassMember, DecoratorCall, MemberKind, SourceContext, TypeShape};

/// Alias chains deeper than this are treated as unclassifiable.
const MAX_ALIAS_DEPTH: usize = 16;

/// A property (field or accessor pair) or method as the extractor sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    pub name: String,
    pub owner: TypeRef,
    pub is_method: bool,
    pub is_public: bool,
    pub writable: bool,
    /// Decorators of every half of an accessor pair.
    pub decorators: Vec<DecoratorCall>,
    pub declared_type: Option<TypeShape>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyClass {
    Boolean,
    Numeric,
    Template,
}

fn is_public(member: &ClassMember, config: &AnalyzerConfig) -> bool {
    let member = &member.member;
    if member.is_static || member.is_private_name || member.has_any_tag(&config.hidden_tags) {
        return false;
    }
    match member.accessibility {
        Some(Accessibility::Public) => true,
        Some(Accessibility::Private | Accessibility::Protected) => false,
        None => config.implicit_public,
    }
}

/// Group members by name, keeping the position of the first occurrence.
///
/// A getter and setter with the same name become one writable property whose
/// type is the setter parameter's, falling back to the getter's return type.
pub fn fold_members(members: Vec<ClassMember>, config: &AnalyzerConfig) -> Vec<MemberView> {
    let mut views: Vec<MemberView> = Vec::new();

    for member in members {
        let public = is_public(&member, config);
        let ClassMember { owner, member } = member;

        if let Some(existing) = views
            .iter_mut()
            .find(|view| view.name == member.name && view.owner == owner && !view.is_method)
        {
            if member.kind == MemberKind::Setter {
                existing.writable = true;
                if member.declared_type.is_some() {
                    existing.declared_type = member.declared_type;
                }
            } else if existing.declared_type.is_none() {
                existing.declared_type = member.declared_type;
            }
            existing.is_public &= public;
            existing.decorators.extend(member.decorators);
            continue;
        }

        let writable = match member.kind {
            MemberKind::Field => !member.readonly,
            MemberKind::Setter => true,
            MemberKind::Getter | MemberKind::Method => false,
        };
        views.push(MemberView {
            is_method: member.kind == MemberKind::Method,
            declared_type: member.declared_type.or(member.initializer_type),
            name: member.name,
            owner,
            is_public: public,
            writable,
            decorators: member.decorators,
        });
    }

    views
}

/// Classifies input types, following type aliases across files.
pub struct TypeClassifier<'a> {
    pub context: &'a SourceContext,
    pub config: &'a AnalyzerConfig,
}

impl TypeClassifier<'_> {
    /// The class of `shape` as written in `file`, or `None` for other types.
    pub fn classify(&self, file: &Path, shape: &TypeShape) -> Result<Option<PropertyClass>> {
        self.classify_in(file.to_path_buf(), shape, 0)
    }

    fn classify_in(&self, file: PathBuf, shape: &TypeShape, depth: usize) -> Result<Option<PropertyClass>> {
        if depth > MAX_ALIAS_DEPTH {
            return Ok(None);
        }
        match shape {
            TypeShape::Boolean | TypeShape::BooleanLiteral(_) => Ok(Some(PropertyClass::Boolean)),
            TypeShape::Number => Ok(Some(PropertyClass::Numeric)),
            TypeShape::Union(members) => {
                for member in members {
                    let class = self.classify_in(file.clone(), member, depth + 1)?;
                    let boolean_like = class == Some(PropertyClass::Boolean)
                        && !matches!(member, TypeShape::Union(_));
                    if !boolean_like {
                        return Ok(None);
                    }
                }
                Ok((!members.is_empty()).then_some(PropertyClass::Boolean))
            }
            TypeShape::Reference(path) => {
                let summary = self.context.summary(&file)?;
                let canonical = summary.canonical_name(path);
                if canonical.is_some_and(|name| self.config.template_types.contains(&name)) {
                    return Ok(Some(PropertyClass::Template));
                }
                match self.context.type_alias(&file, path)? {
                    Some((alias_file, aliased)) => self.classify_in(alias_file, &aliased, depth + 1),
                    None => Ok(None),
                }
            }
            TypeShape::NumberLiteral | TypeShape::String | TypeShape::Other => Ok(None),
        }
    }
}
