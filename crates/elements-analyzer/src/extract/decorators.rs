//! Reading decorator calls and their argument shapes.

use std::path::Path;

use elements_config::DecoratorNames;

use crate::error::Result;
use crate::model::{ContentQuery, TypeRef};
use crate::source::{ArgShape, DecoratorCall, ModuleSummary, SourceContext};

/// Decorator calls as seen from one module's import table.
pub struct DecoratorScope<'a> {
    pub context: &'a SourceContext,
    pub summary: &'a ModuleSummary,
    pub names: &'a DecoratorNames,
}

impl<'a> DecoratorScope<'a> {
    fn file(&self) -> &Path {
        &self.summary.path
    }

    /// Callee name after import aliasing.
    pub fn canonical(&self, call: &DecoratorCall) -> Option<String> {
        self.summary.canonical_name(&call.callee)
    }

    pub fn find<'d>(&self, decorators: &'d [DecoratorCall], name: &str) -> Option<&'d DecoratorCall> {
        decorators
            .iter()
            .find(|call| self.canonical(call).as_deref() == Some(name))
    }

    pub fn has(&self, decorators: &[DecoratorCall], name: &str) -> bool {
        self.find(decorators, name).is_some()
    }

    /// `forwardRef(() => T)` becomes `T`; everything else is returned as is.
    pub fn unwrap_forward_ref<'s>(&self, arg: &'s ArgShape) -> &'s ArgShape {
        match arg {
            ArgShape::Call { callee, args }
                if self.summary.canonical_name(callee).as_deref()
                    == Some(self.names.forward_ref.as_str()) =>
            {
                match args.as_slice() {
                    [ArgShape::Arrow(inner)] => inner,
                    _ => arg,
                }
            }
            _ => arg,
        }
    }

    /// The declared type an argument names, if any.
    pub fn resolve_type(&self, arg: &ArgShape) -> Result<Option<TypeRef>> {
        match self.unwrap_forward_ref(arg) {
            ArgShape::Reference(path) => self.context.resolve_path(self.file(), path),
            _ => Ok(None),
        }
    }

    /// A content query for `property`, or `None` when its target is not a
    /// single declared type.
    pub fn content_query(
        &self,
        property: &str,
        call: &DecoratorCall,
    ) -> Result<Option<ContentQuery>> {
        let Some(candidate) = call.args.first() else {
            return Ok(None);
        };
        let Some(child_type) = self.resolve_type(candidate)? else {
            tracing::debug!(property, "query target does not resolve to a type");
            return Ok(None);
        };

        let mut descendants = false;
        if let Some(options @ ArgShape::Object(_)) = call.args.get(1) {
            if let Some(read) = options.get("read") {
                if self.resolve_type(read)?.as_ref() != Some(&child_type) {
                    tracing::debug!(property, child = %child_type.name, "query reads a different type");
                    return Ok(None);
                }
            }
            descendants = matches!(options.get("descendants"), Some(ArgShape::Bool(true)));
        }

        Ok(Some(ContentQuery {
            property: property.to_string(),
            is_query_list: self.canonical(call).as_deref() == Some(self.names.query_list.as_str()),
            child_type,
            descendants,
        }))
    }

    /// The `provide` token of a `{ provide: X, useExisting: Self }` provider.
    pub fn provide_as(&self, component: &DecoratorCall, own: &TypeRef) -> Result<Option<TypeRef>> {
        let providers = match component.args.first().and_then(|options| options.get("providers")) {
            Some(ArgShape::Array(items)) => items,
            _ => return Ok(None),
        };

        for provider in providers {
            let (Some(use_existing), Some(provide)) = (provider.get("useExisting"), provider.get("provide"))
            else {
                continue;
            };
            if self.resolve_type(use_existing)?.as_ref() != Some(own) {
                continue;
            }
            match self.resolve_type(provide)? {
                Some(alias) if &alias != own => return Ok(Some(alias)),
                _ => {}
            }
        }
        Ok(None)
    }
}

/// The `selector` of a component decorator's options object.
pub fn selector(component: &DecoratorCall) -> Option<String> {
    match component.args.first()?.get("selector")? {
        ArgShape::Str(selector) => Some(selector.clone()),
        _ => None,
    }
}
