//! Component extraction: decorated classes to [`ComponentRecord`]s.

mod decorators;
mod members;

use std::sync::Arc;

use elements_config::AnalyzerConfig;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::Result;
use crate::model::{
    AdditionalProperty, ComponentIndex, ComponentIndexBuilder, ComponentRecord, ParentRef, TypeRef,
};
use crate::source::{ClassSummary, ModuleSummary, SourceContext};

pub use decorators::{DecoratorScope, selector};
pub use members::{MemberView, PropertyClass, TypeClassifier, fold_members};

pub struct Extractor<'a> {
    context: &'a SourceContext,
    config: &'a AnalyzerConfig,
}

impl<'a> Extractor<'a> {
    pub fn new(context: &'a SourceContext, config: &'a AnalyzerConfig) -> Self {
        Self { context, config }
    }

    fn scope<'s>(&'s self, summary: &'s ModuleSummary) -> DecoratorScope<'s> {
        DecoratorScope {
            context: self.context,
            summary,
            names: &self.config.decorators,
        }
    }

    /// Top-level classes carrying the component decorator, in file order.
    pub fn discover(&self) -> Result<Vec<TypeRef>> {
        let mut found = Vec::new();
        for file in self.context.files() {
            let summary = self.context.summary(file)?;
            let scope = self.scope(&summary);
            for class in summary.classes_in_order() {
                if scope.has(&class.decorators, &self.config.decorators.component) {
                    found.push(TypeRef::new(class.name.clone(), file.clone()));
                }
            }
        }
        Ok(found)
    }

    /// Extract every discovered component in parallel.
    ///
    /// Duplicate names keep the first record in file order.
    pub fn extract_all(&self) -> Result<ComponentIndex> {
        let candidates = self.discover()?;
        let records = candidates
            .par_iter()
            .map(|type_ref| self.extract(type_ref))
            .collect::<Result<Vec<_>>>()?;

        let mut builder = ComponentIndexBuilder::new();
        for record in records.into_iter().flatten() {
            builder.insert(record);
        }
        let index = builder.build();
        info!(components = index.len(), "extracted components");
        Ok(index)
    }

    /// The record for one class, or `None` if it is not a component.
    pub fn extract(&self, type_ref: &TypeRef) -> Result<Option<ComponentRecord>> {
        let summary = self.context.summary(&type_ref.file)?;
        let Some(class) = summary.classes.get(&type_ref.name).map(Arc::clone) else {
            return Ok(None);
        };
        let scope = self.scope(&summary);
        let Some(component) = scope.find(&class.decorators, &self.config.decorators.component) else {
            return Ok(None);
        };

        let mut record = ComponentRecord::new(type_ref.clone());
        record.declared_parents = self.declared_parents(&class);
        record.selector = selector(component);

        self.fill_members(&mut record)?;

        if !record.declared_parents.is_empty() {
            record.provide_as = scope.provide_as(component, type_ref)?;
        }

        debug!(
            component = %record.name,
            parents = record.declared_parents.len(),
            queries = record.content_queries.len(),
            "extracted component"
        );
        Ok(Some(record))
    }

    fn declared_parents(&self, class: &ClassSummary) -> Vec<ParentRef> {
        class
            .doc
            .as_ref()
            .and_then(|doc| doc.tag_text(&self.config.parent_tag))
            .map(ParentRef::parse_list)
            .unwrap_or_default()
    }

    fn fill_members(&self, record: &mut ComponentRecord) -> Result<()> {
        let names = &self.config.decorators;
        let classifier = TypeClassifier {
            context: self.context,
            config: self.config,
        };
        let members = self.context.class_members(&record.type_ref)?;

        for view in fold_members(members, self.config) {
            if !view.is_public {
                continue;
            }
            if view.is_method {
                record.methods.push(view.name);
                continue;
            }

            let summary = self.context.summary(&view.owner.file)?;
            let scope = self.scope(&summary);

            if scope.has(&view.decorators, &names.input) {
                let class = match &view.declared_type {
                    Some(shape) => classifier.classify(&view.owner.file, shape)?,
                    None => None,
                };
                match class {
                    Some(PropertyClass::Boolean) => record.boolean_properties.push(view.name),
                    Some(PropertyClass::Numeric) => record.numeric_properties.push(view.name),
                    Some(PropertyClass::Template) => record.template_properties.push(view.name),
                    None => {}
                }
                continue;
            }

            let query = view
                .decorators
                .iter()
                .find(|call| scope.canonical(call).is_some_and(|name| names.queries.contains(&name)));
            if let Some(call) = query {
                if let Some(query) = scope.content_query(&view.name, call)? {
                    record.content_queries.push(query);
                }
                continue;
            }

            if scope.has(&view.decorators, &names.output) {
                continue;
            }

            record.additional_properties.push(AdditionalProperty {
                name: view.name,
                writable: view.writable,
            });
        }

        Ok(())
    }
}
