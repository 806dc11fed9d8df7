//! The lightweight semantic layer over the project's sources.
//!
//! [`SourceContext`] owns the file set, the module resolver and a cache of
//! [`ModuleSummary`] values. Files in the set are summarized up front in
//! parallel; anything reached through an import (barrels, the template,
//! declaration files) is summarized on first use.

mod files;
pub mod jsdoc;
mod lower;
mod modules;
pub mod summary;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use elements_config::TsConfig;
use elements_gen::{ParseOptions, parse};
use oxc_allocator::Allocator;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::{info, warn};

use crate::error::{AnalyzerError, Result};
use crate::model::TypeRef;

pub use files::{collect_files, is_source_file};
pub use lower::lower_program;
pub use modules::ModuleResolver;
pub use summary::{
    Accessibility, ArgShape, ClassSummary, DecoratorCall, ExportEntry, ImportBinding, Imported,
    MemberKind, MemberSummary, ModuleSummary, NamePath, TypeShape,
};

/// A class member together with the class that declares it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassMember {
    pub owner: TypeRef,
    pub member: MemberSummary,
}

type Visited = FxHashSet<(PathBuf, String)>;

#[derive(Debug)]
pub struct SourceContext {
    files: Vec<PathBuf>,
    resolver: ModuleResolver,
    summaries: DashMap<PathBuf, Arc<ModuleSummary>>,
}

impl SourceContext {
    /// Collect the file set for `tsconfig` and summarize every file in it.
    pub fn load(
        tsconfig: TsConfig,
        root: &Path,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self> {
        let files = collect_files(&tsconfig, root, include, exclude)?;
        let context = Self::new(tsconfig, files);
        context.files.par_iter().try_for_each(|path| context.summary(path).map(drop))?;
        info!(files = context.files.len(), "summarized sources");
        Ok(context)
    }

    /// A context over an explicit file set. Nothing is parsed yet.
    pub fn new(tsconfig: TsConfig, files: Vec<PathBuf>) -> Self {
        Self {
            files,
            resolver: ModuleResolver::new(tsconfig),
            summaries: DashMap::new(),
        }
    }

    pub fn tsconfig(&self) -> &TsConfig {
        self.resolver.tsconfig()
    }

    /// The non-declaration source files of the project, sorted.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Summary of `path`, parsing it on first use.
    pub fn summary(&self, path: &Path) -> Result<Arc<ModuleSummary>> {
        if let Some(cached) = self.summaries.get(path) {
            return Ok(Arc::clone(cached.value()));
        }
        let summary = Arc::new(summarize_file(path)?);
        let entry = self.summaries.entry(path.to_path_buf()).or_insert(summary);
        Ok(Arc::clone(entry.value()))
    }

    pub fn resolve_module(&self, from: &Path, specifier: &str) -> Option<PathBuf> {
        self.resolver.resolve(from, specifier)
    }

    /// The declaration a module exports under `name`.
    pub fn resolve_export(&self, file: &Path, name: &str) -> Result<Option<TypeRef>> {
        self.export_in(file, name, &mut Visited::default())
    }

    /// The declaration a top-level identifier in `file` refers to.
    pub fn resolve_identifier(&self, file: &Path, name: &str) -> Result<Option<TypeRef>> {
        let summary = self.summary(file)?;
        self.local_in(&summary, name, &mut Visited::default())
    }

    /// Like [`resolve_identifier`](Self::resolve_identifier) for `Foo` or
    /// `ns.Foo` where `ns` is a namespace import.
    pub fn resolve_path(&self, file: &Path, path: &[String]) -> Result<Option<TypeRef>> {
        match path {
            [name] => self.resolve_identifier(file, name),
            [namespace, member] => {
                let summary = self.summary(file)?;
                match summary.imports.get(namespace) {
                    Some(ImportBinding {
                        specifier,
                        imported: Imported::Namespace,
                    }) => match self.resolve_module(file, specifier) {
                        Some(target) => self.resolve_export(&target, member),
                        None => Ok(None),
                    },
                    _ => Ok(None),
                }
            }
            _ => Ok(None),
        }
    }

    /// Every name `file` exports that resolves to a declaration.
    pub fn exports_of(&self, file: &Path) -> Result<BTreeMap<String, TypeRef>> {
        let mut names = Vec::new();
        self.export_names(file, &mut FxHashSet::default(), &mut names)?;

        let mut table = BTreeMap::new();
        for name in names {
            if table.contains_key(&name) {
                continue;
            }
            if let Some(type_ref) = self.resolve_export(file, &name)? {
                table.insert(name, type_ref);
            }
        }
        Ok(table)
    }

    fn export_names(
        &self,
        file: &Path,
        seen: &mut FxHashSet<PathBuf>,
        names: &mut Vec<String>,
    ) -> Result<()> {
        if !seen.insert(file.to_path_buf()) {
            return Ok(());
        }
        let summary = self.summary(file)?;
        for entry in &summary.exports {
            match entry {
                ExportEntry::Local { exported, .. } | ExportEntry::ReExport { exported, .. } => {
                    names.push(exported.clone());
                }
                ExportEntry::Star { specifier } => {
                    if let Some(target) = self.resolve_module(file, specifier) {
                        let mut nested = Vec::new();
                        self.export_names(&target, seen, &mut nested)?;
                        names.extend(nested.into_iter().filter(|n| n != "default"));
                    }
                }
            }
        }
        Ok(())
    }

    fn export_in(&self, file: &Path, name: &str, visited: &mut Visited) -> Result<Option<TypeRef>> {
        if !visited.insert((file.to_path_buf(), name.to_string())) {
            return Ok(None);
        }
        let summary = self.summary(file)?;

        for entry in &summary.exports {
            match entry {
                ExportEntry::Local { exported, local } if exported == name => {
                    return self.local_in(&summary, local, visited);
                }
                ExportEntry::ReExport {
                    exported,
                    imported,
                    specifier,
                } if exported == name => {
                    let Some(target) = self.resolve_module(file, specifier) else {
                        return Ok(None);
                    };
                    return self.imported_in(&target, imported, visited);
                }
                _ => {}
            }
        }

        // `export *` never forwards the default export.
        if name == "default" {
            return Ok(None);
        }
        let star_targets = summary.exports.iter().filter_map(|entry| match entry {
            ExportEntry::Star { specifier } => self.resolve_module(file, specifier),
            _ => None,
        });
        for target in star_targets {
            if let Some(found) = self.export_in(&target, name, visited)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn local_in(
        &self,
        summary: &ModuleSummary,
        local: &str,
        visited: &mut Visited,
    ) -> Result<Option<TypeRef>> {
        if summary.declarations.contains(local) {
            return Ok(Some(TypeRef::new(local, &summary.path)));
        }
        let Some(binding) = summary.imports.get(local) else {
            return Ok(None);
        };
        match self.resolve_module(&summary.path, &binding.specifier) {
            Some(target) => self.imported_in(&target, &binding.imported, visited),
            None => Ok(None),
        }
    }

    fn imported_in(
        &self,
        target: &Path,
        imported: &Imported,
        visited: &mut Visited,
    ) -> Result<Option<TypeRef>> {
        match imported {
            Imported::Named(name) => self.export_in(target, name, visited),
            Imported::Default => self.export_in(target, "default", visited),
            Imported::Namespace => Ok(None),
        }
    }

    pub fn class(&self, type_ref: &TypeRef) -> Result<Option<Arc<ClassSummary>>> {
        Ok(self.summary(&type_ref.file)?.classes.get(&type_ref.name).cloned())
    }

    /// Members of a class and its base classes.
    ///
    /// Own members come first in declaration order, followed by each base's
    /// members that no derived class redeclares.
    pub fn class_members(&self, type_ref: &TypeRef) -> Result<Vec<ClassMember>> {
        let mut members = Vec::new();
        let mut shadowed: FxHashSet<String> = FxHashSet::default();
        let mut visited: FxHashSet<TypeRef> = FxHashSet::default();
        let mut current = Some(type_ref.clone());

        while let Some(owner) = current.take() {
            if !visited.insert(owner.clone()) {
                break;
            }
            let Some(class) = self.class(&owner)? else {
                break;
            };

            for member in &class.members {
                if !shadowed.contains(&member.name) {
                    members.push(ClassMember {
                        owner: owner.clone(),
                        member: member.clone(),
                    });
                }
            }
            shadowed.extend(class.members.iter().map(|m| m.name.clone()));

            current = match &class.super_class {
                Some(path) => self.resolve_path(&owner.file, path)?,
                None => None,
            };
        }

        Ok(members)
    }

    /// The aliased type behind `path` in `file`, with the file declaring the
    /// alias so nested references resolve in the right context.
    pub fn type_alias(&self, file: &Path, path: &[String]) -> Result<Option<(PathBuf, TypeShape)>> {
        let Some(target) = self.resolve_path(file, path)? else {
            return Ok(None);
        };
        let summary = self.summary(&target.file)?;
        Ok(summary
            .type_aliases
            .get(&target.name)
            .map(|shape| (target.file.clone(), shape.clone())))
    }
}

/// Read, parse and lower one file. Syntax errors are logged and the
/// recovered AST is used.
pub fn summarize_file(path: &Path) -> Result<ModuleSummary> {
    let source = fs::read_to_string(path).map_err(|err| AnalyzerError::io(path, err))?;
    Ok(summarize_source(path, &source))
}

pub fn summarize_source(path: &Path, source: &str) -> ModuleSummary {
    let allocator = Allocator::default();
    let options = ParseOptions::from_path(&path.to_string_lossy()).allowing_errors();

    match parse(&allocator, source, options) {
        Ok(parsed) if parsed.panicked => {
            warn!(path = %path.display(), "parser gave up, skipping file");
            ModuleSummary::new(path)
        }
        Ok(parsed) => {
            if parsed.has_errors() {
                warn!(
                    path = %path.display(),
                    errors = parsed.diagnostics.len(),
                    first = %parsed.diagnostics[0].message,
                    "parse errors, using recovered AST"
                );
            }
            lower_program(path, parsed.ast(), source)
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to parse");
            ModuleSummary::new(path)
        }
    }
}
