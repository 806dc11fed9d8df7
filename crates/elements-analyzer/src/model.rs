//! Data passed between the pipeline stages.
//!
//! Extraction produces a [`ComponentIndex`] keyed by class name, resolution
//! turns it into a [`ResolvedTable`] keyed by [`TypeRef`]. Both are built once
//! and read-only afterwards.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::Serialize;

/// Identity of a declared type: its name and the file declaring it.
///
/// Ordered by name first so tables keyed by `TypeRef` sort by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeRef {
    pub name: String,
    pub file: PathBuf,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
        }
    }
}

/// Target of a declared parent relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum ParentRef {
    Component(String),
    /// `*`: the component may also be hosted anywhere.
    Wildcard,
}

impl ParentRef {
    /// Split a parent tag payload on commas. Empty items are dropped.
    pub fn parse_list(text: &str) -> Vec<ParentRef> {
        text.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| match item {
                "*" => ParentRef::Wildcard,
                name => ParentRef::Component(name.to_string()),
            })
            .collect()
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            ParentRef::Component(name) => Some(name),
            ParentRef::Wildcard => None,
        }
    }
}

/// One declared `child -> parent` relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ParentEdge {
    pub from: String,
    pub to: ParentRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentQuery {
    pub property: String,
    pub child_type: TypeRef,
    pub is_query_list: bool,
    pub descendants: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdditionalProperty {
    pub name: String,
    pub writable: bool,
}

/// Raw facts about one decorated component class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentRecord {
    pub name: String,
    pub type_ref: TypeRef,
    pub selector: Option<String>,
    pub declared_parents: Vec<ParentRef>,
    pub content_queries: Vec<ContentQuery>,
    pub boolean_properties: Vec<String>,
    pub numeric_properties: Vec<String>,
    pub template_properties: Vec<String>,
    pub additional_properties: Vec<AdditionalProperty>,
    pub methods: Vec<String>,
    pub provide_as: Option<TypeRef>,
}

impl ComponentRecord {
    /// A record with no facts besides its identity.
    pub fn new(type_ref: TypeRef) -> Self {
        Self {
            name: type_ref.name.clone(),
            type_ref,
            selector: None,
            declared_parents: Vec::new(),
            content_queries: Vec::new(),
            boolean_properties: Vec::new(),
            numeric_properties: Vec::new(),
            template_properties: Vec::new(),
            additional_properties: Vec::new(),
            methods: Vec::new(),
            provide_as: None,
        }
    }

    /// Declared parents with wildcards removed.
    pub fn named_parents(&self) -> impl Iterator<Item = &str> {
        self.declared_parents.iter().filter_map(ParentRef::name)
    }

    pub fn parent_edges(&self) -> impl Iterator<Item = ParentEdge> + '_ {
        self.declared_parents.iter().map(|to| ParentEdge {
            from: self.name.clone(),
            to: to.clone(),
        })
    }
}

/// Accumulates records during extraction.
#[derive(Debug, Default)]
pub struct ComponentIndexBuilder {
    records: BTreeMap<String, ComponentRecord>,
}

impl ComponentIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. The first record for a name wins; later duplicates
    /// are dropped with a warning and `false` is returned.
    pub fn insert(&mut self, record: ComponentRecord) -> bool {
        if let Some(existing) = self.records.get(&record.name) {
            tracing::warn!(
                name = %record.name,
                kept = %existing.type_ref.file.display(),
                dropped = %record.type_ref.file.display(),
                "duplicate component name"
            );
            return false;
        }
        self.records.insert(record.name.clone(), record);
        true
    }

    pub fn build(self) -> ComponentIndex {
        ComponentIndex {
            records: self.records,
        }
    }
}

/// Raw component records keyed by class name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentIndex {
    records: BTreeMap<String, ComponentRecord>,
}

impl ComponentIndex {
    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every declared parent relation across the index.
    pub fn edges(&self) -> Vec<ParentEdge> {
        self.iter().flat_map(ComponentRecord::parent_edges).collect()
    }
}

impl FromIterator<ComponentRecord> for ComponentIndex {
    fn from_iter<I: IntoIterator<Item = ComponentRecord>>(iter: I) -> Self {
        let mut builder = ComponentIndexBuilder::new();
        for record in iter {
            builder.insert(record);
        }
        builder.build()
    }
}

/// The hand-maintained roots listed in the template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisteredSet {
    types: BTreeSet<TypeRef>,
}

impl RegisteredSet {
    pub fn contains(&self, type_ref: &TypeRef) -> bool {
        self.types.contains(type_ref)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.by_name(name).is_some()
    }

    pub fn by_name(&self, name: &str) -> Option<&TypeRef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRef> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl FromIterator<TypeRef> for RegisteredSet {
    fn from_iter<I: IntoIterator<Item = TypeRef>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

/// A component as it appears in the registration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntry {
    pub component: TypeRef,
    pub selector: String,
    pub parents: Vec<TypeRef>,
    pub content_queries: Vec<ContentQuery>,
    pub additional_properties: Vec<AdditionalProperty>,
    pub methods: Vec<String>,
    pub template_props: Vec<String>,
    pub numeric_props: Vec<String>,
    pub bool_props: Vec<String>,
    pub provide_as: Option<TypeRef>,
}

impl ResolvedEntry {
    /// Every type the entry refers to, including itself.
    pub fn referenced_types(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::once(&self.component)
            .chain(self.parents.iter())
            .chain(self.content_queries.iter().map(|q| &q.child_type))
            .chain(self.provide_as.iter())
    }
}

/// Resolved entries sorted by component name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTable {
    entries: BTreeMap<TypeRef, ResolvedEntry>,
}

// Serialized as a list; JSON map keys must be strings.
impl Serialize for ResolvedTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl ResolvedTable {
    pub fn get(&self, type_ref: &TypeRef) -> Option<&ResolvedEntry> {
        self.entries.get(type_ref)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&ResolvedEntry> {
        self.entries.values().find(|e| e.component.name == name)
    }

    pub fn entries(&self) -> impl Iterator<Item = &ResolvedEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ResolvedEntry> for ResolvedTable {
    fn from_iter<I: IntoIterator<Item = ResolvedEntry>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|entry| (entry.component.clone(), entry))
                .collect(),
        }
    }
}
