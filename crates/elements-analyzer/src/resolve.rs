//! Relationship resolution: from raw records to the registration table.
//!
//! A record becomes an entry when it is registered, or when one of its
//! declared parents reaches a registered component through further declared
//! parents. Wildcards and unknown names never contribute to reachability.

use elements_config::AnalyzerConfig;
use heck::ToKebabCase;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info};

use crate::model::{
    ComponentIndex, ComponentRecord, ContentQuery, ParentRef, RegisteredSet, ResolvedEntry,
    ResolvedTable, TypeRef,
};

/// Resolve every record of `index` against the registered roots.
pub fn resolve(
    index: &ComponentIndex,
    registered: &RegisteredSet,
    config: &AnalyzerConfig,
) -> ResolvedTable {
    let resolver = Resolver::new(index, registered);
    let table: ResolvedTable = index
        .iter()
        .filter_map(|record| resolver.entry(record, config))
        .collect();
    info!(
        components = index.len(),
        registered = registered.len(),
        entries = table.len(),
        "resolved registration table"
    );
    table
}

/// Selector emitted for a record: the declared one, or the kebab-cased class
/// name without its `Component`/`Directive` suffix, with the prefix rewrite
/// applied.
pub fn final_selector(record: &ComponentRecord, config: &AnalyzerConfig) -> String {
    let selector = record
        .selector
        .clone()
        .unwrap_or_else(|| default_selector(&record.name));
    match &config.selector_prefix {
        Some(prefix) => prefix.apply(&selector),
        None => selector,
    }
}

fn default_selector(name: &str) -> String {
    let stem = name
        .strip_suffix("Component")
        .or_else(|| name.strip_suffix("Directive"))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name);
    stem.to_kebab_case()
}

struct Resolver<'a> {
    index: &'a ComponentIndex,
    registered: &'a RegisteredSet,
    /// Named parents per child name, from the declared edge list.
    parents: FxHashMap<String, Vec<String>>,
    /// `(target type, owner name)` pairs a content query may bind.
    relevant: FxHashSet<(TypeRef, String)>,
}

impl<'a> Resolver<'a> {
    fn new(index: &'a ComponentIndex, registered: &'a RegisteredSet) -> Self {
        let mut parents: FxHashMap<String, Vec<String>> = FxHashMap::default();
        let mut relevant = FxHashSet::default();
        for edge in index.edges() {
            // Wildcards neither reach nor bind
            let ParentRef::Component(parent) = edge.to else {
                continue;
            };
            if let Some(child) = index.get(&edge.from) {
                relevant.insert((child.type_ref.clone(), parent.clone()));
                if let Some(alias) = &child.provide_as {
                    relevant.insert((alias.clone(), parent.clone()));
                }
            }
            parents.entry(edge.from).or_default().push(parent);
        }
        Self {
            index,
            registered,
            parents,
            relevant,
        }
    }

    fn is_registered(&self, name: &str) -> bool {
        match self.index.get(name) {
            Some(record) => self.registered.contains(&record.type_ref),
            None => self.registered.contains_name(name),
        }
    }

    fn is_known(&self, name: &str) -> bool {
        self.index.contains(name) || self.registered.contains_name(name)
    }

    fn type_of(&self, name: &str) -> Option<&'a TypeRef> {
        self.index
            .get(name)
            .map(|record| &record.type_ref)
            .or_else(|| self.registered.by_name(name))
    }

    /// Whether `name` is registered or reaches a registered component.
    ///
    /// A name already on `visited` is unreachable along this path.
    fn reachable(&self, name: &str, visited: &mut FxHashSet<String>) -> bool {
        if self.is_registered(name) {
            return true;
        }
        if !visited.insert(name.to_string()) {
            return false;
        }
        self.parents
            .get(name)
            .is_some_and(|parents| parents.iter().any(|parent| self.reachable(parent, visited)))
    }

    fn entry(&self, record: &'a ComponentRecord, config: &AnalyzerConfig) -> Option<ResolvedEntry> {
        let parent_names: Vec<&str> = if self.registered.contains(&record.type_ref) {
            record
                .named_parents()
                .filter(|parent| self.is_known(parent))
                .collect()
        } else {
            let reachable: Vec<&str> = record
                .named_parents()
                .filter(|parent| self.reachable(parent, &mut FxHashSet::default()))
                .collect();
            if reachable.is_empty() {
                debug!(component = %record.name, "dropped, no registered ancestor");
                return None;
            }
            reachable
        };

        let mut parents: Vec<TypeRef> = Vec::with_capacity(parent_names.len());
        for parent in parent_names.into_iter().filter_map(|name| self.type_of(name)) {
            if !parents.contains(parent) {
                parents.push(parent.clone());
            }
        }

        Some(ResolvedEntry {
            component: record.type_ref.clone(),
            selector: final_selector(record, config),
            parents,
            content_queries: self.relevant_queries(record),
            additional_properties: record.additional_properties.clone(),
            methods: record.methods.clone(),
            template_props: record.template_properties.clone(),
            numeric_props: record.numeric_properties.clone(),
            bool_props: record.boolean_properties.clone(),
            provide_as: record.provide_as.clone(),
        })
    }

    fn relevant_queries(&self, record: &ComponentRecord) -> Vec<ContentQuery> {
        record
            .content_queries
            .iter()
            .filter(|query| {
                let keep = self
                    .relevant
                    .contains(&(query.child_type.clone(), record.name.clone()));
                if !keep {
                    debug!(
                        component = %record.name,
                        property = %query.property,
                        child = %query.child_type.name,
                        "dropped query, child does not declare this parent"
                    );
                }
                keep
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_ref(name: &str) -> TypeRef {
        TypeRef::new(name, format!("/src/{}.ts", name.to_lowercase()))
    }

    fn record(name: &str, parents: &[&str]) -> ComponentRecord {
        let mut record = ComponentRecord::new(type_ref(name));
        record.declared_parents = parents
            .iter()
            .map(|p| match *p {
                "*" => ParentRef::Wildcard,
                other => ParentRef::Component(other.to_string()),
            })
            .collect();
        record
    }

    fn query(property: &str, child: &str) -> ContentQuery {
        ContentQuery {
            property: property.to_string(),
            child_type: type_ref(child),
            is_query_list: true,
            descendants: false,
        }
    }

    fn registered(names: &[&str]) -> RegisteredSet {
        names.iter().map(|n| type_ref(n)).collect()
    }

    fn names(table: &ResolvedTable) -> Vec<&str> {
        table.entries().map(|e| e.component.name.as_str()).collect()
    }

    #[test]
    fn registered_and_reachable_records_get_entries() {
        let index: ComponentIndex = [
            record("Grid", &[]),
            record("Column", &["Grid"]),
            record("ColumnGroup", &["Grid", "ColumnGroup"]),
            record("Cell", &["Column"]),
            record("Orphan", &["*"]),
            record("Stray", &["Unknown"]),
        ]
        .into_iter()
        .collect();

        let table = resolve(&index, &registered(&["Grid"]), &AnalyzerConfig::default());

        assert_eq!(names(&table), vec!["Cell", "Column", "ColumnGroup", "Grid"]);
        let group = table.get_by_name("ColumnGroup").unwrap();
        assert_eq!(group.parents, vec![type_ref("Grid"), type_ref("ColumnGroup")]);
        assert_eq!(table.get_by_name("Cell").unwrap().parents, vec![type_ref("Column")]);
    }

    #[test]
    fn unregistered_cycles_are_dropped() {
        let index: ComponentIndex = [record("A", &["B"]), record("B", &["A"]), record("C", &["C"])]
            .into_iter()
            .collect();
        let table = resolve(&index, &registered(&[]), &AnalyzerConfig::default());
        assert!(table.is_empty());
    }

    #[test]
    fn registered_parents_keep_only_known_names() {
        let index: ComponentIndex = [record("Toolbar", &["Grid", "Missing", "*"]), record("Grid", &[])]
            .into_iter()
            .collect();
        let table = resolve(&index, &registered(&["Toolbar", "Grid"]), &AnalyzerConfig::default());
        assert_eq!(table.get_by_name("Toolbar").unwrap().parents, vec![type_ref("Grid")]);
    }

    #[test]
    fn unreachable_parents_are_filtered_out() {
        let index: ComponentIndex = [
            record("Grid", &[]),
            record("Loose", &["Nowhere"]),
            record("Paginator", &["Grid", "Loose", "*"]),
        ]
        .into_iter()
        .collect();
        let table = resolve(&index, &registered(&["Grid"]), &AnalyzerConfig::default());
        assert_eq!(table.get_by_name("Paginator").unwrap().parents, vec![type_ref("Grid")]);
        assert!(table.get_by_name("Loose").is_none());
    }

    #[test]
    fn queries_need_a_child_declaring_the_owner() {
        let mut grid = record("Grid", &[]);
        grid.content_queries = vec![query("columns", "Column"), query("rows", "Row"), query("alias", "Base")];
        let mut aliased = record("Special", &["Grid"]);
        aliased.provide_as = Some(type_ref("Base"));

        let index: ComponentIndex = [grid, record("Column", &["Grid"]), record("Row", &["Other"]), aliased]
            .into_iter()
            .collect();
        let table = resolve(&index, &registered(&["Grid"]), &AnalyzerConfig::default());

        let kept: Vec<_> = table
            .get_by_name("Grid")
            .unwrap()
            .content_queries
            .iter()
            .map(|q| q.property.as_str())
            .collect();
        assert_eq!(kept, vec!["columns", "alias"]);
    }

    #[test]
    fn wildcard_edges_never_reach_or_bind() {
        let mut grid = record("Grid", &[]);
        grid.content_queries = vec![query("anywhere", "Floating")];
        let index: ComponentIndex = [grid, record("Floating", &["*"]), record("Docked", &["*", "Grid"])]
            .into_iter()
            .collect();
        let table = resolve(&index, &registered(&["Grid"]), &AnalyzerConfig::default());

        assert_eq!(names(&table), vec!["Docked", "Grid"]);
        assert_eq!(table.get_by_name("Docked").unwrap().parents, vec![type_ref("Grid")]);
        assert!(table.get_by_name("Grid").unwrap().content_queries.is_empty());
    }

    #[test]
    fn selectors_default_and_rewrite() {
        let config = AnalyzerConfig::default();
        let mut declared = record("IgxGridComponent", &[]);
        declared.selector = Some("igx-grid".into());
        assert_eq!(final_selector(&declared, &config), "igc-grid");

        assert_eq!(final_selector(&record("IgxColumnGroupComponent", &[]), &config), "igc-column-group");
        assert_eq!(final_selector(&record("IgxFocusDirective", &[]), &config), "igc-focus");
        assert_eq!(final_selector(&record("Component", &[]), &config), "component");

        let plain = AnalyzerConfig {
            selector_prefix: None,
            ..AnalyzerConfig::default()
        };
        assert_eq!(final_selector(&declared, &plain), "igx-grid");
    }
}
