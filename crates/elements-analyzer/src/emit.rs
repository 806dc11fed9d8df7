//! Rendering the generated module.
//!
//! The output keeps the template text through its last import verbatim,
//! appends imports for every referenced type the template lacks, then the
//! rest of the template head, the marker line and the printed table.
//! Rendering a previous output again yields the same bytes.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use elements_config::{AnalyzerConfig, QuoteStyle};
use elements_gen::{FormatOptions, JsBuilder, validate_identifier};
use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, ObjectPropertyKind, Statement};
use tracing::warn;

use crate::error::{AnalyzerError, Result};
use crate::model::{ResolvedEntry, ResolvedTable, TypeRef};
use crate::template::Template;

fn format_options(config: &AnalyzerConfig) -> FormatOptions {
    FormatOptions::with_quote_style(match config.quote_style {
        QuoteStyle::Double => elements_gen::QuoteStyle::Double,
        QuoteStyle::Single => elements_gen::QuoteStyle::Single,
    })
}

/// Render the full module text for `table`.
pub fn render(template: &Template, table: &ResolvedTable, config: &AnalyzerConfig) -> Result<String> {
    let allocator = Allocator::default();
    let js = JsBuilder::new(&allocator);
    let options = format_options(config);

    let mut imports = Vec::new();
    for (name, type_ref) in missing_imports(template, table) {
        let specifier = import_specifier(template.dir(), &type_ref.file)?;
        let code = js.program_with(vec![Statement::from(js.import_named(vec![name], &specifier))], &options)?;
        imports.push(code.trim_end().to_string());
    }

    let entries = table
        .entries()
        .map(|entry| entry_object(&js, entry))
        .collect::<Result<Vec<_>>>()?;
    let table_code = js.program_with(
        vec![Statement::from(js.export_const(&config.table_name, js.array(entries)))],
        &options,
    )?;

    Ok(assemble(template, &imports, &config.marker, &table_code))
}

/// Types the table refers to that the template neither imports nor declares,
/// keyed by name. When two types share a name the first one seen wins.
fn missing_imports<'t>(template: &Template, table: &'t ResolvedTable) -> BTreeMap<&'t str, &'t TypeRef> {
    let imported = template.imported_names();
    let mut needed: BTreeMap<&str, &TypeRef> = BTreeMap::new();

    for type_ref in table.entries().flat_map(ResolvedEntry::referenced_types) {
        if imported.contains(type_ref.name.as_str()) || type_ref.file == template.path {
            continue;
        }
        match needed.get(type_ref.name.as_str()) {
            Some(existing) if *existing != type_ref => warn!(
                name = %type_ref.name,
                kept = %existing.file.display(),
                skipped = %type_ref.file.display(),
                "two types share a name, importing the first"
            ),
            Some(_) => {}
            None => {
                needed.insert(type_ref.name.as_str(), type_ref);
            }
        }
    }
    needed
}

fn assemble(template: &Template, imports: &[String], marker: &str, table_code: &str) -> String {
    let head = template.head.as_str();
    let import_end = template.last_import_end().min(head.len());
    let verbatim = &head[..import_end];

    let mut out = String::with_capacity(head.len() + table_code.len() + marker.len() + 64);
    out.push_str(verbatim);
    for (i, import) in imports.iter().enumerate() {
        if !(verbatim.is_empty() && i == 0) {
            out.push('\n');
        }
        out.push_str(import);
    }

    // The prelude is kept as written; only whitespace before the marker is
    // normalized.
    let rest = head[import_end..].trim_end();
    if verbatim.is_empty() && !imports.is_empty() {
        out.push('\n');
        if !rest.starts_with('\n') {
            out.push('\n');
        }
    }
    out.push_str(rest);

    out.push_str("\n\n");
    out.push_str(marker);
    out.push('\n');
    out.push_str(table_code);
    out
}

/// `file` as a module specifier relative to `dir`: extension stripped, POSIX
/// separators, `./` prefixed unless it climbs out with `../`.
pub fn import_specifier(dir: &Path, file: &Path) -> Result<String> {
    let relative = relative_path(dir, file).ok_or_else(|| AnalyzerError::ImportPath {
        from: dir.to_path_buf(),
        to: file.to_path_buf(),
    })?;

    let mut specifier = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/");

    if let Some(stripped) = specifier.strip_suffix(".d.ts") {
        specifier = stripped.to_string();
    } else if let Some(ext) = file.extension().and_then(|e| e.to_str()) {
        specifier.truncate(specifier.len() - ext.len() - 1);
    }

    if !specifier.starts_with("../") {
        specifier.insert_str(0, "./");
    }
    Ok(specifier)
}

fn relative_path(dir: &Path, file: &Path) -> Option<PathBuf> {
    let (dir_clean, file_clean) = (path_clean::clean(dir), path_clean::clean(file));
    let dir: Vec<Component<'_>> = dir_clean.components().collect();
    let file: Vec<Component<'_>> = file_clean.components().collect();

    let rooted = |c: &Component<'_>| matches!(c, Component::Prefix(_) | Component::RootDir);
    let dir_root: Vec<_> = dir.iter().take_while(|c| rooted(c)).collect();
    let file_root: Vec<_> = file.iter().take_while(|c| rooted(c)).collect();
    if dir_root != file_root || file.len() <= file_root.len() {
        return None;
    }

    let common = dir
        .iter()
        .zip(file.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..dir.len() {
        relative.push("..");
    }
    for component in &file[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}

fn entry_object<'a>(js: &JsBuilder<'a>, entry: &ResolvedEntry) -> Result<Expression<'a>> {
    let mut props: Vec<ObjectPropertyKind<'a>> = vec![
        js.prop("component", type_ident(js, &entry.component)?),
        js.prop("selector", js.string(&entry.selector)),
        js.prop("parents", type_array(js, &entry.parents)?),
    ];

    let queries = entry
        .content_queries
        .iter()
        .map(|query| {
            let mut fields = vec![
                js.prop("property", js.string(&query.property)),
                js.prop("childType", type_ident(js, &query.child_type)?),
            ];
            if query.is_query_list {
                fields.push(js.prop("isQueryList", js.bool(true)));
            }
            if query.descendants {
                fields.push(js.prop("descendants", js.bool(true)));
            }
            Ok(js.object(fields))
        })
        .collect::<Result<Vec<_>>>()?;
    props.push(js.prop("contentQueries", js.array(queries)));

    let additional = entry
        .additional_properties
        .iter()
        .map(|prop| {
            let mut fields = vec![js.prop("name", js.string(&prop.name))];
            if prop.writable {
                fields.push(js.prop("writable", js.bool(true)));
            }
            js.object(fields)
        })
        .collect();
    props.push(js.prop("additionalProperties", js.array(additional)));
    props.push(js.prop("methods", string_array(js, &entry.methods)));

    for (key, names) in [
        ("templateProps", &entry.template_props),
        ("numericProps", &entry.numeric_props),
        ("boolProps", &entry.bool_props),
    ] {
        if !names.is_empty() {
            props.push(js.prop(key, string_array(js, names)));
        }
    }
    if let Some(alias) = &entry.provide_as {
        props.push(js.prop("provideAs", type_ident(js, alias)?));
    }

    Ok(js.object(props))
}

fn type_ident<'a>(js: &JsBuilder<'a>, type_ref: &TypeRef) -> Result<Expression<'a>> {
    validate_identifier(&type_ref.name)?;
    Ok(js.ident(&type_ref.name))
}

fn type_array<'a>(js: &JsBuilder<'a>, types: &[TypeRef]) -> Result<Expression<'a>> {
    let items = types
        .iter()
        .map(|t| type_ident(js, t))
        .collect::<Result<Vec<_>>>()?;
    Ok(js.array(items))
}

fn string_array<'a>(js: &JsBuilder<'a>, values: &[String]) -> Expression<'a> {
    js.array(values.iter().map(|v| js.string(v)).collect())
}
