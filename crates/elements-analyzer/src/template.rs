//! The hand-written half of the registration module.
//!
//! Only the text above the marker line belongs to the template. It carries
//! the import table the generated code extends and the array of registered
//! root components.

use std::fs;
use std::path::{Path, PathBuf};

use elements_config::AnalyzerConfig;
use elements_gen::{ImportInfo, ParseOptions, parse};
use oxc_allocator::Allocator;
use oxc_ast::ast::{ArrayExpressionElement, BindingPatternKind, Declaration, Expression, Statement};
use rustc_hash::FxHashSet;
use tracing::warn;

use crate::error::{AnalyzerError, Result};
use crate::model::RegisteredSet;
use crate::source::{NamePath, SourceContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub path: PathBuf,
    /// Text before the marker line.
    pub head: String,
    /// Top-level imports of `head`, in source order.
    pub imports: Vec<ImportInfo>,
    /// Elements of the registered array as written.
    pub registered: Vec<NamePath>,
}

/// The part of `text` before the line containing `marker`.
pub fn head_of<'t>(text: &'t str, marker: &str) -> &'t str {
    match text.find(marker) {
        Some(pos) => {
            let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
            &text[..line_start]
        }
        None => text,
    }
}

impl Template {
    pub fn load(path: &Path, config: &AnalyzerConfig) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| AnalyzerError::io(path, err))?;
        Self::parse(path, &text, config)
    }

    pub fn parse(path: &Path, text: &str, config: &AnalyzerConfig) -> Result<Self> {
        let head = head_of(text, &config.marker);
        let allocator = Allocator::default();
        let options = ParseOptions::from_path(&path.to_string_lossy());
        let parsed = parse(&allocator, head, options).map_err(|err| AnalyzerError::TemplateParse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        let registered = parsed
            .ast()
            .body
            .iter()
            .find_map(|stmt| registered_array(stmt, &config.registered_export))
            .ok_or_else(|| AnalyzerError::MissingRegistration {
                path: path.to_path_buf(),
                export: config.registered_export.clone(),
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            head: head.to_string(),
            imports: parsed.imports(),
            registered,
        })
    }

    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Local names the template already imports.
    pub fn imported_names(&self) -> FxHashSet<&str> {
        self.imports
            .iter()
            .flat_map(|import| import.locals.iter().map(String::as_str))
            .collect()
    }

    /// Byte offset just past the last import, or 0.
    pub fn last_import_end(&self) -> usize {
        self.imports.last().map_or(0, |import| import.end as usize)
    }

    /// Resolve the registered array. Entries that do not resolve are skipped
    /// with a warning.
    pub fn registered_set(&self, context: &SourceContext) -> Result<RegisteredSet> {
        let mut types = Vec::with_capacity(self.registered.len());
        for path in &self.registered {
            match context.resolve_path(&self.path, path)? {
                Some(type_ref) => types.push(type_ref),
                None => warn!(
                    template = %self.path.display(),
                    component = %path.join("."),
                    "registered component does not resolve"
                ),
            }
        }
        Ok(types.into_iter().collect())
    }
}

/// `[export] const <name> = [A, ns.B]`
fn registered_array(stmt: &Statement<'_>, name: &str) -> Option<Vec<NamePath>> {
    let declaration = match stmt {
        Statement::ExportNamedDeclaration(export) => export.declaration.as_ref()?,
        Statement::VariableDeclaration(_) => stmt.as_declaration()?,
        _ => return None,
    };
    let Declaration::VariableDeclaration(var) = declaration else {
        return None;
    };

    let declarator = var.declarations.iter().find(|d| {
        matches!(&d.id.kind, BindingPatternKind::BindingIdentifier(id) if id.name == name)
    })?;

    let mut init = declarator.init.as_ref()?;
    while let Expression::TSAsExpression(inner) = init {
        init = &inner.expression;
    }
    let Expression::ArrayExpression(array) = init else {
        return None;
    };

    Some(
        array
            .elements
            .iter()
            .filter_map(|element| match element {
                ArrayExpressionElement::SpreadElement(_) | ArrayExpressionElement::Elision(_) => None,
                other => other.as_expression().and_then(element_path),
            })
            .collect(),
    )
}

fn element_path(expr: &Expression<'_>) -> Option<NamePath> {
    match expr {
        Expression::Identifier(ident) => Some(vec![ident.name.to_string()]),
        Expression::StaticMemberExpression(member) => match &member.object {
            Expression::Identifier(object) => {
                Some(vec![object.name.to_string(), member.property.name.to_string()])
            }
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"import { IgxGridComponent } from '../grid/grid.component';
import * as tabs from '../tabs';

export const registerComponents = [
    IgxGridComponent,
    tabs.IgxTabsComponent,
];

// WARNING: Code below this line is auto-generated and any modifications will be overwritten
export const registerConfig = [];
"#;

    #[test]
    fn head_stops_at_the_marker_line() {
        let config = AnalyzerConfig::default();
        let head = head_of(TEMPLATE, &config.marker);
        assert!(head.ends_with("];\n\n"));
        assert!(!head.contains("registerConfig"));
        assert_eq!(head_of("no marker", &config.marker), "no marker");
    }

    #[test]
    fn reads_imports_and_registered_array() {
        let config = AnalyzerConfig::default();
        let template = Template::parse(Path::new("/p/src/analyzer/elements.config.ts"), TEMPLATE, &config).unwrap();

        assert_eq!(template.imports.len(), 2);
        assert!(template.imported_names().contains("IgxGridComponent"));
        assert_eq!(
            template.registered,
            vec![
                vec!["IgxGridComponent".to_string()],
                vec!["tabs".to_string(), "IgxTabsComponent".to_string()],
            ]
        );
        assert_eq!(&template.head[..template.last_import_end()], "import { IgxGridComponent } from '../grid/grid.component';\nimport * as tabs from '../tabs';");
    }

    #[test]
    fn missing_registration_is_an_error() {
        let config = AnalyzerConfig::default();
        let err = Template::parse(Path::new("/p/t.ts"), "export const other = [];\n", &config).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingRegistration { .. }));
    }

    #[test]
    fn syntax_errors_in_the_head_are_fatal() {
        let config = AnalyzerConfig::default();
        let err = Template::parse(Path::new("/p/t.ts"), "export const registerComponents = [;\n", &config).unwrap_err();
        assert!(matches!(err, AnalyzerError::TemplateParse { .. }));
    }
}
