//! `tsconfig.json` discovery and loading.
//!
//! tsconfig files are JSON with comments and trailing commas, so they are
//! parsed as a JavaScript object expression with `oxc_parser` and lowered to
//! `serde_json::Value` before deserializing.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, ObjectPropertyKind};
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ConfigError, Result};

pub const TSCONFIG_FILE: &str = "tsconfig.json";

const DEFAULT_INCLUDE: &[&str] = &["**/*"];
const DEFAULT_EXCLUDE: &[&str] = &["node_modules", "bower_components", "jspm_packages"];

/// A loaded build configuration with its `extends` chain applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsConfig {
    /// The tsconfig file itself.
    pub path: PathBuf,
    /// Directory containing the tsconfig; include/exclude are relative to it.
    pub root: PathBuf,
    /// Explicit `files`, absolute.
    pub files: Vec<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// `compilerOptions.baseUrl`, absolute.
    pub base_url: Option<PathBuf>,
    /// `compilerOptions.paths`, targets relative to `paths_base`.
    pub paths: BTreeMap<String, Vec<String>>,
    pub paths_base: PathBuf,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTsConfig {
    extends: Option<Extends>,
    files: Option<Vec<String>>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    compiler_options: Option<RawCompilerOptions>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Extends {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompilerOptions {
    base_url: Option<String>,
    paths: Option<BTreeMap<String, Vec<String>>>,
}

struct Layer {
    dir: PathBuf,
    raw: RawTsConfig,
}

impl TsConfig {
    /// Walk upward from `start` looking for `tsconfig.json`.
    pub fn locate(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(TSCONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Locate and load the nearest tsconfig above `start`.
    ///
    /// # Errors
    ///
    /// `ConfigError::ConfigNotFound` when no tsconfig exists in `start` or any
    /// of its ancestors.
    pub fn discover(start: &Path) -> Result<Self> {
        let path = Self::locate(start).ok_or_else(|| ConfigError::ConfigNotFound {
            searched_from: start.to_path_buf(),
        })?;
        Self::load(&path)
    }

    /// Load the tsconfig at `path`, following relative `extends`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ConfigError::TsConfigMissing(path.to_path_buf()));
        }
        let path = path_clean::clean(path);

        let mut layers = Vec::new();
        let mut visiting = Vec::new();
        collect_layers(&path, &mut visiting, &mut layers)?;

        let root = parent_dir(&path);
        let mut config = TsConfig {
            path: path.clone(),
            root: root.clone(),
            files: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            base_url: None,
            paths: BTreeMap::new(),
            paths_base: root.clone(),
        };

        let mut files: Option<Vec<PathBuf>> = None;
        let mut include: Option<Vec<String>> = None;
        let mut exclude: Option<Vec<String>> = None;

        // Parents first, children override.
        for layer in layers {
            if let Some(list) = layer.raw.files {
                files = Some(list.iter().map(|f| path_clean::clean(layer.dir.join(f))).collect());
            }
            if let Some(list) = layer.raw.include {
                include = Some(list);
            }
            if let Some(list) = layer.raw.exclude {
                exclude = Some(list);
            }
            if let Some(options) = layer.raw.compiler_options {
                if let Some(base) = options.base_url {
                    let base = path_clean::clean(layer.dir.join(base));
                    config.paths_base = base.clone();
                    config.base_url = Some(base);
                }
                if let Some(paths) = options.paths {
                    if config.base_url.is_none() {
                        config.paths_base = layer.dir.clone();
                    }
                    config.paths = paths;
                }
            }
        }

        config.include = match (include, &files) {
            (Some(list), _) => list,
            (None, Some(_)) => Vec::new(),
            (None, None) => DEFAULT_INCLUDE.iter().map(|s| s.to_string()).collect(),
        };
        config.exclude =
            exclude.unwrap_or_else(|| DEFAULT_EXCLUDE.iter().map(|s| s.to_string()).collect());
        config.files = files.unwrap_or_default();

        tracing::debug!(
            path = %config.path.display(),
            include = ?config.include,
            exclude = ?config.exclude,
            "loaded tsconfig"
        );
        Ok(config)
    }

    /// Candidate paths for a bare specifier under `paths` and `baseUrl`.
    ///
    /// The longest matching `paths` pattern wins; `baseUrl` is tried last.
    /// Empty when no mapping applies.
    pub fn path_candidates(&self, specifier: &str) -> Vec<PathBuf> {
        let mut best: Option<(usize, &Vec<String>, &str)> = None;

        for (pattern, targets) in &self.paths {
            match pattern.split_once('*') {
                Some((prefix, suffix)) => {
                    let fits = specifier.len() >= prefix.len() + suffix.len()
                        && specifier.starts_with(prefix)
                        && specifier.ends_with(suffix);
                    if fits && best.is_none_or(|(len, ..)| prefix.len() > len) {
                        let star = &specifier[prefix.len()..specifier.len() - suffix.len()];
                        best = Some((prefix.len(), targets, star));
                    }
                }
                None if pattern == specifier => {
                    best = Some((usize::MAX, targets, ""));
                    break;
                }
                None => {}
            }
        }

        let mut candidates: Vec<PathBuf> = best
            .map(|(_, targets, star)| {
                targets
                    .iter()
                    .map(|target| path_clean::clean(self.paths_base.join(target.replace('*', star))))
                    .collect()
            })
            .unwrap_or_default();

        if let Some(base) = &self.base_url {
            candidates.push(path_clean::clean(base.join(specifier)));
        }
        candidates
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

fn collect_layers(path: &Path, visiting: &mut Vec<PathBuf>, layers: &mut Vec<Layer>) -> Result<()> {
    if visiting.iter().any(|p| p == path) {
        return Err(ConfigError::ExtendsCycle(path.to_path_buf()));
    }
    visiting.push(path.to_path_buf());

    let raw = read_raw(path)?;
    let dir = parent_dir(path);

    let parents = match &raw.extends {
        Some(Extends::One(one)) => vec![one.clone()],
        Some(Extends::Many(many)) => many.clone(),
        None => Vec::new(),
    };
    for parent in parents {
        match resolve_extends(&dir, &parent) {
            Some(parent_path) => collect_layers(&parent_path, visiting, layers)?,
            None => tracing::warn!(
                extends = %parent,
                from = %path.display(),
                "skipping tsconfig extends that is not a relative file"
            ),
        }
    }

    visiting.pop();
    layers.push(Layer { dir, raw });
    Ok(())
}

fn resolve_extends(dir: &Path, specifier: &str) -> Option<PathBuf> {
    let relative = specifier.starts_with("./") || specifier.starts_with("../");
    if !relative && !Path::new(specifier).is_absolute() {
        return None;
    }
    let candidate = path_clean::clean(dir.join(specifier));
    if candidate.is_file() {
        return Some(candidate);
    }
    let with_ext = candidate.with_file_name(format!(
        "{}.json",
        candidate.file_name()?.to_string_lossy()
    ));
    with_ext.is_file().then_some(with_ext)
}

fn read_raw(path: &Path) -> Result<RawTsConfig> {
    let text = fs::read_to_string(path)?;
    let value = parse_json_like(&text).map_err(|message| ConfigError::InvalidTsConfig {
        path: path.to_path_buf(),
        message,
    })?;
    serde_json::from_value(value).map_err(|e| ConfigError::InvalidTsConfig {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse JSON that may carry comments and trailing commas.
pub fn parse_json_like(text: &str) -> std::result::Result<Value, String> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    let allocator = Allocator::default();
    let expr = Parser::new(&allocator, text, SourceType::default())
        .parse_expression()
        .map_err(|errors| {
            errors
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unparseable JSON".to_string())
        })?;
    to_json(&expr).ok_or_else(|| "expected a JSON value".to_string())
}

fn to_json(expr: &Expression<'_>) -> Option<Value> {
    match expr {
        Expression::ObjectExpression(object) => {
            let mut map = serde_json::Map::new();
            for property in &object.properties {
                if let ObjectPropertyKind::ObjectProperty(property) = property {
                    let Some(key) = property.key.static_name() else {
                        continue;
                    };
                    if let Some(value) = to_json(&property.value) {
                        map.insert(key.into_owned(), value);
                    }
                }
            }
            Some(Value::Object(map))
        }
        Expression::ArrayExpression(array) => Some(Value::Array(
            array
                .elements
                .iter()
                .filter_map(|element| element.as_expression())
                .filter_map(to_json)
                .collect(),
        )),
        Expression::StringLiteral(lit) => Some(Value::String(lit.value.to_string())),
        Expression::NumericLiteral(lit) => serde_json::Number::from_f64(lit.value).map(Value::Number),
        Expression::BooleanLiteral(lit) => Some(Value::Bool(lit.value)),
        Expression::NullLiteral(_) => Some(Value::Null),
        Expression::ParenthesizedExpression(inner) => to_json(&inner.expression),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_comments_and_trailing_commas() {
        let value = parse_json_like(
            r#"{
                // line comment
                "compilerOptions": { "strict": true, /* block */ },
                "include": ["src/**/*.ts",],
            }"#,
        )
        .unwrap();
        assert_eq!(value["compilerOptions"]["strict"], Value::Bool(true));
        assert_eq!(value["include"][0], Value::String("src/**/*.ts".into()));
    }

    #[test]
    fn empty_file_is_empty_object() {
        assert_eq!(parse_json_like("  \n").unwrap(), Value::Object(Default::default()));
    }

    #[test]
    fn path_candidates_prefer_longest_prefix() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TSCONFIG_FILE);
        fs::write(
            &path,
            r#"{
                "compilerOptions": {
                    "baseUrl": ".",
                    "paths": {
                        "lib/*": ["src/lib/*"],
                        "lib/core/*": ["src/core/*"]
                    }
                }
            }"#,
        )
        .unwrap();

        let config = TsConfig::load(&path).unwrap();
        let root = path_clean::clean(dir.path());
        assert_eq!(
            config.path_candidates("lib/core/grid"),
            vec![root.join("src/core/grid"), root.join("lib/core/grid")]
        );
        assert_eq!(config.path_candidates("other"), vec![root.join("other")]);
    }

    #[test]
    fn without_base_url_bare_specifiers_have_no_candidates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(TSCONFIG_FILE);
        fs::write(&path, "{}").unwrap();
        let config = TsConfig::load(&path).unwrap();
        assert!(config.path_candidates("@angular/core").is_empty());
    }
}
