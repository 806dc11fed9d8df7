//! Analyzer configuration.
//!
//! `AnalyzerConfig` is merged from several sources with `figment`:
//! CLI overrides > `ELEMENTS_*` environment > `elements.toml` (or the
//! `elementsAnalyzer` field of `package.json`) > built-in defaults.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::discovery::{ConfigDiscovery, ConfigSource};
use crate::error::{ConfigError, Result};

/// Default location of the template module, relative to the project root.
pub const DEFAULT_TEMPLATE: &str = "src/analyzer/elements.config.ts";

/// Boundary between the hand-written template and the generated table.
pub const DEFAULT_MARKER: &str =
    "// WARNING: Code below this line is auto-generated and any modifications will be overwritten";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Template module holding the registered array and the marker line.
    pub template: PathBuf,
    /// Output module. Defaults to the template itself.
    pub output: Option<PathBuf>,
    /// Explicit tsconfig; discovered upward from the project root when absent.
    pub tsconfig: Option<PathBuf>,
    pub registered_export: String,
    pub table_name: String,
    pub marker: String,
    /// Globs narrowing the tsconfig file set. Empty means "everything".
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub parent_tag: String,
    pub hidden_tags: Vec<String>,
    /// Treat members without an accessibility modifier as public.
    pub implicit_public: bool,
    pub decorators: DecoratorNames,
    pub template_types: Vec<String>,
    pub selector_prefix: Option<SelectorPrefix>,
    pub quote_style: QuoteStyle,
}

/// The decorator vocabulary the extractor understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorNames {
    pub component: String,
    pub input: String,
    pub output: String,
    pub queries: Vec<String>,
    /// The query decorator that yields a list of matches.
    pub query_list: String,
    /// Lazy type reference wrapper, `forwardRef(() => T)`.
    pub forward_ref: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorPrefix {
    pub from: String,
    pub to: String,
}

impl SelectorPrefix {
    /// Rewrites `selector` when it starts with `from`.
    pub fn apply(&self, selector: &str) -> String {
        match selector.strip_prefix(&self.from) {
            Some(rest) => format!("{}{}", self.to, rest),
            None => selector.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            template: PathBuf::from(DEFAULT_TEMPLATE),
            output: None,
            tsconfig: None,
            registered_export: "registerComponents".to_string(),
            table_name: "registerConfig".to_string(),
            marker: DEFAULT_MARKER.to_string(),
            include: Vec::new(),
            exclude: vec!["**/*.spec.ts".to_string()],
            parent_tag: "igxParent".to_string(),
            hidden_tags: vec!["hidden".to_string(), "internal".to_string()],
            implicit_public: false,
            decorators: DecoratorNames::default(),
            template_types: vec!["TemplateRef".to_string()],
            selector_prefix: Some(SelectorPrefix {
                from: "igx-".to_string(),
                to: "igc-".to_string(),
            }),
            quote_style: QuoteStyle::Double,
        }
    }
}

impl Default for DecoratorNames {
    fn default() -> Self {
        Self {
            component: "Component".to_string(),
            input: "Input".to_string(),
            output: "Output".to_string(),
            queries: vec!["ContentChild".to_string(), "ContentChildren".to_string()],
            query_list: "ContentChildren".to_string(),
            forward_ref: "forwardRef".to_string(),
        }
    }
}

/// Values supplied on the command line. `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<PathBuf>,
}

impl AnalyzerConfig {
    /// Load configuration for the project rooted at `root`.
    ///
    /// `explicit` names a config file to use instead of discovery.
    pub fn load(root: &Path, explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let source = match explicit {
            Some(path) => {
                let path = root.join(path);
                if !path.is_file() {
                    return Err(ConfigError::ConfigFileMissing(path));
                }
                Some(ConfigSource::from_path(&path))
            }
            None => ConfigDiscovery::new(root).find(),
        };

        match source {
            Some(ConfigSource::Toml(path)) => {
                tracing::debug!(path = %path.display(), "loading analyzer config");
                figment = figment.merge(Toml::file(path));
            }
            Some(ConfigSource::PackageJson(path)) => {
                tracing::debug!(path = %path.display(), "loading analyzer config from package.json");
                let value = ConfigDiscovery::package_json_field(&path)?;
                figment = figment.merge(Serialized::defaults(value));
            }
            None => {}
        }

        // ELEMENTS_TABLE_NAME, ELEMENTS_DECORATORS__COMPONENT, ...
        figment = figment.merge(Env::prefixed("ELEMENTS_").split("__"));
        figment = figment.merge(Serialized::defaults(overrides));

        Ok(figment.extract()?)
    }

    /// Absolute template path.
    pub fn template_path(&self, root: &Path) -> PathBuf {
        absolutize(root, &self.template)
    }

    /// Absolute output path; the template when no output is configured.
    pub fn output_path(&self, root: &Path) -> PathBuf {
        match &self.output {
            Some(output) => absolutize(root, output),
            None => self.template_path(root),
        }
    }

    /// Absolute tsconfig path, when one is configured.
    pub fn tsconfig_path(&self, root: &Path) -> Option<PathBuf> {
        self.tsconfig.as_deref().map(|p| absolutize(root, p))
    }
}

fn absolutize(root: &Path, path: &Path) -> PathBuf {
    path_clean::clean(root.join(path))
}
