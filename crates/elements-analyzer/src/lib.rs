//! Component relationship analysis and registration table generation.
//!
//! The analyzer reads a component library's TypeScript sources, recovers
//! which components nest inside which (declared through a JSDoc parent tag),
//! which content queries bind structurally meaningful children and which
//! components are also provided under another type. The result is written
//! as a registration table below a marker line in a hand-written template
//! module.
//!
//! Stages, each producing a new immutable value:
//!
//! 1. [`SourceContext`] summarizes the tsconfig file set and resolves names
//!    through imports and re-exports.
//! 2. [`Extractor`] turns decorated classes into a [`ComponentIndex`].
//! 3. [`resolve()`] keeps registered and reachable components, giving a
//!    [`ResolvedTable`].
//! 4. [`emit::render`] prints the table into the [`Template`].
//!
//! # Example
//!
//! ```rust,no_run
//! use elements_analyzer::Analyzer;
//! use elements_config::{AnalyzerConfig, ConfigOverrides};
//!
//! # fn example() -> elements_analyzer::Result<()> {
//! let cwd = std::env::current_dir().unwrap();
//! let config = AnalyzerConfig::load(&cwd, None, &ConfigOverrides::default())?;
//! let module = Analyzer::new(config, &cwd)?.generate()?;
//! println!("{} changed: {}", module.path.display(), module.changed);
//! # Ok(())
//! # }
//! ```

pub mod emit;
pub mod error;
pub mod extract;
pub mod model;
pub mod resolve;
pub mod source;
pub mod template;

use std::fs;
use std::path::{Path, PathBuf};

use elements_config::{AnalyzerConfig, TsConfig};
use tracing::info;

pub use error::{AnalyzerError, Result};
pub use extract::Extractor;
pub use model::*;
pub use resolve::resolve;
pub use source::SourceContext;
pub use template::Template;

/// The rendered module and whether it differs from what is on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub path: PathBuf,
    pub contents: String,
    pub changed: bool,
}

impl GeneratedModule {
    pub fn write(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| AnalyzerError::io(parent, err))?;
        }
        fs::write(&self.path, &self.contents).map_err(|err| AnalyzerError::io(&self.path, err))
    }
}

/// The full pipeline for one project.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalyzerConfig,
    root: PathBuf,
    context: SourceContext,
}

impl Analyzer {
    /// Locate and load the tsconfig for `cwd` and summarize its sources.
    pub fn new(config: AnalyzerConfig, cwd: impl AsRef<Path>) -> Result<Self> {
        let cwd = cwd.as_ref();
        let root = cwd.canonicalize().map_err(|err| AnalyzerError::io(cwd, err))?;

        let tsconfig = match config.tsconfig_path(&root) {
            Some(path) => TsConfig::load(&path)?,
            None => TsConfig::discover(&root)?,
        };
        info!(tsconfig = %tsconfig.path.display(), "using build configuration");

        let context = SourceContext::load(tsconfig, &root, &config.include, &config.exclude)?;
        Ok(Self {
            config,
            root,
            context,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Canonical project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn context(&self) -> &SourceContext {
        &self.context
    }

    pub fn template(&self) -> Result<Template> {
        Template::load(&self.config.template_path(&self.root), &self.config)
    }

    /// Raw records for every discovered component.
    pub fn records(&self) -> Result<ComponentIndex> {
        Extractor::new(&self.context, &self.config).extract_all()
    }

    pub fn resolved(&self) -> Result<ResolvedTable> {
        let template = self.template()?;
        self.resolve_with(&template)
    }

    fn resolve_with(&self, template: &Template) -> Result<ResolvedTable> {
        let registered = template.registered_set(&self.context)?;
        let index = self.records()?;
        Ok(resolve(&index, &registered, &self.config))
    }

    /// Render the output module without writing it.
    pub fn plan(&self) -> Result<GeneratedModule> {
        let template = self.template()?;
        let table = self.resolve_with(&template)?;
        let contents = emit::render(&template, &table, &self.config)?;

        let path = self.config.output_path(&self.root);
        let changed = match fs::read_to_string(&path) {
            Ok(existing) => existing != contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => true,
            Err(err) => return Err(AnalyzerError::io(&path, err)),
        };

        Ok(GeneratedModule {
            path,
            contents,
            changed,
        })
    }

    /// Render the output module and write it when it changed.
    pub fn generate(&self) -> Result<GeneratedModule> {
        let module = self.plan()?;
        if module.changed {
            module.write()?;
            info!(path = %module.path.display(), "wrote registration table");
        } else {
            info!(path = %module.path.display(), "registration table up to date");
        }
        Ok(module)
    }
}
