//! Shared utilities for command implementations.

use crate::cli::ProjectArgs;
use crate::error::{CliError, Result};
use elements_analyzer::Analyzer;
use elements_config::{AnalyzerConfig, ConfigOverrides};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolve a path relative to a working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// The project root: `--cwd` against the process directory.
pub fn project_root(project: &ProjectArgs) -> Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    let root = match &project.cwd {
        Some(dir) => resolve_path(dir, &cwd),
        None => cwd,
    };
    if !root.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--cwd is not a directory: {}",
            root.display()
        )));
    }
    Ok(root)
}

/// Merge the analyzer config layers and load the project's sources.
pub fn load_analyzer(project: &ProjectArgs, overrides: &ConfigOverrides) -> Result<Analyzer> {
    let root = project_root(project)?;
    let config = AnalyzerConfig::load(&root, project.config.as_deref(), overrides)?;
    debug!(?config, "effective analyzer config");
    Ok(Analyzer::new(config, &root)?)
}

/// `path` relative to `root` for status lines, absolute when outside it.
pub fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
