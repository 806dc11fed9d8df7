//! File-based analyzer config discovery.
//!
//! Handles finding the analyzer configuration in a project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// `package.json` field holding inline analyzer configuration.
pub const PACKAGE_JSON_FIELD: &str = "elementsAnalyzer";

/// TOML file name holding analyzer configuration.
pub const CONFIG_FILE: &str = "elements.toml";

/// Where an analyzer configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Toml(PathBuf),
    PackageJson(PathBuf),
}

impl ConfigSource {
    /// Classify an explicitly named config file by its file name.
    pub fn from_path(path: &Path) -> Self {
        if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            ConfigSource::PackageJson(path.to_path_buf())
        } else {
            ConfigSource::Toml(path.to_path_buf())
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::Toml(path) | ConfigSource::PackageJson(path) => path,
        }
    }
}

/// Searches a project root for analyzer configuration.
///
/// # Example
///
/// ```no_run
/// use elements_config::ConfigDiscovery;
///
/// let found = ConfigDiscovery::new(".").find();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a config source in the root directory
    ///
    /// Searches in this order:
    /// 1. TOML config: elements.toml
    /// 2. package.json (elementsAnalyzer field)
    pub fn find(&self) -> Option<ConfigSource> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(ConfigSource::Toml(toml_path));
        }

        let pkg_path = self.root.join("package.json");
        if pkg_path.is_file() {
            if let Ok(content) = fs::read_to_string(&pkg_path) {
                if let Ok(parsed) = serde_json::from_str::<Value>(&content) {
                    if parsed.get(PACKAGE_JSON_FIELD).is_some_and(|v| !v.is_null()) {
                        return Some(ConfigSource::PackageJson(pkg_path));
                    }
                }
            }
        }

        None
    }

    /// Read the `elementsAnalyzer` field of a `package.json`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not JSON, or the field is
    /// missing or not an object.
    pub fn package_json_field(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;

        let parsed: Value =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("invalid JSON: {e}"),
            })?;

        match parsed.get(PACKAGE_JSON_FIELD) {
            Some(value @ Value::Object(_)) => Ok(value.clone()),
            Some(_) => Err(ConfigError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("the '{PACKAGE_JSON_FIELD}' field must be an object"),
            }),
            None => Err(ConfigError::InvalidPackageJson {
                path: path.to_path_buf(),
                message: format!("add an '{PACKAGE_JSON_FIELD}' field to package.json"),
            }),
        }
    }
}
