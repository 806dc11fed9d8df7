//! Expansion of the tsconfig file set.

use std::path::{Path, PathBuf};

use elements_config::TsConfig;
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};

use crate::error::{AnalyzerError, Result};

/// Non-declaration TypeScript sources: `.ts` and `.tsx`, never `.d.ts`.
pub fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.ends_with(".d.ts") && (name.ends_with(".ts") || name.ends_with(".tsx"))
}

/// The files the project compiles, narrowed by the analyzer's own globs.
///
/// `root` anchors `include`/`exclude`; tsconfig patterns are anchored at the
/// tsconfig directory. The result is sorted and free of duplicates.
pub fn collect_files(
    tsconfig: &TsConfig,
    root: &Path,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = walk_tsconfig(tsconfig)?;
    files.extend(tsconfig.files.iter().filter(|p| p.is_file()).cloned());

    let narrowing = build_override(root, include, exclude)?;
    files.retain(|path| !narrowing.matched(path, false).is_ignore());

    files.sort();
    files.dedup();

    tracing::debug!(
        tsconfig = %tsconfig.path.display(),
        count = files.len(),
        "collected source files"
    );
    Ok(files)
}

fn walk_tsconfig(tsconfig: &TsConfig) -> Result<Vec<PathBuf>> {
    let include: Vec<String> = tsconfig
        .include
        .iter()
        .map(|pattern| include_glob(pattern))
        .collect();
    let overrides = build_override(&tsconfig.root, &include, &tsconfig.exclude)?;

    let mut files = Vec::new();
    let walker = WalkBuilder::new(&tsconfig.root)
        .standard_filters(false)
        .overrides(overrides)
        .build();

    for entry in walker {
        let entry = entry.map_err(|err| AnalyzerError::FileSet {
            message: err.to_string(),
        })?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && is_source_file(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// A tsconfig include names a directory when its last segment has neither a
/// wildcard nor an extension; directories include everything beneath them.
fn include_glob(pattern: &str) -> String {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    let last = pattern.rsplit('/').next().unwrap_or(pattern);
    if last.contains('*') || last.contains('?') || last.contains('.') {
        pattern.to_string()
    } else {
        format!("{}/**/*", pattern.trim_end_matches('/'))
    }
}

fn build_override(root: &Path, include: &[String], exclude: &[String]) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    let patterns = include
        .iter()
        .map(|glob| glob.strip_prefix("./").unwrap_or(glob).to_string())
        .chain(exclude.iter().map(|glob| {
            format!("!{}", glob.strip_prefix("./").unwrap_or(glob))
        }));

    for pattern in patterns {
        builder.add(&pattern).map_err(|err| AnalyzerError::FileSet {
            message: format!("invalid glob '{pattern}': {err}"),
        })?;
    }

    builder.build().map_err(|err| AnalyzerError::FileSet {
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::fs;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    fn tsconfig(root: &Path, include: &[&str], exclude: &[&str]) -> TsConfig {
        TsConfig {
            path: root.join("tsconfig.json"),
            root: root.to_path_buf(),
            files: Vec::new(),
            include: include.iter().map(|s| s.to_string()).collect(),
            exclude: exclude.iter().map(|s| s.to_string()).collect(),
            base_url: None,
            paths: BTreeMap::new(),
            paths_base: root.to_path_buf(),
        }
    }

    #[test]
    fn source_file_filter() {
        assert!(is_source_file(Path::new("/a/grid.component.ts")));
        assert!(is_source_file(Path::new("/a/view.tsx")));
        assert!(!is_source_file(Path::new("/a/types.d.ts")));
        assert!(!is_source_file(Path::new("/a/index.js")));
    }

    #[test]
    fn directory_includes_expand() {
        assert_eq!(include_glob("src"), "src/**/*");
        assert_eq!(include_glob("./src/"), "src/**/*");
        assert_eq!(include_glob("src/**/*.ts"), "src/**/*.ts");
        assert_eq!(include_glob("**/*"), "**/*");
    }

    #[test]
    fn walks_includes_and_applies_excludes() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/grid/grid.component.ts");
        touch(root, "src/grid/grid.component.spec.ts");
        touch(root, "src/types.d.ts");
        touch(root, "src/node_modules/dep/index.ts");
        touch(root, "scripts/tool.ts");

        let config = tsconfig(root, &["src"], &["node_modules"]);
        let files = collect_files(&config, root, &[], &["**/*.spec.ts".to_string()]).unwrap();

        assert_eq!(files, vec![root.join("src/grid/grid.component.ts")]);
    }

    #[test]
    fn analyzer_include_narrows_further() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "src/grid/grid.ts");
        touch(root, "src/tabs/tabs.ts");

        let config = tsconfig(root, &["**/*"], &[]);
        let files = collect_files(&config, root, &["src/grid/**".to_string()], &[]).unwrap();

        assert_eq!(files, vec![root.join("src/grid/grid.ts")]);
    }
}
