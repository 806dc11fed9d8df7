//! Module specifier resolution.

use std::path::{Path, PathBuf};

use elements_config::TsConfig;
use oxc_resolver::{ResolveOptions, Resolver};

/// Resolves import specifiers to source files.
///
/// Relative and absolute specifiers go straight to `oxc_resolver`. Bare
/// specifiers only resolve through tsconfig `paths`/`baseUrl`; anything else
/// is an external package and stays unresolved.
pub struct ModuleResolver {
    resolver: Resolver,
    tsconfig: TsConfig,
}

impl std::fmt::Debug for ModuleResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleResolver")
            .field("tsconfig", &self.tsconfig.path)
            .finish_non_exhaustive()
    }
}

impl ModuleResolver {
    pub fn new(tsconfig: TsConfig) -> Self {
        let resolver = Resolver::new(ResolveOptions {
            extensions: vec![".ts".into(), ".tsx".into(), ".d.ts".into()],
            extension_alias: vec![(
                ".js".into(),
                vec![".ts".into(), ".tsx".into(), ".js".into()],
            )],
            // Keep lexical paths so type identities match the walked file set.
            symlinks: false,
            ..Default::default()
        });
        Self { resolver, tsconfig }
    }

    pub fn tsconfig(&self) -> &TsConfig {
        &self.tsconfig
    }

    /// Resolve `specifier` as imported from `from`.
    pub fn resolve(&self, from: &Path, specifier: &str) -> Option<PathBuf> {
        let dir = from.parent()?;

        if specifier.starts_with('.') || Path::new(specifier).is_absolute() {
            return self.resolve_in(dir, specifier);
        }

        let resolved = self
            .tsconfig
            .path_candidates(specifier)
            .iter()
            .filter_map(|candidate| candidate.to_str())
            .find_map(|candidate| self.resolve_in(dir, candidate));

        if resolved.is_none() {
            tracing::trace!(specifier, from = %from.display(), "external module");
        }
        resolved
    }

    fn resolve_in(&self, dir: &Path, specifier: &str) -> Option<PathBuf> {
        match self.resolver.resolve(dir, specifier) {
            Ok(resolution) => Some(resolution.into_path_buf()),
            Err(err) => {
                tracing::debug!(specifier, dir = %dir.display(), %err, "unresolved module");
                None
            }
        }
    }
}
