//! Module resolution for TypeScript/JavaScript import specifiers.
//!
//! Follows the TypeScript "node" strategy:
//! 1. Relative or absolute specifiers, as a file then as a directory
//! 2. `paths` aliases, then `baseUrl`
//! 3. `<ancestor>/<package_dir>/<specifier>`, then its `@types` counterpart

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use modgraph_core::{Language, normalize_path};
use serde::Deserialize;

use crate::tsconfig::ResolutionConfig;

/// Outcome of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical absolute path of the target file.
    Resolved(PathBuf),
    Unresolved,
}

impl From<Option<PathBuf>> for Resolution {
    fn from(found: Option<PathBuf>) -> Self {
        found.map_or(Resolution::Unresolved, Resolution::Resolved)
    }
}

/// Maps a specifier, as written in `from_file`, to a file on disk.
///
/// Implementations must not fail: a missing target is `Unresolved`.
pub trait ModuleResolver {
    fn resolve(&self, specifier: &str, from_file: &Path) -> Resolution;
}

/// Resolver backed by the real filesystem.
pub struct NodeResolver<'c> {
    config: &'c ResolutionConfig,
}

#[derive(Deserialize)]
struct PackageManifest {
    types: Option<String>,
    typings: Option<String>,
    main: Option<String>,
}

impl<'c> NodeResolver<'c> {
    pub fn new(config: &'c ResolutionConfig) -> Self {
        Self { config }
    }

    fn find(&self, specifier: &str, from_file: &Path) -> Option<PathBuf> {
        let from_dir = from_file.parent().unwrap_or(self.config.root.as_path());

        if is_relative(specifier) {
            return self.try_file_or_dir(&from_dir.join(specifier));
        }
        if specifier.starts_with('/') {
            return self.try_file_or_dir(Path::new(specifier));
        }

        self.try_aliases(specifier)
            .or_else(|| {
                let base_url = self.config.base_url.as_ref()?;
                self.try_file_or_dir(&base_url.join(specifier))
            })
            .or_else(|| self.try_packages(specifier, from_dir))
    }

    fn try_aliases(&self, specifier: &str) -> Option<PathBuf> {
        self.config.paths.iter().find_map(|alias| {
            let matched = alias.match_specifier(specifier)?;
            alias
                .expand(matched)
                .iter()
                .find_map(|target| self.try_file_or_dir(target))
        })
    }

    fn try_packages(&self, specifier: &str, from_dir: &Path) -> Option<PathBuf> {
        let types_name = types_package_name(specifier);
        from_dir.ancestors().find_map(|ancestor| {
            let packages = ancestor.join(&self.config.package_dir);
            if !packages.is_dir() {
                return None;
            }
            self.try_file_or_dir(&packages.join(specifier))
                .or_else(|| self.try_file_or_dir(&packages.join("@types").join(&types_name)))
        })
    }

    fn try_file_or_dir(&self, candidate: &Path) -> Option<PathBuf> {
        self.try_file(candidate).or_else(|| self.try_dir(candidate))
    }

    fn try_file(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() && Language::from_path(candidate).is_source() {
            return Some(candidate.to_path_buf());
        }

        for ext in &self.config.extensions {
            let with_ext = append_extension(candidate, ext);
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }

        // `./util.js` written in TypeScript source refers to `./util.ts`
        typescript_counterparts(candidate)
            .into_iter()
            .find(|path| path.is_file())
    }

    fn try_dir(&self, candidate: &Path) -> Option<PathBuf> {
        if !candidate.is_dir() {
            return None;
        }

        let manifest = candidate.join("package.json");
        if manifest.is_file() {
            if let Some(entry) = self.manifest_entry(&manifest, candidate) {
                return Some(entry);
            }
        }

        self.try_index(candidate)
    }

    fn manifest_entry(&self, manifest: &Path, dir: &Path) -> Option<PathBuf> {
        let content = std::fs::read_to_string(manifest).ok()?;
        let parsed: PackageManifest = match serde_json::from_str(&content) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!("Ignoring {}: {}", manifest.display(), e);
                return None;
            }
        };
        [parsed.types, parsed.typings, parsed.main]
            .into_iter()
            .flatten()
            .find_map(|entry| {
                let target = dir.join(entry);
                self.try_file(&target).or_else(|| self.try_index(&target))
            })
    }

    fn try_index(&self, dir: &Path) -> Option<PathBuf> {
        self.config
            .extensions
            .iter()
            .map(|ext| dir.join(format!("index{ext}")))
            .find(|index| index.is_file())
    }
}

impl ModuleResolver for NodeResolver<'_> {
    fn resolve(&self, specifier: &str, from_file: &Path) -> Resolution {
        let found = self
            .find(specifier, from_file)
            .map(|path| normalize_path(&path, &self.config.root));
        tracing::trace!("{} from {}: {:?}", specifier, from_file.display(), found);
        Resolution::from(found)
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// `foo.ts` + `.d.ts` = `foo.ts.d.ts`; never replaces an existing extension,
/// since `./jquery.min` must become `./jquery.min.js`.
fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(ext);
    PathBuf::from(name)
}

fn typescript_counterparts(path: &Path) -> Vec<PathBuf> {
    let replacements: &[&str] = match path.extension().and_then(|e| e.to_str()) {
        Some("js") => &["ts", "tsx", "d.ts"],
        Some("jsx") => &["tsx"],
        Some("mjs") => &["mts"],
        Some("cjs") => &["cts"],
        _ => &[],
    };
    replacements
        .iter()
        .map(|ext| path.with_extension(ext))
        .collect()
}

/// `@scope/name` → `scope__name`, following the DefinitelyTyped convention.
fn types_package_name(specifier: &str) -> String {
    match specifier.strip_prefix('@') {
        Some(scoped) => scoped.replacen('/', "__", 1),
        None => specifier.to_string(),
    }
}
