//! Resolution configuration and the `tsconfig.json` / `jsconfig.json` loader

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use modgraph_core::config::DEFAULT_PACKAGE_DIR;
use serde::Deserialize;

use crate::error::IndexError;

/// Extensions appended to an extensionless candidate, in priority order.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".d.ts", ".js", ".jsx", ".mjs", ".cjs"];

/// One `compilerOptions.paths` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PathAlias {
    pub pattern: String,
    /// Absolute target templates; a `*` receives the matched text.
    pub targets: Vec<PathBuf>,
}

impl PathAlias {
    /// Text matched by the `*` wildcard, or `""` for an exact pattern.
    pub fn match_specifier<'s>(&self, specifier: &'s str) -> Option<&'s str> {
        match self.pattern.split_once('*') {
            Some((prefix, suffix)) => specifier
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix)),
            None if self.pattern == specifier => Some(""),
            None => None,
        }
    }

    /// Target paths with the wildcard substituted.
    pub fn expand(&self, matched: &str) -> Vec<PathBuf> {
        self.targets
            .iter()
            .map(|target| {
                let target = target.to_string_lossy();
                if target.contains('*') {
                    PathBuf::from(target.replacen('*', matched, 1))
                } else {
                    PathBuf::from(target.as_ref())
                }
            })
            .collect()
    }

    fn prefix_len(&self) -> usize {
        self.pattern.find('*').unwrap_or(self.pattern.len())
    }

    fn is_exact(&self) -> bool {
        !self.pattern.contains('*')
    }
}

/// Everything the module resolver needs to know about the project.
#[derive(Debug, Clone)]
pub struct ResolutionConfig {
    /// Directory short paths are made relative to.
    pub root: PathBuf,
    pub base_url: Option<PathBuf>,
    /// Ordered from most to least specific.
    pub paths: Vec<PathAlias>,
    /// Opaque third-party package directory name.
    pub package_dir: String,
    pub extensions: Vec<String>,
}

impl ResolutionConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ResolutionConfig {
            root: root.into(),
            base_url: None,
            paths: Vec::new(),
            package_dir: DEFAULT_PACKAGE_DIR.to_string(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn with_package_dir(mut self, package_dir: impl Into<String>) -> Self {
        self.package_dir = package_dir.into();
        self
    }

    /// Apply `baseUrl` and `paths` from a loaded manifest.
    pub fn with_tsconfig(mut self, tsconfig: &TsConfig) -> Self {
        self.base_url = tsconfig.base_url.clone();
        self.paths = tsconfig.paths.clone();
        self
    }

    /// Whether `path` lies inside the opaque package directory.
    ///
    /// Only components below the project root count, so a project that itself
    /// lives under a package directory can still be analyzed.
    pub fn is_in_package_dir(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .any(|c| matches!(c, Component::Normal(part) if part == self.package_dir.as_str()))
    }
}

/// The parts of a project manifest that affect resolution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TsConfig {
    /// Directory holding the manifest.
    pub dir: PathBuf,
    pub base_url: Option<PathBuf>,
    pub paths: Vec<PathAlias>,
}

#[derive(Deserialize)]
struct RawConfig {
    #[serde(rename = "compilerOptions")]
    compiler_options: Option<CompilerOptions>,
}

#[derive(Deserialize)]
struct CompilerOptions {
    #[serde(rename = "baseUrl")]
    base_url: Option<String>,
    paths: Option<BTreeMap<String, Vec<String>>>,
}

impl TsConfig {
    pub const FILE_NAMES: [&'static str; 2] = ["tsconfig.json", "jsconfig.json"];

    /// Nearest manifest at or above `start`.
    pub fn find(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            Self::FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    pub fn load(path: &Path) -> Result<Self, IndexError> {
        let content = std::fs::read_to_string(path).map_err(|source| IndexError::UnreadableFile {
            path: path.to_path_buf(),
            source,
        })?;
        let dir = path.parent().unwrap_or(Path::new(".")).to_path_buf();
        let config = Self::parse_content(&content, dir).map_err(|source| IndexError::TsConfig {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(
            "Loaded {} (baseUrl: {:?}, {} path aliases)",
            path.display(),
            config.base_url,
            config.paths.len()
        );
        Ok(config)
    }

    fn parse_content(content: &str, dir: PathBuf) -> Result<Self, serde_json::Error> {
        let raw: RawConfig = serde_json::from_str(&to_strict_json(content))?;
        let Some(opts) = raw.compiler_options else {
            return Ok(TsConfig {
                dir,
                ..TsConfig::default()
            });
        };

        let base_url = opts.base_url.map(|b| dir.join(b));
        let base_for_paths = base_url.clone().unwrap_or_else(|| dir.clone());

        let mut paths: Vec<PathAlias> = opts
            .paths
            .unwrap_or_default()
            .into_iter()
            .map(|(pattern, targets)| PathAlias {
                pattern,
                targets: targets.iter().map(|t| base_for_paths.join(t)).collect(),
            })
            .collect();
        // Exact patterns first, then longest prefix before the wildcard
        paths.sort_by(|a, b| {
            b.is_exact()
                .cmp(&a.is_exact())
                .then_with(|| b.prefix_len().cmp(&a.prefix_len()))
        });

        Ok(TsConfig {
            dir,
            base_url,
            paths,
        })
    }
}

/// Strip `//` and `/* */` comments and trailing commas so serde_json accepts
/// the relaxed syntax TypeScript allows in its manifests.
fn to_strict_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(next) = chars.next() {
                        out.push(next);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            '}' | ']' => {
                let trimmed = out.trim_end().len();
                if out[..trimmed].ends_with(',') {
                    out.truncate(trimmed - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}
