//! Render settings loaded from `.modgraph.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::patterns::{CollapseRules, PathFilter, PatternSet};

/// Settings file looked up in the project root.
pub const CONFIG_FILE: &str = ".modgraph.toml";

/// Default name of the third-party package directory that is never traversed.
pub const DEFAULT_PACKAGE_DIR: &str = "node_modules";

/// Get settings file path
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Toggles and pattern lists controlling what the renderer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    /// Group files into nested directory clusters.
    pub groups: bool,
    /// Show exported symbols inside each file record.
    pub symbols: bool,
    /// Directory groups to collapse into a single node.
    pub collapse: Vec<String>,
    /// Directory groups that must never collapse.
    pub collapse_exclude: Vec<String>,
    /// Paths to show. Empty means all.
    pub include: Vec<String>,
    /// Paths to hide.
    pub exclude: Vec<String>,
    /// Opaque package directory name.
    pub package_dir: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        RenderSettings {
            groups: true,
            symbols: false,
            collapse: Vec::new(),
            collapse_exclude: Vec::new(),
            include: Vec::new(),
            exclude: Vec::new(),
            package_dir: DEFAULT_PACKAGE_DIR.to_string(),
        }
    }
}

impl RenderSettings {
    /// Load settings from `path`. A missing file is not an error.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.is_file() {
            return Ok(None);
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::parse(&text, path)?;
        tracing::debug!("Render settings loaded from {}", path.display());
        Ok(Some(settings))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn path_filter(&self) -> Result<PathFilter, ConfigError> {
        Ok(PathFilter::new(
            PatternSet::new(&self.include)?,
            PatternSet::new(&self.exclude)?,
        ))
    }

    pub fn collapse_rules(&self) -> Result<CollapseRules, ConfigError> {
        Ok(CollapseRules::new(
            PatternSet::new(&self.collapse)?,
            PatternSet::new(&self.collapse_exclude)?,
        ))
    }
}
