//! Path-pattern rules: include/exclude filtering and subtree collapsing

use regex::{Regex, RegexBuilder};

use crate::error::ConfigError;
use crate::paths::segments;

/// An ordered list of case-insensitive regular expressions.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Regex>,
}

impl PatternSet {
    pub fn new<I, S>(patterns: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let pattern = p.as_ref();
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ConfigError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PatternSet { patterns })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

/// Decides which short paths are visible in rendered output.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: PatternSet,
    exclude: PatternSet,
}

impl PathFilter {
    pub fn new(include: PatternSet, exclude: PatternSet) -> Self {
        PathFilter { include, exclude }
    }

    /// A filter that lets everything through.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Visible when some include pattern matches (or none are configured)
    /// and no exclude pattern matches.
    pub fn is_visible(&self, short_path: &str) -> bool {
        (self.include.is_empty() || self.include.is_match(short_path))
            && !self.exclude.is_match(short_path)
    }
}

/// Rules that replace whole directory subtrees by one synthetic node.
#[derive(Debug, Clone, Default)]
pub struct CollapseRules {
    include: PatternSet,
    exclude: PatternSet,
}

impl CollapseRules {
    pub fn new(include: PatternSet, exclude: PatternSet) -> Self {
        CollapseRules { include, exclude }
    }

    pub fn none() -> Self {
        Self::default()
    }

    /// Whether the directory group at `full_path` renders as one collapsed node.
    pub fn collapses(&self, full_path: &str) -> bool {
        self.include.is_match(full_path) && !self.exclude.is_match(full_path)
    }

    /// Map a file's short path onto the collapsed group that swallows it,
    /// or return it unchanged.
    ///
    /// Directories are tried outermost first (`./a`, then `./a/b`), which is
    /// the order the renderer meets groups in, so the result is always the
    /// full path of a group drawn as one node.
    pub fn rewrite(&self, short_path: &str) -> String {
        let parts = segments(short_path);
        let dirs = &parts[..parts.len().saturating_sub(1)];
        let mut group = if short_path.starts_with('/') {
            String::new()
        } else {
            String::from(".")
        };
        for dir in dirs {
            group.push('/');
            group.push_str(dir);
            if self.collapses(&group) {
                return group;
            }
        }
        short_path.to_string()
    }
}
