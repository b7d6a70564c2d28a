//! Modgraph Core: module graph data model, path rules and hierarchy builder

pub mod aggregation;
pub mod config;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod model;
pub mod paths;
pub mod patterns;
pub mod workspace;

#[cfg(test)]
mod tests;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregation::aggregate_edges;
pub use config::{CONFIG_FILE, RenderSettings, config_path};
pub use error::{ConfigError, GraphError};
pub use graph::{DependencyGraph, FileId};
pub use hierarchy::{HierarchyNode, build_hierarchy};
pub use model::{Edge, FileNode, Language, Symbol, SymbolKind};
pub use paths::{normalize_path, short_path};
pub use patterns::{CollapseRules, PathFilter, PatternSet};
pub use workspace::detect_project;
