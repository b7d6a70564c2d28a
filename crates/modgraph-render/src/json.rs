//! Node/link JSON serialization of the graph

use std::path::Path;

use modgraph_core::DependencyGraph;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Default output file of the `json` command.
pub const DEFAULT_JSON_FILE: &str = "result.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonGraph {
    pub nodes: Vec<JsonNode>,
    pub links: Vec<JsonLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonNode {
    pub id: String,
    pub group: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLink {
    pub source: String,
    pub target: String,
    pub value: u32,
}

impl JsonGraph {
    /// Nodes sorted by id, links by (source, target). Self-imports are dropped.
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let nodes = graph
            .short_paths()
            .into_iter()
            .map(|id| JsonNode { id, group: 1 })
            .collect();
        let links = graph
            .edges()
            .into_iter()
            .filter(|edge| !edge.is_self_edge())
            .map(|edge| JsonLink {
                source: edge.from,
                target: edge.to,
                value: 1,
            })
            .collect();
        JsonGraph { nodes, links }
    }

    pub fn to_pretty_string(&self) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), RenderError> {
        let text = self.to_pretty_string()?;
        std::fs::write(path, text).map_err(|source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            "Wrote {} nodes and {} links to {}",
            self.nodes.len(),
            self.links.len(),
            path.display()
        );
        Ok(())
    }
}
