//! Dependency graph wrapper around petgraph::StableDiGraph, keyed by absolute path

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use petgraph::stable_graph::{NodeIndex, StableDiGraph};

use crate::model::{Edge, FileNode};

/// Stable identifier of a file inside one [`DependencyGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub usize);

impl FileId {
    fn index(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

/// The node/edge set produced by one traversal.
///
/// Nodes are unique by absolute path and edges are unique by their ordered
/// pair of endpoints, so inserting either twice is a no-op.
pub struct DependencyGraph {
    inner: StableDiGraph<FileNode, ()>,
    by_path: HashMap<PathBuf, FileId>,
}

impl std::fmt::Debug for DependencyGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyGraph")
            .field("file_count", &self.inner.node_count())
            .field("edge_count", &self.inner.edge_count())
            .finish()
    }
}

impl DependencyGraph {
    pub fn new() -> Self {
        DependencyGraph {
            inner: StableDiGraph::new(),
            by_path: HashMap::new(),
        }
    }

    /// Add a file. Returns the existing id when the path is already present.
    pub fn add_file(&mut self, node: FileNode) -> FileId {
        if let Some(&id) = self.by_path.get(&node.path) {
            return id;
        }
        let path = node.path.clone();
        let id = FileId(self.inner.add_node(node).index());
        self.by_path.insert(path, id);
        id
    }

    /// Record that `from` imports `to`. Returns false if the edge already existed.
    pub fn add_import(&mut self, from: FileId, to: FileId) -> bool {
        if self.inner.find_edge(from.index(), to.index()).is_some() {
            return false;
        }
        self.inner.add_edge(from.index(), to.index(), ());
        true
    }

    pub fn id_of(&self, path: &Path) -> Option<FileId> {
        self.by_path.get(path).copied()
    }

    pub fn file(&self, id: FileId) -> Option<&FileNode> {
        self.inner.node_weight(id.index())
    }

    pub fn file_mut(&mut self, id: FileId) -> Option<&mut FileNode> {
        self.inner.node_weight_mut(id.index())
    }

    /// Total number of files.
    pub fn file_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Total number of distinct import edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all files in insertion order.
    pub fn files(&self) -> impl Iterator<Item = &FileNode> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// The edge set expressed as short-path pairs, ordered lexicographically.
    pub fn edges(&self) -> BTreeSet<Edge> {
        self.inner
            .edge_indices()
            .filter_map(|idx| self.inner.edge_endpoints(idx))
            .filter_map(|(from, to)| {
                let from = self.inner.node_weight(from)?;
                let to = self.inner.node_weight(to)?;
                Some(Edge::new(from.short_path.clone(), to.short_path.clone()))
            })
            .collect()
    }

    /// Short paths of every file, ordered lexicographically.
    pub fn short_paths(&self) -> BTreeSet<String> {
        self.files().map(|f| f.short_path.clone()).collect()
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}
