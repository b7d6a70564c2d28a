//! Folder hierarchy built from the flat, short-path keyed node set

use crate::model::FileNode;
use crate::paths::segments;
use crate::patterns::PathFilter;

/// One directory level of the hierarchy. Borrows the files it groups.
#[derive(Debug, Clone)]
pub struct HierarchyNode<'g> {
    /// The path component this level represents (`.` for the root).
    pub segment_name: String,
    /// Short-path prefix of this level, e.g. `./src/utils`.
    pub full_path: String,
    /// Files located directly in this directory.
    pub children: Vec<&'g FileNode>,
    /// Subdirectories, unique by `segment_name`.
    pub child_groups: Vec<HierarchyNode<'g>>,
}

impl<'g> HierarchyNode<'g> {
    pub fn root() -> Self {
        Self::new(".", ".")
    }

    fn new(segment_name: &str, full_path: &str) -> Self {
        HierarchyNode {
            segment_name: segment_name.to_string(),
            full_path: full_path.to_string(),
            children: Vec::new(),
            child_groups: Vec::new(),
        }
    }

    /// A group with no files of its own and exactly one subdirectory.
    pub fn is_degenerate(&self) -> bool {
        self.children.is_empty() && self.child_groups.len() == 1
    }

    /// Every file at or below this level, depth first.
    pub fn descendants(&self) -> Vec<&'g FileNode> {
        let mut files = self.children.clone();
        for group in &self.child_groups {
            files.extend(group.descendants());
        }
        files
    }

    /// Walk down `dirs`, creating any missing level, and return the deepest one.
    fn group_for(&mut self, prefix: &str, dirs: &[&str]) -> &mut HierarchyNode<'g> {
        let Some((first, rest)) = dirs.split_first() else {
            return self;
        };
        let position = match self.child_groups.iter().position(|g| g.segment_name == *first) {
            Some(idx) => idx,
            None => {
                let full_path = if self.full_path == "." {
                    format!("{prefix}{first}")
                } else {
                    format!("{}/{}", self.full_path, first)
                };
                self.child_groups.push(HierarchyNode::new(first, &full_path));
                self.child_groups.len() - 1
            }
        };
        self.child_groups[position].group_for(prefix, rest)
    }
}

/// Build the directory tree for `nodes`, omitting files rejected by `filter`.
///
/// Files are inserted in short-path order so sibling order is stable.
pub fn build_hierarchy<'g, I>(nodes: I, filter: &PathFilter) -> HierarchyNode<'g>
where
    I: IntoIterator<Item = &'g FileNode>,
{
    let mut nodes: Vec<&'g FileNode> = nodes
        .into_iter()
        .filter(|n| filter.is_visible(&n.short_path))
        .collect();
    nodes.sort_by(|a, b| a.short_path.cmp(&b.short_path));

    let mut root = HierarchyNode::root();
    for node in nodes {
        let parts = segments(&node.short_path);
        let dirs = &parts[..parts.len().saturating_sub(1)];
        let prefix = if node.short_path.starts_with('/') { "/" } else { "./" };
        root.group_for(prefix, dirs).children.push(node);
    }
    root
}
