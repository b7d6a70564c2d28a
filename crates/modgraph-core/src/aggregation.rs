//! Edge aggregation for collapsed subtrees

use std::collections::BTreeSet;

use crate::model::Edge;
use crate::patterns::{CollapseRules, PathFilter};

/// Compute the edges to draw once collapse rules and path filters apply.
///
/// Each endpoint is rewritten onto the collapsed node that swallows it, edges
/// that become self-loops are dropped, duplicates created by the rewrite merge
/// into one, and edges with a hidden endpoint are removed. The result is
/// ordered lexicographically.
pub fn aggregate_edges<'a, I>(edges: I, rules: &CollapseRules, filter: &PathFilter) -> Vec<Edge>
where
    I: IntoIterator<Item = &'a Edge>,
{
    let mut visible: BTreeSet<Edge> = BTreeSet::new();

    for edge in edges {
        let rewritten = Edge::new(rules.rewrite(&edge.from), rules.rewrite(&edge.to));

        // Both endpoints inside the same collapsed subtree, or a file importing itself
        if rewritten.is_self_edge() {
            continue;
        }

        if !filter.is_visible(&rewritten.from) || !filter.is_visible(&rewritten.to) {
            continue;
        }

        visible.insert(rewritten);
    }

    visible.into_iter().collect()
}
