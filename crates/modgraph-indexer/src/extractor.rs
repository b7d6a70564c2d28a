//! Language extractor trait definition

use modgraph_core::Symbol;
use tree_sitter::Tree;

pub trait LanguageExtractor {
    /// Module specifiers of top-level import/export statements, in source order.
    fn imports(&self, tree: &Tree, source: &str) -> Vec<String>;

    fn exports(&self, tree: &Tree, source: &str) -> Vec<Symbol>;
}
