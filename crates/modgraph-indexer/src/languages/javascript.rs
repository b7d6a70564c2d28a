//! JavaScript language extractor using tree-sitter

use modgraph_core::{Symbol, SymbolKind};
use tree_sitter::Tree;

use super::ecma::{self, DeclarationKinds};
use crate::extractor::LanguageExtractor;

const DECLARATIONS: DeclarationKinds = &[
    ("function_declaration", SymbolKind::Function),
    ("generator_function_declaration", SymbolKind::Function),
    ("class_declaration", SymbolKind::TypeLike),
];

pub struct JavaScriptExtractor;

impl LanguageExtractor for JavaScriptExtractor {
    fn imports(&self, tree: &Tree, source: &str) -> Vec<String> {
        ecma::top_level_imports(tree, source)
    }

    fn exports(&self, tree: &Tree, source: &str) -> Vec<Symbol> {
        ecma::exported_symbols(tree, source, DECLARATIONS)
    }
}
