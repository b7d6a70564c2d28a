//! TypeScript language extractor using tree-sitter

use modgraph_core::{Symbol, SymbolKind};
use tree_sitter::Tree;

use super::ecma::{self, DeclarationKinds};
use crate::extractor::LanguageExtractor;

const DECLARATIONS: DeclarationKinds = &[
    ("function_declaration", SymbolKind::Function),
    ("generator_function_declaration", SymbolKind::Function),
    ("function_signature", SymbolKind::Function),
    ("class_declaration", SymbolKind::TypeLike),
    ("abstract_class_declaration", SymbolKind::TypeLike),
    ("interface_declaration", SymbolKind::TypeLike),
    ("type_alias_declaration", SymbolKind::TypeLike),
    ("enum_declaration", SymbolKind::TypeLike),
    ("internal_module", SymbolKind::TypeLike),
];

pub struct TypeScriptExtractor;

impl LanguageExtractor for TypeScriptExtractor {
    fn imports(&self, tree: &Tree, source: &str) -> Vec<String> {
        ecma::top_level_imports(tree, source)
    }

    fn exports(&self, tree: &Tree, source: &str) -> Vec<Symbol> {
        ecma::exported_symbols(tree, source, DECLARATIONS)
    }
}
