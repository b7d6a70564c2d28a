//! Core data structures for the module graph

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Discriminates what kind of exported declaration a symbol represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolKind {
    /// `const`, `let` and `var` declarators.
    Variable,
    /// Function declarations, including generators and ambient `declare function`.
    Function,
    /// Interfaces, type aliases, enums and classes.
    TypeLike,
}

impl SymbolKind {
    /// All kinds, in the order their fields appear in a rendered record.
    pub const ALL: [SymbolKind; 3] = [SymbolKind::Variable, SymbolKind::Function, SymbolKind::TypeLike];
}

/// One exported top-level declaration of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Declaration text with any function or class body elided.
    pub rendered_signature: String,
    /// Text of the `/** ... */` comment directly above the declaration.
    pub documentation: Option<String>,
}

/// A single analyzed source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    /// Absolute, canonicalized path. Unique per node.
    pub path: PathBuf,
    /// Path relative to the project root, e.g. `./src/index.ts`.
    pub short_path: String,
    pub exported_symbols: Vec<Symbol>,
}

impl FileNode {
    pub fn new(path: PathBuf, short_path: String) -> Self {
        FileNode {
            path,
            short_path,
            exported_symbols: Vec::new(),
        }
    }

    /// Exported symbols of one kind, in declaration order.
    pub fn symbols_of_kind(&self, kind: SymbolKind) -> impl Iterator<Item = &Symbol> {
        self.exported_symbols.iter().filter(move |s| s.kind == kind)
    }
}

/// A directed "imports" relationship between two short paths.
///
/// Ordering is lexicographic on `(from, to)`, which is the order edges are printed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn is_self_edge(&self) -> bool {
        self.from == self.to
    }
}

/// Source dialects understood by the indexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    TypeScript,
    Tsx,
    JavaScript,
    Other,
}

impl Language {
    /// Detect language from file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ts") | Some("mts") | Some("cts") => Language::TypeScript,
            Some("tsx") => Language::Tsx,
            Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => Language::JavaScript,
            _ => Language::Other,
        }
    }

    pub fn is_source(&self) -> bool {
        !matches!(self, Language::Other)
    }
}
