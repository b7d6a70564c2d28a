//! Tree-sitter parser wrapper
//!
//! Traversal is single-threaded, so one `Parser` is reused for every file and
//! only switches grammar when the file type changes.

use std::path::Path;

use modgraph_core::Language as SourceLanguage;
use tree_sitter::{Language, Parser, Tree};

use crate::error::IndexError;

/// Grammars the indexer can parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    TypeScript,
    Tsx,
    JavaScript,
}

impl FileType {
    /// Determine file type from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match SourceLanguage::from_path(path) {
            SourceLanguage::TypeScript => Some(FileType::TypeScript),
            SourceLanguage::Tsx => Some(FileType::Tsx),
            SourceLanguage::JavaScript => Some(FileType::JavaScript),
            SourceLanguage::Other => None,
        }
    }

    /// Get the tree-sitter language for this file type
    pub fn get_language(&self) -> Language {
        match self {
            FileType::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            FileType::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            FileType::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

pub struct SourceParser {
    parser: Parser,
    current: Option<FileType>,
}

impl SourceParser {
    pub fn new() -> Self {
        SourceParser {
            parser: Parser::new(),
            current: None,
        }
    }

    /// Parse `source`, which was read from `path`.
    ///
    /// A tree containing syntax errors is still returned; callers decide
    /// whether to trust it.
    pub fn parse(&mut self, path: &Path, source: &str) -> Result<(FileType, Tree), IndexError> {
        let file_type = FileType::from_path(path).ok_or_else(|| IndexError::UnsupportedFile {
            path: path.to_path_buf(),
        })?;

        if self.current != Some(file_type) {
            self.parser
                .set_language(&file_type.get_language())
                .map_err(|e| {
                    tracing::error!("Failed to set {:?} grammar: {}", file_type, e);
                    IndexError::UnsupportedFile {
                        path: path.to_path_buf(),
                    }
                })?;
            self.current = Some(file_type);
        }

        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| IndexError::MalformedSource {
                path: path.to_path_buf(),
            })?;
        Ok((file_type, tree))
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
