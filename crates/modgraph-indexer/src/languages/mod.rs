//! Language extractors for the supported source dialects

pub mod ecma;
pub mod javascript;
pub mod typescript;

use crate::extractor::LanguageExtractor;
use crate::parser::FileType;

/// Get the appropriate extractor for a parsed file
pub fn get_extractor(file_type: FileType) -> &'static dyn LanguageExtractor {
    match file_type {
        FileType::TypeScript | FileType::Tsx => &typescript::TypeScriptExtractor,
        FileType::JavaScript => &javascript::JavaScriptExtractor,
    }
}
