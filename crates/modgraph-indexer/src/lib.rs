//! Source parsing, module resolution and graph construction

pub mod error;
pub mod extractor;
pub mod languages;
pub mod parser;
pub mod resolver;
pub mod tsconfig;
pub mod walker;


pub use error::IndexError;
pub use extractor::LanguageExtractor;
pub use parser::{FileType, SourceParser};
pub use resolver::{ModuleResolver, NodeResolver, Resolution};
pub use tsconfig::{DEFAULT_EXTENSIONS, PathAlias, ResolutionConfig, TsConfig};
pub use walker::{BuildResult, GraphWalker};
