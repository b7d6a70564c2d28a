//! Traversal-time errors. None of these abort a build.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("cannot resolve `{specifier}` imported from {}", .from.display())]
    UnresolvedImport { specifier: String, from: PathBuf },

    #[error("cannot read {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax errors in {}", .path.display())]
    MalformedSource { path: PathBuf },

    #[error("no parser for {}", .path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("invalid project manifest {}: {source}", .path.display())]
    TsConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
