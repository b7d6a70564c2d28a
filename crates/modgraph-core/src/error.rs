//! Error types shared across the workspace

use std::path::PathBuf;

use thiserror::Error;

/// Startup configuration errors. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid path pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors raised before a traversal can start.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("expecting root argument")]
    MissingRootArgument,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
