//! Typed errors for tree sources and the config file.
//!
//! The binary edge wraps these in `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid tree document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("directory `{name}` cannot carry content or a language")]
    DirectoryWithPayload { name: String },

    #[error("file `{name}` cannot have children")]
    FileWithChildren { name: String },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialise config: {0}")]
    Serialise(#[from] toml::ser::Error),
}
