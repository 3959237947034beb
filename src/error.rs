//! Errors raised at the I/O edges.
//!
//! The locator itself never fails; these cover reading inputs, parsing
//! JSON/YAML and writing outputs.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error("Input directory not found: {0}")]
    MissingInput(PathBuf),

    #[error("Invalid value for '{key}': {message}")]
    Config { key: String, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
