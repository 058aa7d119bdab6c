use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O failed on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}", path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Array file {}: {message}", path.display())]
    Npy { path: PathBuf, message: String },

    /// The chunks, embedding matrix and vocabulary of an index disagree.
    #[error("Index integrity violation: {0}")]
    Integrity(String),
}

impl Error {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.to_path_buf(), source }
    }

    pub fn serialization(path: &Path, source: serde_json::Error) -> Self {
        Self::Serialization { path: path.to_path_buf(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
