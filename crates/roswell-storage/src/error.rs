//! Storage error types.

use std::path::PathBuf;

use roswell_commerce::gateway::GatewayError;
use thiserror::Error;

/// Errors that can occur in the file-backed gateway.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading or writing a file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The products file is not valid JSON.
    #[error("Corrupt products file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An image name that would escape the images directory.
    #[error("Invalid image name: {0}")]
    InvalidName(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<StorageError> for GatewayError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Corrupt { .. } => GatewayError::InvalidRecord(e.to_string()),
            _ => GatewayError::Storage(e.to_string()),
        }
    }
}
