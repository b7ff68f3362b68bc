//! Error types for the key-path store

use notes_pages::HostError;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to resolve plugin data directory: {0}")]
    Host(#[from] HostError),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document root in {} is not an object", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("Failed to convert value: {0}")]
    Value(#[from] serde_json::Error),

    #[error("Key path must not be empty")]
    EmptyPath,

    #[error("Store document is not loaded")]
    NotLoaded,

    #[error("Store failed to load: {0}")]
    Load(#[source] Arc<StoreError>),
}
