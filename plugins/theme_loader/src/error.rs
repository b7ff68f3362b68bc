//! Error types for theme loading

use notes_pages::HostError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Invalid theme message: {0}")]
    Message(#[from] serde_json::Error),

    #[error("Invalid theme name: {0:?}")]
    InvalidName(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
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
}
