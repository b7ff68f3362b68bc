//! Error types for site generation helpers

use notes_pages::HostError;
use notes_pages_store::StoreError;
use notes_pages_theme_loader::ThemeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Theme(#[from] ThemeError),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("No site info in db.json")]
    MissingSite,

    #[error("Site info in db.json is not an object")]
    InvalidSite,

    #[error("Failed to load theme config: {0}")]
    ThemeNotFound(String),

    #[error("Invalid markdown plugin asset name: {0:?}")]
    InvalidAssetName(String),

    #[error("Failed to copy {} to {}: {source}", src.display(), dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
