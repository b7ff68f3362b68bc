//! Key-path store for the notes_pages plugins
//!
//! Plugin configuration and generated-site metadata live in one JSON
//! document, `db.json`, in the plugin data directory. Values are addressed
//! by key paths such as `["site"]` or `["pagesFieldVars", theme]`.
//!
//! # Features
//!
//! - Lazy load behind a shared readiness signal
//! - Deep get/set with automatic intermediate containers
//! - Clone-isolated reads
//! - Write-through to disk on every save
//! - A separate site icon file (`favicon.ico`)
//! - Standalone helpers for one-shot access from scripts
//!
//! # Example
//!
//! ```ignore
//! use notes_pages::{AppName, LocalDirs};
//! use notes_pages_store::KeyPathStore;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), notes_pages_store::StoreError> {
//!     let dirs = Arc::new(LocalDirs::from_app_name(&AppName::default()));
//!     let store = KeyPathStore::new(dirs);
//!
//!     store.save(&["site"], &json!({ "title": "My notes" })).await?;
//!     let title = store.fetch(&["site", "title"]).await?;
//!     assert_eq!(title, Some(json!("My notes")));
//!     Ok(())
//! }
//! ```

mod error;
mod helpers;
pub mod key_path;
mod readiness;
pub mod storage;
mod store;

pub use error::StoreError;
pub use helpers::{has_value, list_keys, read_value, write_value};
pub use readiness::ReadyState;
pub use store::KeyPathStore;
