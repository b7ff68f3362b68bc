//! Host seams for the notes_pages publisher plugins
//!
//! The note-taking host hands every plugin a small set of services: a
//! data directory, a settings store, a data API for notes and resources,
//! and a message bridge to the webview. This crate defines those services
//! as traits so each plugin crate can be written, and tested, against them
//! without a running host.
//!
//! # Example
//!
//! ```ignore
//! use notes_pages::{AppName, LocalDirs, PluginDirs};
//!
//! async fn locate_db() -> std::path::PathBuf {
//!     let dirs = LocalDirs::from_app_name(&AppName::default());
//!     dirs.data_dir().await.unwrap().join("db.json")
//! }
//! ```

mod app_name;
pub mod bridge;
mod data;
mod dirs;
mod error;
pub mod logging;
mod settings;

pub use app_name::AppName;
pub use bridge::{BridgeRequest, ChannelBridge, WebviewBridge};
pub use data::{DataApi, DataQuery, Page, fetch_all_data, fetch_data};
pub use dirs::{DATA_DIR_ENV, LocalDirs, PluginDirs, is_entry_name};
pub use error::HostError;
pub use settings::{SettingsApi, StaticSettings};
