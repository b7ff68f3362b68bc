//! Theme loader for the notes_pages plugins
//!
//! Plugin code asks for theme configuration by posting messages over the
//! webview bridge; the webview side reads it from the theme directories.
//! Both halves live here: [`BridgeThemeFetcher`] for the plugin and
//! [`ThemeDirectory`] with [`serve_theme_requests`] for the responder.
//!
//! # Example
//!
//! ```ignore
//! use notes_pages::{AppName, LocalDirs, bridge};
//! use notes_pages_theme_loader::{BridgeThemeFetcher, ThemeDirectory, ThemeFetcher, serve_theme_requests};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let dirs = Arc::new(LocalDirs::from_app_name(&AppName::default()));
//!     let (bridge, requests) = bridge::channel();
//!     tokio::spawn(serve_theme_requests(requests, ThemeDirectory::new(dirs)));
//!
//!     let themes = BridgeThemeFetcher::new(bridge);
//!     for theme in themes.fetch_all().await.unwrap() {
//!         println!("{}", theme.name);
//!     }
//! }
//! ```

mod directory;
mod error;
mod fetcher;
mod messages;
mod theme;

pub use directory::{THEME_CONFIG_FILE, ThemeDirectory, serve_theme_requests, theme_dir};
pub use error::ThemeError;
pub use fetcher::{BridgeThemeFetcher, ThemeFetcher};
pub use messages::ThemeRequest;
pub use theme::{DEFAULT_THEME_NAME, Field, Theme};
