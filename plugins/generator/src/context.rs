//! Shared handles passed to every generator helper

use notes_pages::{DataApi, PluginDirs, SettingsApi};
use notes_pages_store::KeyPathStore;
use notes_pages_theme_loader::ThemeFetcher;
use std::sync::Arc;

/// Everything the generator helpers need from the host and the plugin
///
/// Build one per plugin run and hand out clones; all handles are shared.
///
/// # Example
///
/// ```ignore
/// use notes_pages_generator::PublisherContext;
///
/// let ctx = PublisherContext::new(dirs, data_api, settings, themes);
/// let site = notes_pages_generator::site(&ctx).await?;
/// ```
#[derive(Clone)]
pub struct PublisherContext {
    pub store: Arc<KeyPathStore>,
    pub dirs: Arc<dyn PluginDirs>,
    pub data: Arc<dyn DataApi>,
    pub settings: Arc<dyn SettingsApi>,
    pub themes: Arc<dyn ThemeFetcher>,
}

impl PublisherContext {
    /// Create a context with a fresh store in `dirs`' data directory
    pub fn new(
        dirs: Arc<dyn PluginDirs>,
        data: Arc<dyn DataApi>,
        settings: Arc<dyn SettingsApi>,
        themes: Arc<dyn ThemeFetcher>,
    ) -> Self {
        let store = Arc::new(KeyPathStore::new(Arc::clone(&dirs)));
        Self::with_store(store, dirs, data, settings, themes)
    }

    /// Create a context around an existing store
    pub fn with_store(
        store: Arc<KeyPathStore>,
        dirs: Arc<dyn PluginDirs>,
        data: Arc<dyn DataApi>,
        settings: Arc<dyn SettingsApi>,
        themes: Arc<dyn ThemeFetcher>,
    ) -> Self {
        Self {
            store,
            dirs,
            data,
            settings,
            themes,
        }
    }
}
