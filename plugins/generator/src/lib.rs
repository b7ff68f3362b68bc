//! Site generation helpers for the notes_pages publisher
//!
//! Shapes what the key-path store holds into the data a renderer needs,
//! and copies theme assets and note resources into the output directory.
//! Every helper takes a [`PublisherContext`] carrying the store and the
//! host services, so nothing here reaches for global state.
//!
//! Output layout under `<data>/output`:
//!
//! - `_assets/`: the theme's `_assets` directory
//! - `_resources/<id>.<ext>`: note attachments
//! - `_markdownPluginAssets/<name>`: renderer plugin assets

mod context;
mod error;
mod markdown;
mod output;
mod site;

pub use context::PublisherContext;
pub use error::GeneratorError;
pub use markdown::{
    AUDIO_PLAYER_PLUGIN, MARKDOWN_PLUGINS, PDF_VIEWER_PLUGIN, PLUGIN_SETTING_PREFIX,
    VIDEO_PLAYER_PLUGIN, markdown_settings,
};
pub use output::{
    FETCH_STATUS_DONE, LocalState, RESOURCE_FIELDS, Resource, ResourceEntry, ResourceItem,
    ResourceMap, all_resources, copy_assets, copy_markdown_plugin_assets, output_dir,
    output_resources,
};
pub use site::{
    ARTICLES_KEY, PAGES_FIELD_VARS_KEY, SITE_KEY, ThemeData, deep_merge, site, theme_data,
};
