//! Host markdown plugin settings

use crate::error::GeneratorError;
use futures_util::future::try_join_all;
use notes_pages::SettingsApi;
use serde_json::{Map, Value};

/// Prefix of the host's markdown plugin toggles
pub const PLUGIN_SETTING_PREFIX: &str = "markdown.plugin.";

pub const AUDIO_PLAYER_PLUGIN: &str = "audioPlayer";
pub const VIDEO_PLAYER_PLUGIN: &str = "videoPlayer";
pub const PDF_VIEWER_PLUGIN: &str = "pdfViewer";

/// Markdown plugins the host can toggle
pub const MARKDOWN_PLUGINS: [&str; 19] = [
    "softbreaks",
    "typographer",
    "linkify",
    "katex",
    "fountain",
    "mermaid",
    AUDIO_PLAYER_PLUGIN,
    VIDEO_PLAYER_PLUGIN,
    PDF_VIEWER_PLUGIN,
    "mark",
    "footnote",
    "toc",
    "sub",
    "sup",
    "deflist",
    "abbr",
    "emoji",
    "insert",
    "multitable",
];

/// Renderer options for every markdown plugin enabled in the host
///
/// Each enabled plugin maps to an empty options object; disabled ones are
/// left out.
pub async fn markdown_settings(
    settings: &dyn SettingsApi,
) -> Result<Map<String, Value>, GeneratorError> {
    let flags = try_join_all(MARKDOWN_PLUGINS.iter().map(|&name| async move {
        let key = format!("{}{}", PLUGIN_SETTING_PREFIX, name);
        settings.global_flag(&key).await.map(|enabled| (name, enabled))
    }))
    .await?;

    Ok(flags
        .into_iter()
        .filter(|&(_, enabled)| enabled)
        .map(|(name, _)| (name.to_string(), Value::Object(Map::new())))
        .collect())
}
