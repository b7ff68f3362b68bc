//! Messages sent over the webview bridge to load theme configuration

use serde::{Deserialize, Serialize};

/// Requests understood by the webview side, tagged by `event`
///
/// # Example
///
/// ```
/// use notes_pages_theme_loader::ThemeRequest;
/// use serde_json::json;
///
/// let request = ThemeRequest::load("dark");
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     json!({ "event": "loadThemeConfig", "themeName": "dark" })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ThemeRequest {
    /// Configuration of one theme; answered with the theme or `null`
    #[serde(rename_all = "camelCase")]
    LoadThemeConfig { theme_name: String },
    /// Configuration of every available theme; answered with a list
    LoadThemeConfigs,
}

impl ThemeRequest {
    pub fn load(theme_name: impl Into<String>) -> Self {
        Self::LoadThemeConfig {
            theme_name: theme_name.into(),
        }
    }

    pub fn load_all() -> Self {
        Self::LoadThemeConfigs
    }
}
