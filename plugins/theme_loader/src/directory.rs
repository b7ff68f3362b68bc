//! Webview side of the bridge: themes read from the plugin directories

use crate::error::ThemeError;
use crate::messages::ThemeRequest;
use crate::theme::{DEFAULT_THEME_NAME, Theme};
use notes_pages::{BridgeRequest, PluginDirs, is_entry_name};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// Configuration file inside every theme directory
pub const THEME_CONFIG_FILE: &str = "config.json";

/// Directory holding a theme
///
/// The default theme ships with the plugin under
/// `<installation>/assets/defaultTheme`; installed themes live in
/// `<data>/themes/<name>`.
pub async fn theme_dir(dirs: &dyn PluginDirs, theme_name: &str) -> Result<PathBuf, ThemeError> {
    if theme_name == DEFAULT_THEME_NAME {
        return Ok(dirs
            .installation_dir()
            .await?
            .join("assets")
            .join("defaultTheme"));
    }

    if !is_entry_name(theme_name) {
        return Err(ThemeError::InvalidName(theme_name.to_string()));
    }

    Ok(themes_root(dirs).await?.join(theme_name))
}

async fn themes_root(dirs: &dyn PluginDirs) -> Result<PathBuf, ThemeError> {
    Ok(dirs.data_dir().await?.join("themes"))
}

/// Loads theme configuration from the theme directories
#[derive(Clone)]
pub struct ThemeDirectory {
    dirs: Arc<dyn PluginDirs>,
}

impl ThemeDirectory {
    pub fn new(dirs: Arc<dyn PluginDirs>) -> Self {
        Self { dirs }
    }

    /// Configuration of `theme_name`, or `None` if it has no config file
    ///
    /// A config without a `name` takes the requested one.
    pub async fn load(&self, theme_name: &str) -> Result<Option<Theme>, ThemeError> {
        let path = theme_dir(self.dirs.as_ref(), theme_name)
            .await?
            .join(THEME_CONFIG_FILE);

        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(theme = theme_name, "theme has no config");
                return Ok(None);
            }
            Err(source) => return Err(ThemeError::Read { path, source }),
        };

        let mut theme: Theme = serde_json::from_str(&contents)
            .map_err(|source| ThemeError::Parse { path, source })?;

        if theme.name.is_empty() {
            theme.name = theme_name.to_string();
        }

        Ok(Some(theme))
    }

    /// The default theme followed by installed themes in name order
    ///
    /// Installed themes that fail to load are skipped with a warning.
    pub async fn load_all(&self) -> Result<Vec<Theme>, ThemeError> {
        let mut themes = Vec::new();

        if let Some(theme) = self.load(DEFAULT_THEME_NAME).await? {
            themes.push(theme);
        }

        for name in self.installed_names().await? {
            match self.load(&name).await {
                Ok(Some(theme)) => themes.push(theme),
                Ok(None) => {}
                Err(e) => warn!(theme = %name, error = %e, "skipping theme"),
            }
        }

        Ok(themes)
    }

    /// Answer one bridge request
    pub async fn respond(&self, request: ThemeRequest) -> Result<Value, ThemeError> {
        let reply = match request {
            ThemeRequest::LoadThemeConfig { theme_name } => {
                serde_json::to_value(self.load(&theme_name).await?)?
            }
            ThemeRequest::LoadThemeConfigs => serde_json::to_value(self.load_all().await?)?,
        };

        Ok(reply)
    }

    async fn installed_names(&self) -> Result<Vec<String>, ThemeError> {
        let root = themes_root(self.dirs.as_ref()).await?;

        let mut entries = match fs::read_dir(&root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(read_error(&root, source)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| read_error(&root, source))?
        {
            let is_dir = entry
                .file_type()
                .await
                .map_err(|source| read_error(&entry.path(), source))?
                .is_dir();

            if let Some(name) = entry.file_name().to_str()
                && is_dir
                && name != DEFAULT_THEME_NAME
            {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

fn read_error(path: &Path, source: std::io::Error) -> ThemeError {
    ThemeError::Read {
        path: path.to_path_buf(),
        source,
    }
}

/// Answer theme requests arriving over an in-process bridge
///
/// Runs until every [`ChannelBridge`](notes_pages::ChannelBridge) feeding
/// `requests` is dropped. Messages that are not theme requests get an
/// error reply.
pub async fn serve_theme_requests(
    mut requests: UnboundedReceiver<BridgeRequest>,
    directory: ThemeDirectory,
) {
    while let Some(request) = requests.recv().await {
        let response = match serde_json::from_value::<ThemeRequest>(request.payload.clone()) {
            Ok(theme_request) => directory
                .respond(theme_request)
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(format!("Unsupported bridge message: {}", e)),
        };

        request.respond(response);
    }

    debug!("theme bridge closed");
}
