//! Plugin directory resolution

use crate::app_name::AppName;
use crate::error::HostError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable overriding the plugin data directory
pub const DATA_DIR_ENV: &str = "NOTES_PAGES_DATA_DIR";

/// Directories the host hands to a plugin
///
/// The host may relocate these between runs, so callers resolve them
/// on demand instead of caching the result.
#[async_trait]
pub trait PluginDirs: Send + Sync {
    /// Writable directory owned by the plugin (`db.json`, themes, output)
    async fn data_dir(&self) -> Result<PathBuf, HostError>;

    /// Read-only directory the plugin was installed into (bundled assets)
    async fn installation_dir(&self) -> Result<PathBuf, HostError>;
}

/// Fixed local directories, used when running outside a host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalDirs {
    data_dir: PathBuf,
    installation_dir: PathBuf,
}

impl LocalDirs {
    pub fn new(data_dir: impl Into<PathBuf>, installation_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            installation_dir: installation_dir.into(),
        }
    }

    /// Resolve directories for an application
    ///
    /// Uses platform-specific conventions unless [`DATA_DIR_ENV`] is set:
    /// - Linux: `$XDG_DATA_HOME/<app>` or `~/.local/share/<app>`
    /// - macOS: `~/Library/Application Support/<app>`
    /// - Windows: `%LOCALAPPDATA%\<app>\data`
    ///
    /// The installation directory is the one holding the running executable.
    pub fn from_app_name(app_name: &AppName) -> Self {
        let data_dir = resolve_data_dir(app_name, std::env::var_os(DATA_DIR_ENV));
        let installation_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| PathBuf::from("."));

        Self::new(data_dir, installation_dir)
    }

    #[must_use]
    pub fn with_installation_dir(mut self, installation_dir: impl Into<PathBuf>) -> Self {
        self.installation_dir = installation_dir.into();
        self
    }
}

/// Whether `name` can be joined onto a plugin directory as a single entry
///
/// Rejects the empty name, `.` and `..`, and anything with a path separator.
pub fn is_entry_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\\')
}

fn resolve_data_dir(app_name: &AppName, env_override: Option<OsString>) -> PathBuf {
    if let Some(dir) = env_override.filter(|dir| !dir.is_empty()) {
        return PathBuf::from(dir);
    }

    app_name
        .project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[async_trait]
impl PluginDirs for LocalDirs {
    async fn data_dir(&self) -> Result<PathBuf, HostError> {
        Ok(self.data_dir.clone())
    }

    async fn installation_dir(&self) -> Result<PathBuf, HostError> {
        Ok(self.installation_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let dir = resolve_data_dir(&AppName::default(), Some(OsString::from("/tmp/pages")));
        assert_eq!(dir, PathBuf::from("/tmp/pages"));
    }

    #[test]
    fn empty_override_is_ignored() {
        let dir = resolve_data_dir(&AppName::default(), Some(OsString::new()));
        assert_ne!(dir, PathBuf::new());
    }

    #[test]
    fn entry_names_stay_inside_their_directory() {
        assert!(is_entry_name("katex"));
        assert!(is_entry_name("highlight.css"));
        for name in ["", ".", "..", "../secrets", "a/b", "a\\b"] {
            assert!(!is_entry_name(name), "accepted {:?}", name);
        }
    }

    #[tokio::test]
    async fn local_dirs_report_configured_paths() {
        let dirs = LocalDirs::new("/data", "/install").with_installation_dir("/opt/pages");
        assert_eq!(dirs.data_dir().await.unwrap(), PathBuf::from("/data"));
        assert_eq!(
            dirs.installation_dir().await.unwrap(),
            PathBuf::from("/opt/pages")
        );
    }
}
