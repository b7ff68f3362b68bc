//! Application identity used to resolve platform directories

use directories::ProjectDirs;
use std::fmt;

/// Identifies the plugin installation on the local machine
///
/// Platform directories follow the [XDG Base Directory Specification](https://specifications.freedesktop.org/basedir-spec/basedir-spec-latest.html)
/// on Linux and the usual conventions on macOS and Windows.
///
/// # Example
///
/// ```
/// use notes_pages::AppName;
///
/// let app_name = AppName::new("org", "notes", "pages");
/// assert_eq!(app_name.to_string(), "org.notes.pages");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppName {
    pub qualifier: String,
    pub organization: String,
    pub application: String,
}

impl AppName {
    /// Create a new application name
    ///
    /// # Arguments
    ///
    /// * `qualifier` - Typically a reverse domain name (e.g., "com", "org")
    /// * `organization` - The publishing organization or username
    /// * `application` - The plugin name (e.g., "pages")
    pub fn new(
        qualifier: impl Into<String>,
        organization: impl Into<String>,
        application: impl Into<String>,
    ) -> Self {
        Self {
            qualifier: qualifier.into(),
            organization: organization.into(),
            application: application.into(),
        }
    }

    /// Platform directories for this application, if a home directory exists
    pub fn project_dirs(&self) -> Option<ProjectDirs> {
        ProjectDirs::from(
            self.qualifier.as_str(),
            self.organization.as_str(),
            self.application.as_str(),
        )
    }
}

impl Default for AppName {
    fn default() -> Self {
        Self::new("org", "notes", "pages")
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.qualifier, self.organization, self.application
        )
    }
}
