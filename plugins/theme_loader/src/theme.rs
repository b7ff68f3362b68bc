//! Theme configuration as the webview side reports it

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the theme bundled with the plugin
pub const DEFAULT_THEME_NAME: &str = "default";

/// A theme's configuration
///
/// Only the parts the publisher reads are typed; every other key is kept
/// in `extra` and written back unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    #[serde(default)]
    pub name: String,

    /// Editable fields of each page, keyed by page name
    #[serde(default)]
    pub pages: BTreeMap<String, Vec<Field>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A user-editable variable on a theme page
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Field {
    /// Value a page starts with before the user edits it (`""` if unset)
    pub fn initial_value(&self) -> Value {
        self.default_value
            .clone()
            .unwrap_or_else(|| Value::String(String::new()))
    }
}
