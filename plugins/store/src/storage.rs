//! Storage operations for persisting the document and icon to disk

use crate::error::StoreError;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File name of the JSON document inside the plugin data directory
pub const DOCUMENT_FILE: &str = "db.json";

/// File name of the site icon inside the plugin data directory
pub const ICON_FILE: &str = "favicon.ico";

pub fn document_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DOCUMENT_FILE)
}

pub fn icon_path(data_dir: &Path) -> PathBuf {
    data_dir.join(ICON_FILE)
}

/// Load the document from disk
///
/// Returns an empty object if the file doesn't exist or is blank.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if its root
/// is not a JSON object.
pub async fn load_document(path: &Path) -> Result<Value, StoreError> {
    let contents = match fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(empty_document()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if contents.trim().is_empty() {
        return Ok(empty_document());
    }

    let document: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !document.is_object() {
        return Err(StoreError::InvalidRoot {
            path: path.to_path_buf(),
        });
    }

    Ok(document)
}

/// Render the document the way it is written to disk
pub fn render_document(document: &Value) -> Result<String, StoreError> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Write rendered document contents to disk
///
/// Creates the data directory if it doesn't exist. The whole file is
/// rewritten on every call.
pub async fn write_document(path: &Path, contents: &str) -> Result<(), StoreError> {
    write_bytes(path, contents.as_bytes()).await
}

/// Load a document, apply `modifier`, and write it back if it reports a change
///
/// Returns whether the document was modified.
pub async fn modify_document<F>(path: &Path, modifier: F) -> Result<bool, StoreError>
where
    F: FnOnce(&mut Value) -> bool,
{
    let mut document = load_document(path).await?;
    let modified = modifier(&mut document);

    if modified {
        write_document(path, &render_document(&document)?).await?;
    }

    Ok(modified)
}

pub async fn read_icon(path: &Path) -> Result<Vec<u8>, StoreError> {
    fs::read(path).await.map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub async fn write_icon(path: &Path, icon: &[u8]) -> Result<(), StoreError> {
    write_bytes(path, icon).await
}

/// Remove the icon file; a missing file is not an error
pub async fn remove_icon(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        }),
    }
}

async fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
    }

    fs::write(path, bytes)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn empty_document() -> Value {
    Value::Object(Map::new())
}
