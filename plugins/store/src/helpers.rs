//! Standalone helper functions for direct document access
//!
//! These functions read and write a `db.json` file without constructing a
//! [`KeyPathStore`](crate::KeyPathStore). Each call loads the file afresh,
//! so they suit scripts and command-line tools rather than plugin code that
//! issues many operations.

use crate::error::StoreError;
use crate::key_path;
use crate::storage::{load_document, modify_document};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// Read the value at `path`
///
/// # Returns
///
/// `Ok(None)` if nothing (or `null`) is stored there.
///
/// # Errors
///
/// Returns an error if the file cannot be loaded or the value cannot be
/// deserialized into `T`.
///
/// # Example
///
/// ```ignore
/// use notes_pages_store::read_value;
/// use std::path::Path;
///
/// async fn site_title(db: &Path) -> Option<String> {
///     read_value(db, &["site", "title"]).await.ok().flatten()
/// }
/// ```
pub async fn read_value<T, S>(file: &Path, path: &[S]) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: AsRef<str>,
{
    let document = load_document(file).await?;

    key_path::get(&document, path)
        .filter(|value| !value.is_null())
        .map(|value| serde_json::from_value(value.clone()))
        .transpose()
        .map_err(StoreError::from)
}

/// Write `value` at `path`, rewriting the whole file
///
/// # Errors
///
/// Returns an error for the empty path, if the value cannot be serialized,
/// or if the file cannot be loaded or written.
pub async fn write_value<T, S>(file: &Path, path: &[S], value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: AsRef<str>,
{
    if path.is_empty() {
        return Err(StoreError::EmptyPath);
    }
    let value = serde_json::to_value(value)?;

    modify_document(file, |document| key_path::set(document, path, value)).await?;
    Ok(())
}

/// Check whether a non-null value exists at `path`
pub async fn has_value<S: AsRef<str>>(file: &Path, path: &[S]) -> Result<bool, StoreError> {
    let document = load_document(file).await?;
    Ok(key_path::get(&document, path).is_some_and(|value| !value.is_null()))
}

/// Keys of the object at `path`; the empty path lists the top-level keys
///
/// Anything that is not an object yields an empty list.
pub async fn list_keys<S: AsRef<str>>(file: &Path, path: &[S]) -> Result<Vec<String>, StoreError> {
    let document = load_document(file).await?;
    Ok(key_path::keys(&document, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::document_path;
    use serde_json::json;

    #[tokio::test]
    async fn write_then_read_round_trips_through_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let db = document_path(dir.path());

        write_value(&db, &["site", "title"], "My notes").await.unwrap();
        write_value(&db, &["site", "language"], "en").await.unwrap();

        let title: Option<String> = read_value(&db, &["site", "title"]).await.unwrap();
        assert_eq!(title.as_deref(), Some("My notes"));

        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&db).unwrap()).unwrap();
        assert_eq!(on_disk, json!({ "site": { "title": "My notes", "language": "en" } }));
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let db = document_path(dir.path());
        let empty: [&str; 0] = [];

        let value: Option<String> = read_value(&db, &["site"]).await.unwrap();
        assert_eq!(value, None);
        assert!(!has_value(&db, &["site"]).await.unwrap());
        assert!(list_keys(&db, &empty).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_and_has_reflect_contents() {
        let dir = tempfile::tempdir().unwrap();
        let db = document_path(dir.path());

        write_value(&db, &["pagesFieldVars", "default"], &json!({}))
            .await
            .unwrap();
        write_value(&db, &["pagesFieldVars", "dark"], &json!({ "home": {} }))
            .await
            .unwrap();

        assert!(has_value(&db, &["pagesFieldVars", "dark", "home"]).await.unwrap());

        let mut themes = list_keys(&db, &["pagesFieldVars"]).await.unwrap();
        themes.sort();
        assert_eq!(themes, vec!["dark", "default"]);
    }

    #[tokio::test]
    async fn empty_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let empty: [&str; 0] = [];

        let err = write_value(&document_path(dir.path()), &empty, &1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmptyPath));
    }
}
