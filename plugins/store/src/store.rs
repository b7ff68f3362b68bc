//! The key-path store

use crate::error::StoreError;
use crate::key_path;
use crate::readiness::{ReadyState, Readiness};
use crate::storage;
use notes_pages::PluginDirs;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// The loaded document and the file it came from
#[derive(Debug)]
struct Document {
    path: PathBuf,
    data: Value,
}

type DocumentSlot = Arc<Mutex<Option<Document>>>;

/// A JSON document persisted in the plugin data directory, addressed by key paths
///
/// The document is loaded lazily: [`new`](Self::new) only prepares the load
/// and does no I/O, so [`state`](Self::state) reports
/// [`ReadyState::NotStarted`] until the first [`fetch`](Self::fetch),
/// [`save`](Self::save) or [`init`](Self::init) drives it. Every
/// operation waits on the same readiness signal, so none of them observe the
/// document before it is loaded, and a failed load fails all of them until
/// [`init(true)`](Self::init) succeeds.
///
/// Reads return clones; callers never hold references into the document.
/// Every save rewrites the whole file. Saves mutate one shared in-memory
/// document and write-through is serialised, so the file always ends up
/// holding the latest document once concurrent saves complete.
///
/// # Example
///
/// ```ignore
/// use notes_pages::{AppName, LocalDirs};
/// use notes_pages_store::KeyPathStore;
/// use std::sync::Arc;
///
/// async fn remember_theme(theme: &str) -> Result<(), notes_pages_store::StoreError> {
///     let dirs = Arc::new(LocalDirs::from_app_name(&AppName::default()));
///     let store = KeyPathStore::new(dirs);
///     store.save(&["site", "theme"], theme).await
/// }
/// ```
pub struct KeyPathStore {
    dirs: Arc<dyn PluginDirs>,
    document: DocumentSlot,
    ready: Mutex<Readiness>,
    write_lock: tokio::sync::Mutex<()>,
}

impl KeyPathStore {
    /// Create a store whose backing file lives in `dirs`' data directory
    pub fn new(dirs: Arc<dyn PluginDirs>) -> Self {
        let document = DocumentSlot::default();
        let ready = Readiness::new(load(Arc::clone(&dirs), Arc::clone(&document)));

        Self {
            dirs,
            document,
            ready: Mutex::new(ready),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Re-resolve the backing file and reload the document
    ///
    /// With `overwrite_ready` this load becomes the store's readiness signal,
    /// which is how a store recovers from a failed load. Without it the
    /// current signal is kept and only the document is reloaded.
    pub async fn init(&self, overwrite_ready: bool) -> Result<(), StoreError> {
        let readiness = Readiness::new(load(Arc::clone(&self.dirs), Arc::clone(&self.document)));

        if overwrite_ready {
            *lock(&self.ready) = readiness.clone();
        }

        readiness.wait().await
    }

    pub fn state(&self) -> ReadyState {
        lock(&self.ready).state()
    }

    /// Backing file of the loaded document
    pub fn document_path(&self) -> Option<PathBuf> {
        lock(&self.document).as_ref().map(|doc| doc.path.clone())
    }

    /// Clone of the value at `path`
    ///
    /// Missing values, and explicit `null`s, are `None`.
    ///
    /// # Errors
    ///
    /// Fails only if the document could not be loaded.
    pub async fn fetch<S: AsRef<str>>(&self, path: &[S]) -> Result<Option<Value>, StoreError> {
        self.ready().await?;

        let slot = lock(&self.document);
        let document = slot.as_ref().ok_or(StoreError::NotLoaded)?;

        Ok(key_path::get(&document.data, path)
            .filter(|value| !value.is_null())
            .cloned())
    }

    /// Value at `path`, deserialized into `T`
    pub async fn fetch_as<T, S>(&self, path: &[S]) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
        S: AsRef<str>,
    {
        self.fetch(path)
            .await?
            .map(serde_json::from_value)
            .transpose()
            .map_err(StoreError::from)
    }

    /// Set `value` at `path` and write the whole document to disk
    ///
    /// Intermediate objects (or arrays, for index segments) are created as
    /// needed. The write is a plain rewrite of the file, not a transaction.
    ///
    /// # Errors
    ///
    /// Fails for the empty path, if `value` cannot be serialized, if the
    /// document could not be loaded, or if the file cannot be written.
    pub async fn save<S, V>(&self, path: &[S], value: &V) -> Result<(), StoreError>
    where
        S: AsRef<str>,
        V: Serialize + ?Sized,
    {
        if path.is_empty() {
            return Err(StoreError::EmptyPath);
        }
        let value = serde_json::to_value(value)?;

        self.ready().await?;
        let _write = self.write_lock.lock().await;

        let (file, contents) = {
            let mut slot = lock(&self.document);
            let document = slot.as_mut().ok_or(StoreError::NotLoaded)?;
            key_path::set(&mut document.data, path, value);
            (
                document.path.clone(),
                storage::render_document(&document.data)?,
            )
        };

        storage::write_document(&file, &contents).await?;
        debug!(key = %display_path(path), file = %file.display(), "saved store document");
        Ok(())
    }

    /// Raw bytes of the site icon
    ///
    /// Any failure, including a missing file, is reported as `None`.
    pub async fn fetch_icon(&self) -> Option<Vec<u8>> {
        let result = match self.icon_path().await {
            Ok(path) => storage::read_icon(&path).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(icon) => Some(icon),
            Err(e) => {
                debug!(error = %e, "no site icon");
                None
            }
        }
    }

    /// Write the site icon, or remove it when `icon` is `None`
    pub async fn save_icon(&self, icon: Option<&[u8]>) -> Result<(), StoreError> {
        let path = self.icon_path().await?;

        match icon {
            Some(bytes) => storage::write_icon(&path, bytes).await,
            None => storage::remove_icon(&path).await,
        }
    }

    async fn ready(&self) -> Result<(), StoreError> {
        let readiness = lock(&self.ready).clone();
        readiness.wait().await
    }

    async fn icon_path(&self) -> Result<PathBuf, StoreError> {
        let data_dir = self.dirs.data_dir().await?;
        Ok(storage::icon_path(&data_dir))
    }
}

impl fmt::Debug for KeyPathStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPathStore")
            .field("state", &self.state())
            .field("document_path", &self.document_path())
            .finish()
    }
}

async fn load(dirs: Arc<dyn PluginDirs>, slot: DocumentSlot) -> Result<(), StoreError> {
    let data_dir = dirs.data_dir().await?;
    let path = storage::document_path(&data_dir);
    let data = storage::load_document(&path).await?;

    debug!(file = %path.display(), "loaded store document");
    *lock(&slot) = Some(Document { path, data });
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn display_path<S: AsRef<str>>(path: &[S]) -> String {
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}
