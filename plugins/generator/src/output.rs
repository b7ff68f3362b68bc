//! Copying theme assets and note resources into the output directory

use crate::context::PublisherContext;
use crate::error::GeneratorError;
use notes_pages::{DataQuery, fetch_all_data, is_entry_name};
use notes_pages_theme_loader::theme_dir;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// Fields requested for every resource
pub const RESOURCE_FIELDS: &str = "id,mime,file_extension,encryption_applied,encryption_blob_encrypted";

/// `fetch_status` the renderer expects for resources available locally
pub const FETCH_STATUS_DONE: u8 = 2;

/// A resource as the host data API reports it
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(default)]
    pub mime: String,
    #[serde(default)]
    pub file_extension: String,
    #[serde(default)]
    pub encryption_applied: i64,
    #[serde(default)]
    pub encryption_blob_encrypted: i64,
}

/// Resource details in the shape the markdown renderer consumes
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEntry {
    pub extension: String,
    pub item: ResourceItem,
    pub local_state: LocalState,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResourceItem {
    pub id: String,
    pub mime: String,
    pub encryption_applied: i64,
    pub encryption_blob_encrypted: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocalState {
    pub fetch_status: u8,
}

/// Resources keyed by id
pub type ResourceMap = HashMap<String, ResourceEntry>;

impl From<Resource> for ResourceEntry {
    fn from(resource: Resource) -> Self {
        Self {
            extension: resource.file_extension,
            item: ResourceItem {
                id: resource.id,
                mime: resource.mime,
                encryption_applied: resource.encryption_applied,
                encryption_blob_encrypted: resource.encryption_blob_encrypted,
            },
            local_state: LocalState {
                fetch_status: FETCH_STATUS_DONE,
            },
        }
    }
}

/// Directory the site is generated into
pub async fn output_dir(ctx: &PublisherContext) -> Result<PathBuf, GeneratorError> {
    Ok(ctx.dirs.data_dir().await?.join("output"))
}

/// Copy a theme's `_assets` directory into `<output>/_assets`
pub async fn copy_assets(ctx: &PublisherContext, theme_name: &str) -> Result<(), GeneratorError> {
    let assets = theme_dir(ctx.dirs.as_ref(), theme_name).await?.join("_assets");
    let target = output_dir(ctx).await?.join("_assets");

    copy_dir(&assets, &target).await
}

/// Copy the named markdown plugin assets bundled with the plugin
///
/// Each name is copied from `<installation>/assets/markdownPluginAssets`
/// into `<output>/_markdownPluginAssets`. Names must be single directory
/// entries; all of them are checked before anything is copied.
pub async fn copy_markdown_plugin_assets<S: AsRef<str>>(
    ctx: &PublisherContext,
    names: &[S],
) -> Result<(), GeneratorError> {
    let bundled = ctx
        .dirs
        .installation_dir()
        .await?
        .join("assets")
        .join("markdownPluginAssets");
    let target = output_dir(ctx).await?.join("_markdownPluginAssets");

    if let Some(name) = names
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .find(|name| !is_entry_name(name))
    {
        return Err(GeneratorError::InvalidAssetName(name.to_string()));
    }

    for name in names {
        let name = name.as_ref();
        copy_path(&bundled.join(name), &target.join(name)).await?;
    }

    Ok(())
}

/// Every resource known to the host, keyed by id
pub async fn all_resources(ctx: &PublisherContext) -> Result<ResourceMap, GeneratorError> {
    let resources: Vec<Resource> = fetch_all_data(
        ctx.data.as_ref(),
        &["resources"],
        DataQuery::new().fields(RESOURCE_FIELDS),
    )
    .await?;

    Ok(resources
        .into_iter()
        .map(|resource| (resource.id.clone(), ResourceEntry::from(resource)))
        .collect())
}

/// Write the file of every listed resource to `<output>/_resources/<id>.<ext>`
///
/// Ids missing from `resources`, and resources whose file cannot be fetched
/// or written, are skipped with a warning. Returns how many files were written.
pub async fn output_resources<S: AsRef<str>>(
    ctx: &PublisherContext,
    resource_ids: &[S],
    resources: &ResourceMap,
) -> Result<usize, GeneratorError> {
    let target = output_dir(ctx).await?.join("_resources");
    let mut written = 0;

    for id in resource_ids {
        let id = id.as_ref();
        let Some(entry) = resources.get(id) else {
            warn!(resource = id, "unknown resource, skipping");
            continue;
        };

        let path = target.join(resource_file_name(&entry.item.id, &entry.extension));
        let result = match ctx.data.get_file(&entry.item.id).await {
            Ok(body) => write_file(&path, &body).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => written += 1,
            Err(e) => warn!(resource = id, error = %e, "failed to output resource file"),
        }
    }

    debug!(written, requested = resource_ids.len(), "output resources");
    Ok(written)
}

/// `<id>.<extension>`, the name rendered pages link to
///
/// The dot stays when the extension is empty.
fn resource_file_name(id: &str, extension: &str) -> String {
    format!("{}.{}", id, extension)
}

async fn write_file(path: &Path, bytes: &[u8]) -> Result<(), GeneratorError> {
    let write_error = |source| GeneratorError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    fs::write(path, bytes).await.map_err(write_error)
}

/// Copy a file, or a directory recursively, overwriting existing files
async fn copy_path(src: &Path, dst: &Path) -> Result<(), GeneratorError> {
    let metadata = fs::metadata(src)
        .await
        .map_err(|source| copy_error(src, dst, source))?;

    if metadata.is_dir() {
        return copy_dir(src, dst).await;
    }

    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|source| copy_error(src, dst, source))?;
    }
    fs::copy(src, dst)
        .await
        .map_err(|source| copy_error(src, dst, source))?;
    Ok(())
}

async fn copy_dir(src: &Path, dst: &Path) -> Result<(), GeneratorError> {
    let mut pending = vec![(src.to_path_buf(), dst.to_path_buf())];

    while let Some((from, to)) = pending.pop() {
        let mut entries = fs::read_dir(&from)
            .await
            .map_err(|source| copy_error(&from, &to, source))?;

        fs::create_dir_all(&to)
            .await
            .map_err(|source| copy_error(&from, &to, source))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| copy_error(&from, &to, source))?
        {
            let entry_src = entry.path();
            let entry_dst = to.join(entry.file_name());
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| copy_error(&entry_src, &entry_dst, source))?;

            if file_type.is_dir() {
                pending.push((entry_src, entry_dst));
            } else {
                fs::copy(&entry_src, &entry_dst)
                    .await
                    .map_err(|source| copy_error(&entry_src, &entry_dst, source))?;
            }
        }
    }

    Ok(())
}

fn copy_error(src: &Path, dst: &Path, source: std::io::Error) -> GeneratorError {
    GeneratorError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    }
}
