//! Host data API: paginated access to notes, resources and their files

use crate::error::HostError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query parameters sent along with a data request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DataQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl DataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated list of fields to return
    #[must_use]
    pub fn fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One page of a paginated response
#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
}

/// Host data API
#[async_trait]
pub trait DataApi: Send + Sync {
    /// Fetch the JSON response at `path` (e.g. `["resources"]`)
    async fn get(&self, path: &[&str], query: &DataQuery) -> Result<Value, HostError>;

    /// Fetch the raw file body of a resource
    async fn get_file(&self, resource_id: &str) -> Result<Vec<u8>, HostError>;
}

/// Fetch and deserialize a single response
pub async fn fetch_data<T>(
    api: &dyn DataApi,
    path: &[&str],
    query: &DataQuery,
) -> Result<T, HostError>
where
    T: DeserializeOwned,
{
    let value = api.get(path, query).await?;
    Ok(serde_json::from_value(value)?)
}

/// Fetch every item under `path`, following pages until `has_more` is false
///
/// Pages are numbered from 1. Any `page` already set on `query` is ignored.
pub async fn fetch_all_data<T>(
    api: &dyn DataApi,
    path: &[&str],
    query: DataQuery,
) -> Result<Vec<T>, HostError>
where
    T: DeserializeOwned,
{
    let mut items = Vec::new();
    let mut page = 1;

    loop {
        let response: Page<T> = fetch_data(api, path, &query.clone().page(page)).await?;
        items.extend(response.items);

        if !response.has_more {
            break;
        }
        page += 1;
    }

    tracing::debug!(path = ?path, count = items.len(), pages = page, "fetched all data");
    Ok(items)
}
