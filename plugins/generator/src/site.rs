//! Site and theme data read back from the store

use crate::context::PublisherContext;
use crate::error::GeneratorError;
use notes_pages_theme_loader::Field;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

pub const SITE_KEY: &str = "site";
pub const ARTICLES_KEY: &str = "articles";
pub const PAGES_FIELD_VARS_KEY: &str = "pagesFieldVars";

/// The stored site with its published articles and a generation timestamp
///
/// `articles` holds the stored articles whose `published` flag is `true`;
/// `generatedAt` is the current time in epoch milliseconds.
pub async fn site(ctx: &PublisherContext) -> Result<Value, GeneratorError> {
    let Some(mut site) = ctx.store.fetch(&[SITE_KEY]).await? else {
        return Err(GeneratorError::MissingSite);
    };

    let articles = match ctx.store.fetch(&[ARTICLES_KEY]).await? {
        Some(Value::Array(articles)) => articles,
        _ => Vec::new(),
    };
    let published: Vec<Value> = articles
        .into_iter()
        .filter(|article| article.get("published").and_then(Value::as_bool) == Some(true))
        .collect();

    let fields = site.as_object_mut().ok_or(GeneratorError::InvalidSite)?;
    fields.insert(ARTICLES_KEY.to_string(), Value::Array(published));
    fields.insert("generatedAt".to_string(), Value::from(now_millis()));

    Ok(site)
}

/// Field values and page definitions for rendering with a theme
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeData {
    /// Per page, the value of every field: saved values over defaults
    pub field_values: Map<String, Value>,
    pub pages: BTreeMap<String, Vec<Field>>,
}

/// Field values for `theme_name`, with saved `pagesFieldVars` over theme defaults
pub async fn theme_data(
    ctx: &PublisherContext,
    theme_name: &str,
) -> Result<ThemeData, GeneratorError> {
    let theme = ctx
        .themes
        .fetch(theme_name)
        .await?
        .ok_or_else(|| GeneratorError::ThemeNotFound(theme_name.to_string()))?;

    let saved = ctx
        .store
        .fetch(&[PAGES_FIELD_VARS_KEY, theme_name])
        .await?
        .unwrap_or_else(|| Value::Object(Map::new()));

    let mut values = Value::Object(default_field_values(&theme.pages));
    deep_merge(&mut values, saved);

    let field_values = match values {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    Ok(ThemeData {
        field_values,
        pages: theme.pages,
    })
}

fn default_field_values(pages: &BTreeMap<String, Vec<Field>>) -> Map<String, Value> {
    pages
        .iter()
        .map(|(page, fields)| {
            let values = fields
                .iter()
                .map(|field| (field.name.clone(), field.initial_value()))
                .collect();
            (page.clone(), Value::Object(values))
        })
        .collect()
}

/// Merge `source` into `target`
///
/// Objects merge key by key and arrays element by element, recursively;
/// any other `source` value replaces what is in `target`.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => {
            for (key, value) in source {
                match target.get_mut(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(source)) => {
            for (i, value) in source.into_iter().enumerate() {
                match target.get_mut(i) {
                    Some(existing) => deep_merge(existing, value),
                    None => target.push(value),
                }
            }
        }
        (target, source) => *target = source,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
