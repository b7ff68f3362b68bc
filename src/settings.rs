//! Read-only access to host settings

use crate::error::HostError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;

/// Host settings store
#[async_trait]
pub trait SettingsApi: Send + Sync {
    /// Raw value of a global host setting (`Value::Null` when unset)
    async fn global_value(&self, key: &str) -> Result<Value, HostError>;

    /// A global setting read as a flag; anything but `true` is `false`
    async fn global_flag(&self, key: &str) -> Result<bool, HostError> {
        Ok(self.global_value(key).await?.as_bool().unwrap_or(false))
    }
}

/// In-memory settings, for running without a host
#[derive(Clone, Debug, Default)]
pub struct StaticSettings {
    values: HashMap<String, Value>,
}

impl StaticSettings {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

#[async_trait]
impl SettingsApi for StaticSettings {
    async fn global_value(&self, key: &str) -> Result<Value, HostError> {
        Ok(self.values.get(key).cloned().unwrap_or(Value::Null))
    }
}
