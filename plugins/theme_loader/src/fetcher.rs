//! Theme fetching from plugin code

use crate::error::ThemeError;
use crate::messages::ThemeRequest;
use crate::theme::Theme;
use async_trait::async_trait;
use notes_pages::WebviewBridge;
use serde::de::DeserializeOwned;

/// Source of theme configuration
#[async_trait]
pub trait ThemeFetcher: Send + Sync {
    /// Configuration of `theme_name`, or `None` if no such theme exists
    async fn fetch(&self, theme_name: &str) -> Result<Option<Theme>, ThemeError>;

    /// Configuration of every available theme
    async fn fetch_all(&self) -> Result<Vec<Theme>, ThemeError>;
}

/// Fetches themes by posting [`ThemeRequest`]s over a webview bridge
#[derive(Clone, Debug)]
pub struct BridgeThemeFetcher<B> {
    bridge: B,
}

impl<B: WebviewBridge> BridgeThemeFetcher<B> {
    pub fn new(bridge: B) -> Self {
        Self { bridge }
    }

    async fn request<T: DeserializeOwned>(&self, request: ThemeRequest) -> Result<T, ThemeError> {
        let payload = serde_json::to_value(&request)?;
        let reply = self.bridge.post_message(payload).await?;
        Ok(serde_json::from_value(reply)?)
    }
}

#[async_trait]
impl<B: WebviewBridge> ThemeFetcher for BridgeThemeFetcher<B> {
    async fn fetch(&self, theme_name: &str) -> Result<Option<Theme>, ThemeError> {
        self.request(ThemeRequest::load(theme_name)).await
    }

    async fn fetch_all(&self) -> Result<Vec<Theme>, ThemeError> {
        self.request(ThemeRequest::load_all()).await
    }
}
