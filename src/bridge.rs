//! Request/response messaging between plugin code and the webview side
//!
//! The plugin posts a JSON payload and awaits a single JSON reply. The
//! in-process [`channel`] pairs a [`ChannelBridge`] with a receiver of
//! [`BridgeRequest`]s so the responding side can live in another task.

use crate::error::HostError;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

/// Posts messages to the webview side and awaits the reply
#[async_trait]
pub trait WebviewBridge: Send + Sync {
    async fn post_message(&self, payload: Value) -> Result<Value, HostError>;
}

/// A message waiting for a reply
#[derive(Debug)]
pub struct BridgeRequest {
    pub payload: Value,
    reply: oneshot::Sender<Result<Value, String>>,
}

impl BridgeRequest {
    /// Answer the request; an `Err` reaches the caller as [`HostError::Request`]
    pub fn respond(self, response: Result<Value, String>) {
        if self.reply.send(response).is_err() {
            tracing::debug!("bridge caller went away before the reply");
        }
    }
}

/// Sending half of an in-process bridge
#[derive(Clone, Debug)]
pub struct ChannelBridge {
    sender: mpsc::UnboundedSender<BridgeRequest>,
}

/// Create an in-process bridge and the receiver its requests arrive on
pub fn channel() -> (ChannelBridge, mpsc::UnboundedReceiver<BridgeRequest>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ChannelBridge { sender }, receiver)
}

#[async_trait]
impl WebviewBridge for ChannelBridge {
    async fn post_message(&self, payload: Value) -> Result<Value, HostError> {
        let (reply, response) = oneshot::channel();

        self.sender
            .send(BridgeRequest { payload, reply })
            .map_err(|_| HostError::BridgeClosed)?;

        response
            .await
            .map_err(|_| HostError::BridgeClosed)?
            .map_err(HostError::Request)
    }
}
