//! Error types for host API calls

use thiserror::Error;

/// Errors surfaced by host-provided APIs
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Host request failed: {0}")]
    Request(String),

    #[error("Bridge channel closed")]
    BridgeClosed,

    #[error("Unexpected response from host: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}
