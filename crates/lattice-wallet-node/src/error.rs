//! Error types for node access.

use thiserror::Error;

/// Errors that can occur while talking to a ledger node.
#[derive(Debug, Error)]
pub enum NodeError {
    /// The account has no blocks yet.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The node answered with an `error` field.
    #[error("node error: {0}")]
    Rpc(String),

    /// The request never produced a usable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response did not have the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A value in the response failed to decode.
    #[error(transparent)]
    Core(#[from] lattice_wallet_core::CoreError),
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for node operations.
pub type Result<T> = std::result::Result<T, NodeError>;
