//! Error types for wallet operations.

use lattice_wallet_core::{BigUint, CoreError};
use lattice_wallet_node::NodeError;
use thiserror::Error;

/// Errors that can occur during wallet operations.
#[derive(Debug, Error)]
pub enum WalletError {
    /// Malformed key, address or other encoded input.
    #[error(transparent)]
    Core(CoreError),

    /// The send would take the balance below zero.
    #[error("insufficient funds: balance is {balance} raw, cannot send {amount} raw")]
    InsufficientFunds { balance: BigUint, amount: BigUint },

    /// Negative amount, or more decimals than the ledger supports.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The account has no blocks and the operation needs some.
    #[error("account not found: {0}")]
    AccountNotFound(String),

    /// The node rejected a query or submission, or could not be reached.
    #[error("node query failed: {0}")]
    ExternalQuery(NodeError),

    /// Proof-of-work could not be produced.
    #[error("work generation failed: {0}")]
    WorkGeneration(String),
}

impl From<CoreError> for WalletError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidAmount(message) => Self::InvalidAmount(message),
            other => Self::Core(other),
        }
    }
}

impl From<NodeError> for WalletError {
    fn from(err: NodeError) -> Self {
        match err {
            NodeError::AccountNotFound(account) => Self::AccountNotFound(account),
            other => Self::ExternalQuery(other),
        }
    }
}

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;
