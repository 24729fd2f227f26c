//! Typed views of the node responses the wallet consumes.

use serde::{Deserialize, Serialize};

use lattice_wallet_core::{Address, BigUint, BlockHash, BlockSubtype};

/// Current state of an opened account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Hash of the account's latest block.
    pub frontier: BlockHash,

    /// Raw balance as of the frontier.
    #[serde(with = "lattice_wallet_core::amount::raw_string")]
    pub balance: BigUint,

    pub representative: Address,
}

/// What the node knows about a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Owner of the block.
    pub block_account: Address,

    /// Raw amount moved by the block.
    #[serde(with = "lattice_wallet_core::amount::raw_string")]
    pub amount: BigUint,

    /// Raw balance of the owner after the block.
    #[serde(with = "lattice_wallet_core::amount::raw_string")]
    pub balance: BigUint,

    /// Only present for state blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<BlockSubtype>,
}

/// A send waiting to be received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receivable {
    /// Hash of the send block.
    pub hash: BlockHash,

    /// Raw amount sent.
    pub amount: BigUint,

    /// Sending account, when the node reports it.
    pub source: Option<Address>,
}

/// Body of one entry in a `receivable` response requested with `source`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ReceivableEntry {
    #[serde(with = "lattice_wallet_core::amount::raw_string")]
    pub amount: BigUint,

    #[serde(default)]
    pub source: Option<Address>,
}
