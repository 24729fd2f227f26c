//! Node trait: the abstract interface to a ledger node.
//!
//! The wallet never talks to the network directly. Implementations include
//! the JSON-RPC adapter (primary) and an in-memory ledger (for tests).

use async_trait::async_trait;

use lattice_wallet_core::{Address, BigUint, Block, BlockHash, BlockSubtype, Work};

use crate::error::Result;
use crate::messages::{AccountInfo, BlockInfo, Receivable};

/// The Node trait: async interface for ledger queries and block submission.
///
/// # Design Notes
///
/// - **Unopened accounts**: `account_info` fails with
///   [`NodeError::AccountNotFound`](crate::NodeError::AccountNotFound) for an
///   account without blocks. Callers decide whether that is an error.
/// - **No staleness checks**: `process` is where a block built on an outdated
///   frontier gets rejected.
#[async_trait]
pub trait Node: Send + Sync {
    /// Frontier, balance and representative of an account.
    async fn account_info(&self, account: &Address) -> Result<AccountInfo>;

    /// Look up a block by hash.
    async fn block_info(&self, hash: &BlockHash) -> Result<BlockInfo>;

    /// Up to `count` sends to `account` of at least `threshold` raw.
    async fn receivable(
        &self,
        account: &Address,
        count: u32,
        threshold: &BigUint,
    ) -> Result<Vec<Receivable>>;

    /// Submit a signed block. Returns the hash the node assigned.
    ///
    /// With `do_work`, the node is asked to generate missing work itself.
    async fn process(&self, block: &Block, subtype: BlockSubtype, do_work: bool)
        -> Result<BlockHash>;

    /// Ask the node for proof-of-work on `root`.
    async fn work_generate(&self, root: &BlockHash) -> Result<Work>;
}
