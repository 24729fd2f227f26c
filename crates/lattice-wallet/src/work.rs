//! Work providers: where a wallet gets proof-of-work for a block root.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use lattice_wallet_core::{search_work, BlockHash, Work, WORK_THRESHOLD};
use lattice_wallet_node::Node;

use crate::error::{Result, WalletError};

/// Produces proof-of-work for a root (previous frontier, or the account's
/// public key for its first block).
#[async_trait]
pub trait WorkProvider: Send + Sync {
    async fn request_work(&self, root: &BlockHash) -> Result<Work>;
}

/// Searches for work on this machine.
///
/// The search is CPU-bound, so it runs on tokio's blocking pool. It cannot
/// be cancelled once started.
#[derive(Debug, Clone, Copy)]
pub struct LocalWorkProvider {
    threshold: u64,
}

impl LocalWorkProvider {
    /// Provider targeting the network threshold.
    pub fn new() -> Self {
        Self::with_threshold(WORK_THRESHOLD)
    }

    pub fn with_threshold(threshold: u64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u64 {
        self.threshold
    }
}

impl Default for LocalWorkProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkProvider for LocalWorkProvider {
    async fn request_work(&self, root: &BlockHash) -> Result<Work> {
        let root = *root;
        let threshold = self.threshold;
        debug!(%root, threshold, "searching for work locally");

        tokio::task::spawn_blocking(move || search_work(&root, threshold))
            .await
            .map_err(|e| WalletError::WorkGeneration(e.to_string()))
    }
}

/// Asks a node (or work server behind it) to generate work.
pub struct DelegatedWorkProvider<N> {
    node: Arc<N>,
}

impl<N: Node> DelegatedWorkProvider<N> {
    pub fn new(node: Arc<N>) -> Self {
        Self { node }
    }
}

#[async_trait]
impl<N: Node> WorkProvider for DelegatedWorkProvider<N> {
    async fn request_work(&self, root: &BlockHash) -> Result<Work> {
        debug!(%root, "requesting work from node");
        self.node
            .work_generate(root)
            .await
            .map_err(|e| WalletError::WorkGeneration(e.to_string()))
    }
}
