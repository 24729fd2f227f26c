//! In-memory implementation of the Node trait.
//!
//! This is primarily for testing. It keeps a tiny ledger: per-account state,
//! receivable sends, and every processed block. Submitted blocks are checked
//! the way a node would (signature, frontier, work, balance arithmetic) so
//! wallet bugs surface as errors rather than silently corrupting state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use lattice_wallet_core::crypto::hash32;
use lattice_wallet_core::{
    search_work, validate_work, Address, BigUint, Block, BlockHash, BlockSubtype, PublicKey, Work,
};

use crate::error::{NodeError, Result};
use crate::messages::{AccountInfo, BlockInfo, Receivable};
use crate::traits::Node;

/// Work threshold used by [`MemoryNode`] unless configured otherwise.
///
/// Low enough that a search takes a few hundred hashes.
pub const EASY_WORK_THRESHOLD: u64 = 0xFF00_0000_0000_0000;

/// In-memory ledger node.
///
/// Thread-safe via RwLock. All data is lost when the node is dropped.
pub struct MemoryNode {
    inner: RwLock<Ledger>,
    work_threshold: u64,
    offline: AtomicBool,
    synthetic: AtomicU64,
}

#[derive(Default)]
struct Ledger {
    /// Account state keyed by public key, so prefixes don't matter.
    accounts: HashMap<PublicKey, AccountInfo>,

    /// Info for every known block, processed or seeded.
    blocks: HashMap<BlockHash, BlockInfo>,

    /// Unreceived sends per destination, in arrival order.
    receivable: HashMap<PublicKey, Vec<Receivable>>,

    /// Processed blocks in submission order.
    processed: Vec<(Block, BlockSubtype)>,
}

impl MemoryNode {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::with_work_threshold(EASY_WORK_THRESHOLD)
    }

    /// Create an empty ledger that demands work above `threshold`.
    pub fn with_work_threshold(threshold: u64) -> Self {
        Self {
            inner: RwLock::new(Ledger::default()),
            work_threshold: threshold,
            offline: AtomicBool::new(false),
            synthetic: AtomicU64::new(0),
        }
    }

    pub fn work_threshold(&self) -> u64 {
        self.work_threshold
    }

    /// Make every call fail with a transport error.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(NodeError::Transport("node is offline".into()));
        }
        Ok(())
    }

    fn next_synthetic_hash(&self) -> BlockHash {
        let n = self.synthetic.fetch_add(1, Ordering::SeqCst);
        BlockHash(hash32(&[b"memory-node", &n.to_be_bytes()]))
    }

    /// Seed an opened account with a made-up frontier.
    pub async fn open_account(
        &self,
        account: &Address,
        balance: BigUint,
        representative: &Address,
    ) -> BlockHash {
        let frontier = self.next_synthetic_hash();
        let mut ledger = self.inner.write().await;
        ledger.blocks.insert(
            frontier,
            BlockInfo {
                block_account: account.clone(),
                amount: balance.clone(),
                balance: balance.clone(),
                subtype: Some(BlockSubtype::Receive),
            },
        );
        ledger.accounts.insert(
            account.public_key(),
            AccountInfo {
                frontier,
                balance,
                representative: representative.clone(),
            },
        );
        frontier
    }

    /// Make `amount` receivable by `destination`, as if `source` had sent it.
    pub async fn add_receivable(
        &self,
        destination: &Address,
        amount: BigUint,
        source: &Address,
    ) -> BlockHash {
        let hash = self.next_synthetic_hash();
        let mut ledger = self.inner.write().await;
        ledger.blocks.insert(
            hash,
            BlockInfo {
                block_account: source.clone(),
                amount: amount.clone(),
                balance: BigUint::default(),
                subtype: Some(BlockSubtype::Send),
            },
        );
        ledger
            .receivable
            .entry(destination.public_key())
            .or_default()
            .push(Receivable {
                hash,
                amount,
                source: Some(source.clone()),
            });
        hash
    }

    /// Current state of an account, if opened.
    pub async fn account(&self, account: &Address) -> Option<AccountInfo> {
        self.inner
            .read()
            .await
            .accounts
            .get(&account.public_key())
            .cloned()
    }

    /// Processed blocks in submission order.
    pub async fn processed(&self) -> Vec<(Block, BlockSubtype)> {
        self.inner.read().await.processed.clone()
    }

    fn check_work(&self, block: &Block, do_work: bool) -> Result<()> {
        let root = if block.previous().is_zero() {
            BlockHash::from(block.account().public_key())
        } else {
            block.previous()
        };

        match block.work {
            Some(work) if validate_work(&root, work, self.work_threshold) => Ok(()),
            None if do_work => Ok(()),
            _ => Err(NodeError::Rpc("Block work is insufficient".into())),
        }
    }
}

impl Default for MemoryNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Apply a verified block. Nothing changes unless every check passes.
    fn apply(&mut self, block: &Block, hash: BlockHash, subtype: BlockSubtype) -> Result<()> {
        if self.blocks.contains_key(&hash) {
            return Err(NodeError::Rpc("Old block".into()));
        }

        let owner = block.account().public_key();
        let current = self.accounts.get(&owner);
        let old_balance = match current {
            Some(state) if state.frontier == block.previous() => state.balance.clone(),
            None if block.previous().is_zero() => BigUint::default(),
            Some(_) => return Err(NodeError::Rpc("Fork".into())),
            None => return Err(NodeError::Rpc("Gap previous block".into())),
        };
        let new_balance = block.balance().clone();

        let amount = match subtype {
            BlockSubtype::Send => {
                if new_balance >= old_balance {
                    return Err(NodeError::Rpc("Invalid block balance for given subtype".into()));
                }
                &old_balance - &new_balance
            }
            BlockSubtype::Receive => {
                let source_hash = block.body.link.as_block_hash();
                let entries = self.receivable.get(&owner);
                let pending = entries
                    .and_then(|entries| entries.iter().find(|r| r.hash == source_hash))
                    .ok_or_else(|| NodeError::Rpc("Unreceivable".into()))?;
                if new_balance != &old_balance + &pending.amount {
                    return Err(NodeError::Rpc("Balance and amount mismatch".into()));
                }
                pending.amount.clone()
            }
            BlockSubtype::Change => {
                if new_balance != old_balance || block.body.link.as_bytes() != &[0u8; 32] {
                    return Err(NodeError::Rpc("Invalid block balance for given subtype".into()));
                }
                BigUint::default()
            }
            BlockSubtype::Epoch => {
                return Err(NodeError::Rpc("Epoch blocks are not accepted".into()));
            }
        };

        match subtype {
            BlockSubtype::Send => {
                let destination = block.body.link.as_public_key();
                self.receivable.entry(destination).or_default().push(Receivable {
                    hash,
                    amount: amount.clone(),
                    source: Some(block.account().clone()),
                });
            }
            BlockSubtype::Receive => {
                let source_hash = block.body.link.as_block_hash();
                if let Some(entries) = self.receivable.get_mut(&owner) {
                    entries.retain(|r| r.hash != source_hash);
                }
            }
            _ => {}
        }

        self.accounts.insert(
            owner,
            AccountInfo {
                frontier: hash,
                balance: new_balance.clone(),
                representative: block.body.representative.clone(),
            },
        );
        self.blocks.insert(
            hash,
            BlockInfo {
                block_account: block.account().clone(),
                amount,
                balance: new_balance,
                subtype: Some(subtype),
            },
        );
        self.processed.push((block.clone(), subtype));
        Ok(())
    }
}

#[async_trait]
impl Node for MemoryNode {
    async fn account_info(&self, account: &Address) -> Result<AccountInfo> {
        self.check_online()?;
        self.account(account)
            .await
            .ok_or_else(|| NodeError::AccountNotFound(account.to_string()))
    }

    async fn block_info(&self, hash: &BlockHash) -> Result<BlockInfo> {
        self.check_online()?;
        self.inner
            .read()
            .await
            .blocks
            .get(hash)
            .cloned()
            .ok_or_else(|| NodeError::Rpc("Block not found".into()))
    }

    async fn receivable(
        &self,
        account: &Address,
        count: u32,
        threshold: &BigUint,
    ) -> Result<Vec<Receivable>> {
        self.check_online()?;
        let ledger = self.inner.read().await;
        Ok(ledger
            .receivable
            .get(&account.public_key())
            .map(|entries| {
                entries
                    .iter()
                    .filter(|r| &r.amount >= threshold)
                    .take(count as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn process(
        &self,
        block: &Block,
        subtype: BlockSubtype,
        do_work: bool,
    ) -> Result<BlockHash> {
        self.check_online()?;
        block
            .verify()
            .map_err(|_| NodeError::Rpc("Bad signature".into()))?;
        self.check_work(block, do_work)?;

        let hash = block.hash()?;
        self.inner.write().await.apply(block, hash, subtype)?;
        Ok(hash)
    }

    async fn work_generate(&self, root: &BlockHash) -> Result<Work> {
        self.check_online()?;
        Ok(search_work(root, self.work_threshold))
    }
}
