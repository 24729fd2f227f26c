//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use rand::rngs::OsRng;

use lattice_wallet::Wallet;
use lattice_wallet_core::{
    address_from_public_key, Address, BigUint, BlockHash, Seed, BAN_PREFIX, DEFAULT_DECIMALS,
};
use lattice_wallet_node::MemoryNode;

/// Seed of the account every fixture is funded from.
const FAUCET_SEED: [u8; 32] = [0xfa; 32];

/// `n` whole units in raw.
pub fn whole(n: u32) -> BigUint {
    BigUint::from(n) * BigUint::from(10u32).pow(DEFAULT_DECIMALS)
}

/// Address that funds fixtures.
pub fn faucet() -> Address {
    let key = Seed::from_bytes(FAUCET_SEED).derive_private_key(0);
    address_from_public_key(&key.public_key(), BAN_PREFIX)
}

/// A wallet on an in-memory node.
pub struct TestFixture {
    pub node: Arc<MemoryNode>,
    pub wallet: Wallet<MemoryNode>,
}

impl TestFixture {
    /// Create a fixture with a random seed and its own node.
    pub fn new() -> Self {
        Self::on_node(Arc::new(MemoryNode::new()), Seed::generate(&mut OsRng))
    }

    /// Create with a deterministic seed and its own node.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::on_node(Arc::new(MemoryNode::new()), Seed::from_bytes(seed))
    }

    /// Create a fixture sharing `node` with others.
    pub fn on_node(node: Arc<MemoryNode>, seed: Seed) -> Self {
        Self {
            wallet: Wallet::new(Arc::clone(&node), seed),
            node,
        }
    }

    /// The wallet's current address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Make `amount` whole units receivable by the wallet.
    pub async fn fund(&self, amount: u32) -> BlockHash {
        self.node
            .add_receivable(&self.address(), whole(amount), &faucet())
            .await
    }

    /// Open the wallet's account directly with `amount` whole units,
    /// representing itself.
    pub async fn open(&self, amount: u32) -> BlockHash {
        let address = self.address();
        self.node.open_account(&address, whole(amount), &address).await
    }

    /// Confirmed raw balance of the current account, zero if unopened.
    pub async fn balance(&self) -> BigUint {
        self.node
            .account(&self.address())
            .await
            .map(|info| info.balance)
            .unwrap_or_default()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create fixtures for multi-party tests, all on one node.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    let node = Arc::new(MemoryNode::new());
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::on_node(Arc::clone(&node), Seed::from_bytes(seed))
        })
        .collect()
}
