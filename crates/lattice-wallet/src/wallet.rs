//! The Wallet: builds, signs and submits blocks for one account at a time.
//!
//! Every transaction follows the same path: read the account's state from the
//! node, compute the new balance, build the state block, sign it, optionally
//! attach work, submit. Nothing reaches the node until the block is complete.

use rand::{CryptoRng, RngCore};
use std::sync::Arc;
use tracing::debug;

use lattice_wallet_core::amount::{non_negative, whole_to_raw};
use lattice_wallet_core::{
    address_from_public_key, Address, BigUint, Block, BlockBuilder, BlockHash, BlockSubtype,
    CoreError, PrivateKey, PublicKey, Seed, Signature, UnsignedBlock, BAN_PREFIX,
    DEFAULT_DECIMALS, KNOWN_PREFIXES,
};
use lattice_wallet_node::{Node, NodeError};

use crate::error::{Result, WalletError};
use crate::keys::KeySource;
use crate::work::WorkProvider;

/// Default number of blocks taken by [`Wallet::receive_all`].
pub const DEFAULT_RECEIVE_COUNT: u32 = 20;

/// Configuration for a Wallet.
#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Decimal exponent of one whole unit.
    pub decimals: u32,
    /// Prefix of the wallet's own addresses.
    ///
    /// Must be one of [`KNOWN_PREFIXES`]: [`Address`] only parses those, so
    /// any other prefix yields addresses that can't be read back from node
    /// replies. [`WalletConfig::with_prefix`] checks this.
    pub prefix: String,
    /// Ask the node to generate work for blocks submitted without it.
    pub add_do_work: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            decimals: DEFAULT_DECIMALS,
            prefix: BAN_PREFIX.to_string(),
            add_do_work: true,
        }
    }
}

impl WalletConfig {
    /// Default configuration with another address prefix.
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        if !KNOWN_PREFIXES.contains(&prefix) {
            return Err(CoreError::InvalidAddress(format!("unknown prefix {prefix:?}")).into());
        }
        Ok(Self {
            prefix: prefix.to_string(),
            ..Self::default()
        })
    }
}

/// Per-transaction options.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    /// Attach work from the wallet's work provider, if one is configured.
    pub gen_work: bool,
    /// Representative for the new block instead of the current one.
    pub representative: Option<Address>,
}

impl TxOptions {
    pub fn with_work() -> Self {
        Self {
            gen_work: true,
            representative: None,
        }
    }

    pub fn representative(mut self, representative: Address) -> Self {
        self.representative = Some(representative);
        self
    }
}

/// Account state as the next block sees it.
#[derive(Debug, Clone)]
struct AccountState {
    previous: BlockHash,
    balance: BigUint,
    representative: Address,
}

/// A wallet over a key source and a node.
///
/// The index selects which account of the key source is used. It is read
/// once at the start of each operation; `set_index` needs `&mut self`, so it
/// can't change while one is in flight.
pub struct Wallet<N, K = Seed> {
    node: Arc<N>,
    keys: K,
    index: u32,
    config: WalletConfig,
    work_provider: Option<Arc<dyn WorkProvider>>,
}

impl<N: Node> Wallet<N, Seed> {
    /// Seed wallet at index 0.
    pub fn new(node: Arc<N>, seed: Seed) -> Self {
        Self::with_keys(node, seed, WalletConfig::default())
    }

    /// Wallet over a freshly drawn seed.
    pub fn random<R: RngCore + CryptoRng>(node: Arc<N>, rng: &mut R) -> Self {
        Self::new(node, Seed::generate(rng))
    }

    /// The wallet seed (secret material).
    pub fn seed(&self) -> &Seed {
        &self.keys
    }
}

impl<N: Node> Wallet<N, PrivateKey> {
    /// Single-account wallet over a fixed private key.
    pub fn from_private_key(node: Arc<N>, private_key: PrivateKey) -> Self {
        Self::with_keys(node, private_key, WalletConfig::default())
    }
}

impl<N: Node, K: KeySource> Wallet<N, K> {
    pub fn with_keys(node: Arc<N>, keys: K, config: WalletConfig) -> Self {
        Self {
            node,
            keys,
            index: 0,
            config,
            work_provider: None,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: WalletConfig) -> Self {
        self.config = config;
        self
    }

    /// Use `provider` for blocks submitted with [`TxOptions::gen_work`].
    pub fn with_work_provider(mut self, provider: Arc<dyn WorkProvider>) -> Self {
        self.work_provider = Some(provider);
        self
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn node(&self) -> &Arc<N> {
        &self.node
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    /// Switch to another account of the key source.
    pub fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    /// Private key for the current index (secret material).
    pub fn private_key(&self) -> PrivateKey {
        self.keys.private_key(self.index)
    }

    pub fn public_key(&self) -> PublicKey {
        self.private_key().public_key()
    }

    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key(), &self.config.prefix)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transactions
    // ─────────────────────────────────────────────────────────────────────────

    /// Send `amount` whole units to `to`.
    pub async fn send(&self, to: &Address, amount: &str, opts: &TxOptions) -> Result<BlockHash> {
        let raw = self.parse_non_negative(amount)?;
        let key = self.private_key();
        let account = self.account_of(&key);
        let state = self.account_state(&account, opts).await?;
        self.send_raw(key, account, state, to, raw, opts).await
    }

    /// Send whatever it takes to leave exactly `end_balance` whole units.
    ///
    /// The node rejects the block if the end balance is not below the
    /// current balance; no local check is made.
    pub async fn send_fixed_final_bal(
        &self,
        to: &Address,
        end_balance: &str,
        opts: &TxOptions,
    ) -> Result<BlockHash> {
        let balance = self.parse_non_negative(end_balance)?;
        let key = self.private_key();
        let account = self.account_of(&key);
        let state = self.account_state(&account, opts).await?;

        let block = BlockBuilder::new(account)
            .previous(state.previous)
            .representative(state.representative)
            .balance(balance)
            .send_to(to)
            .build();
        self.submit(block, &key, BlockSubtype::Send, opts).await
    }

    /// Send the entire balance to `to`.
    pub async fn send_all(&self, to: &Address, opts: &TxOptions) -> Result<BlockHash> {
        let key = self.private_key();
        let account = self.account_of(&key);
        let state = self.account_state(&account, opts).await?;
        let raw = state.balance.clone();
        self.send_raw(key, account, state, to, raw, opts).await
    }

    async fn send_raw(
        &self,
        key: PrivateKey,
        account: Address,
        state: AccountState,
        to: &Address,
        raw: BigUint,
        opts: &TxOptions,
    ) -> Result<BlockHash> {
        if raw > state.balance {
            return Err(WalletError::InsufficientFunds {
                balance: state.balance,
                amount: raw,
            });
        }

        let block = BlockBuilder::new(account)
            .previous(state.previous)
            .representative(state.representative)
            .balance(&state.balance - &raw)
            .send_to(to)
            .build();
        self.submit(block, &key, BlockSubtype::Send, opts).await
    }

    /// Receive the send block `send_hash`.
    pub async fn receive(&self, send_hash: &BlockHash, opts: &TxOptions) -> Result<BlockHash> {
        let key = self.private_key();
        let account = self.account_of(&key);
        let send = self.node.block_info(send_hash).await?;
        let state = self.account_state(&account, opts).await?;

        let block = BlockBuilder::new(account)
            .previous(state.previous)
            .representative(state.representative)
            .balance(state.balance + send.amount)
            .link(*send_hash)
            .build();
        self.submit(block, &key, BlockSubtype::Receive, opts).await
    }

    /// Receive up to `count` receivable sends of at least `threshold` whole
    /// units, one after another.
    ///
    /// Returns the hashes of the receive blocks, in order. Each block's
    /// `previous` is the hash of the one before it. Stops at the first
    /// failure; blocks already accepted stay accepted.
    pub async fn receive_all(
        &self,
        count: u32,
        threshold: &str,
        opts: &TxOptions,
    ) -> Result<Vec<BlockHash>> {
        let threshold = self.parse_non_negative(threshold)?;
        let key = self.private_key();
        let account = self.account_of(&key);

        let receivable = self.node.receivable(&account, count, &threshold).await?;
        if receivable.is_empty() {
            return Ok(Vec::new());
        }

        let mut state = self.account_state(&account, opts).await?;
        let mut hashes = Vec::with_capacity(receivable.len());

        for entry in receivable {
            let balance = &state.balance + &entry.amount;
            let unsigned = BlockBuilder::new(account.clone())
                .previous(state.previous)
                .representative(state.representative.clone())
                .balance(balance.clone())
                .link(entry.hash)
                .build();

            let block = self.finish(unsigned, &key, opts).await?;
            let hash = block.hash()?;
            self.process(&block, BlockSubtype::Receive).await?;

            hashes.push(hash);
            state.previous = hash;
            state.balance = balance;
        }

        Ok(hashes)
    }

    /// Delegate voting weight to `representative`.
    ///
    /// Fails with [`WalletError::AccountNotFound`] for an unopened account.
    pub async fn change_representative(
        &self,
        representative: &Address,
        opts: &TxOptions,
    ) -> Result<BlockHash> {
        let key = self.private_key();
        let account = self.account_of(&key);
        let info = self.node.account_info(&account).await?;

        let block = BlockBuilder::new(account)
            .previous(info.frontier)
            .representative(representative.clone())
            .balance(info.balance)
            .build();
        self.submit(block, &key, BlockSubtype::Change, opts).await
    }

    /// Alias for [`Wallet::change_representative`].
    pub async fn change_rep(&self, representative: &Address, opts: &TxOptions) -> Result<BlockHash> {
        self.change_representative(representative, opts).await
    }

    /// Sign an off-chain message with the current key.
    pub fn sign_message(&self, message: &str) -> Result<Signature> {
        Ok(lattice_wallet_core::sign_message(&self.private_key(), message)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn account_of(&self, key: &PrivateKey) -> Address {
        address_from_public_key(&key.public_key(), &self.config.prefix)
    }

    fn parse_non_negative(&self, whole: &str) -> Result<BigUint> {
        let raw = whole_to_raw(whole, self.config.decimals)?;
        Ok(non_negative(&raw)?)
    }

    /// State for the next block. An unopened account starts from nothing and
    /// represents itself unless told otherwise.
    async fn account_state(&self, account: &Address, opts: &TxOptions) -> Result<AccountState> {
        match self.node.account_info(account).await {
            Ok(info) => Ok(AccountState {
                previous: info.frontier,
                balance: info.balance,
                representative: opts.representative.clone().unwrap_or(info.representative),
            }),
            Err(NodeError::AccountNotFound(_)) => {
                debug!(%account, "account is unopened");
                Ok(AccountState {
                    previous: BlockHash::ZERO,
                    balance: BigUint::default(),
                    representative: opts
                        .representative
                        .clone()
                        .unwrap_or_else(|| account.clone()),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Sign, then attach work if asked for and available.
    async fn finish(
        &self,
        unsigned: UnsignedBlock,
        key: &PrivateKey,
        opts: &TxOptions,
    ) -> Result<Block> {
        let root = if unsigned.previous.is_zero() {
            BlockHash::from(unsigned.account.public_key())
        } else {
            unsigned.previous
        };

        let block = unsigned.sign(key)?;
        match (&self.work_provider, opts.gen_work) {
            (Some(provider), true) => Ok(block.with_work(provider.request_work(&root).await?)),
            _ => Ok(block),
        }
    }

    async fn process(&self, block: &Block, subtype: BlockSubtype) -> Result<BlockHash> {
        let do_work = block.work.is_none() && self.config.add_do_work;
        debug!(account = %block.account(), %subtype, do_work, "processing block");
        Ok(self.node.process(block, subtype, do_work).await?)
    }

    async fn submit(
        &self,
        unsigned: UnsignedBlock,
        key: &PrivateKey,
        subtype: BlockSubtype,
        opts: &TxOptions,
    ) -> Result<BlockHash> {
        let block = self.finish(unsigned, key, opts).await?;
        self.process(&block, subtype).await
    }
}
