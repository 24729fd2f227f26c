//! Block: the atomic ledger entry, and the algorithm reducing it to a hash.
//!
//! Every new transaction is a "state" block carrying the account's full state
//! after the transaction. Blocks are immutable once signed; the next block of
//! the same account references this one through `previous`.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::codec::{hex_decode_array, hex_encode};
use crate::crypto::{hash32, PrivateKey, PublicKey, Signature};
use crate::error::{CoreError, Result};
use crate::types::{impl_hex_serde, BlockHash};
use crate::work::Work;

/// Hash preamble of a state block: 31 zero bytes followed by `0x06`.
pub const STATE_BLOCK_PREAMBLE: [u8; 32] = {
    let mut preamble = [0u8; 32];
    preamble[31] = 6;
    preamble
};

/// The context-dependent 32-byte link field.
///
/// Recipient public key for a send, source block hash for a receive, zero for
/// a representative change. Hashed verbatim whatever it means.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Link(pub [u8; 32]);

impl Link {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to uppercase hex string.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_decode_array::<32>(s).map(Self)
    }

    /// Read the link as a block hash.
    pub fn as_block_hash(&self) -> BlockHash {
        BlockHash(self.0)
    }

    /// Read the link as a public key.
    pub fn as_public_key(&self) -> PublicKey {
        PublicKey(self.0)
    }

    /// The zero link (representative change).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Link({})", &self.to_hex()[..16])
    }
}

impl From<PublicKey> for Link {
    fn from(pk: PublicKey) -> Self {
        Self(pk.0)
    }
}

impl From<BlockHash> for Link {
    fn from(hash: BlockHash) -> Self {
        Self(hash.0)
    }
}

impl_hex_serde!(Link, 32);

/// Block type. Only state blocks are ever built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    #[default]
    State,
}

/// What a state block does, declared to the node on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockSubtype {
    Send,
    Receive,
    Change,
    Epoch,
}

impl BlockSubtype {
    /// The wire name of the subtype.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Send => "send",
            Self::Receive => "receive",
            Self::Change => "change",
            Self::Epoch => "epoch",
        }
    }
}

impl fmt::Display for BlockSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A block before signing. Everything that is hashed lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedBlock {
    #[serde(rename = "type")]
    pub block_type: BlockType,

    /// Owner of the block.
    pub account: Address,

    /// Frontier before this block, or zero for the account's first block.
    pub previous: BlockHash,

    /// Where the account delegates its voting weight from now on.
    pub representative: Address,

    /// Raw balance after this block.
    #[serde(with = "crate::amount::raw_string")]
    pub balance: BigUint,

    pub link: Link,

    /// Text form of `link` when it is a recipient public key. Not hashed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_as_account: Option<Address>,
}

impl UnsignedBlock {
    /// Compute the block hash.
    pub fn hash(&self) -> Result<BlockHash> {
        hash_block(self)
    }

    /// Hash and sign, producing a complete block without work.
    pub fn sign(self, private_key: &PrivateKey) -> Result<Block> {
        let hash = self.hash()?;
        let signature = private_key.sign(hash.as_bytes());
        Ok(Block {
            body: self,
            signature,
            work: None,
        })
    }
}

/// A signed block, as submitted to the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub body: UnsignedBlock,

    /// Signature over the block hash by the account's key.
    pub signature: Signature,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<Work>,
}

impl Block {
    /// Compute the block hash.
    pub fn hash(&self) -> Result<BlockHash> {
        hash_block(&self.body)
    }

    /// Verify the signature against the account's public key.
    pub fn verify(&self) -> Result<()> {
        let hash = self.hash()?;
        self.body
            .account
            .public_key()
            .verify(hash.as_bytes(), &self.signature)
    }

    /// Attach proof-of-work.
    pub fn with_work(mut self, work: Work) -> Self {
        self.work = Some(work);
        self
    }

    pub fn account(&self) -> &Address {
        &self.body.account
    }

    pub fn previous(&self) -> BlockHash {
        self.body.previous
    }

    pub fn balance(&self) -> &BigUint {
        &self.body.balance
    }
}

/// Hash a block:
/// `blake2b-32(preamble || pk(account) || previous || pk(representative) || balance_be16 || link)`.
pub fn hash_block(block: &UnsignedBlock) -> Result<BlockHash> {
    let balance = balance_bytes(&block.balance)?;
    Ok(BlockHash(hash32(&[
        &STATE_BLOCK_PREAMBLE,
        block.account.public_key().as_bytes(),
        block.previous.as_bytes(),
        block.representative.public_key().as_bytes(),
        &balance,
        block.link.as_bytes(),
    ])))
}

/// Encode a balance as exactly 16 big-endian bytes.
pub fn balance_bytes(balance: &BigUint) -> Result<[u8; 16]> {
    let bytes = balance.to_bytes_be();
    if bytes.len() > 16 {
        return Err(CoreError::InvalidAmount(format!(
            "balance {balance} does not fit in 128 bits"
        )));
    }
    let mut out = [0u8; 16];
    out[16 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

/// Builder for state blocks.
pub struct BlockBuilder {
    account: Address,
    previous: BlockHash,
    representative: Address,
    balance: BigUint,
    link: Link,
    link_as_account: Option<Address>,
}

impl BlockBuilder {
    /// Start building a block for `account`.
    ///
    /// Defaults: zero previous, the account as its own representative, zero
    /// balance, zero link.
    pub fn new(account: Address) -> Self {
        Self {
            representative: account.clone(),
            account,
            previous: BlockHash::ZERO,
            balance: BigUint::default(),
            link: Link::ZERO,
            link_as_account: None,
        }
    }

    /// Set the previous block.
    pub fn previous(mut self, previous: BlockHash) -> Self {
        self.previous = previous;
        self
    }

    /// Set the representative.
    pub fn representative(mut self, representative: Address) -> Self {
        self.representative = representative;
        self
    }

    /// Set the resulting balance.
    pub fn balance(mut self, balance: BigUint) -> Self {
        self.balance = balance;
        self
    }

    /// Set the link.
    pub fn link(mut self, link: impl Into<Link>) -> Self {
        self.link = link.into();
        self
    }

    /// Link to a recipient: its public key as link, its address as `link_as_account`.
    pub fn send_to(mut self, recipient: &Address) -> Self {
        self.link = recipient.public_key().into();
        self.link_as_account = Some(recipient.clone());
        self
    }

    pub fn build(self) -> UnsignedBlock {
        UnsignedBlock {
            block_type: BlockType::State,
            account: self.account,
            previous: self.previous,
            representative: self.representative,
            balance: self.balance,
            link: self.link,
            link_as_account: self.link_as_account,
        }
    }

    /// Build, hash and sign.
    pub fn sign(self, private_key: &PrivateKey) -> Result<Block> {
        self.build().sign(private_key)
    }
}
