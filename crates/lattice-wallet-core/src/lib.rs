//! # Lattice Wallet Core
//!
//! Pure primitives for a block-lattice ledger client: keys, addresses,
//! amounts, state blocks, message signatures and proof-of-work.
//!
//! This crate contains no I/O and no networking. Everything here is
//! deterministic computation over byte strings, which is what makes the
//! golden vectors in the test suites meaningful.
//!
//! ## Key Types
//!
//! - [`Seed`] / [`PrivateKey`] / [`PublicKey`] - Ed25519 keys with Blake2b-512
//! - [`Address`] - Checksummed text form of a public key
//! - [`UnsignedBlock`] / [`Block`] - State blocks and their hash
//! - [`Work`] - Proof-of-work nonce
//!
//! ## Amounts
//!
//! Raw amounts are unbounded integers ([`num_bigint::BigUint`]); see
//! [`amount`] for whole/raw conversion.

pub mod address;
pub mod amount;
pub mod block;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod message;
pub mod types;
pub mod work;

pub use address::{
    address_from_public_key, public_key_from_address, validate_address, Address, BAN_PREFIX,
    KNOWN_PREFIXES, NANO_PREFIX,
};
pub use amount::{raw_to_whole, whole_to_raw, DEFAULT_DECIMALS};
pub use block::{hash_block, Block, BlockBuilder, BlockSubtype, Link, UnsignedBlock};
pub use crypto::{PrivateKey, PublicKey, Seed, Signature};
pub use error::{CoreError, Result};
pub use message::{sign_message, verify_message};
pub use num_bigint::{BigInt, BigUint};
pub use types::BlockHash;
pub use work::{search_work, validate_work, work_value, Work, WORK_THRESHOLD};
