//! # Lattice Wallet
//!
//! A client-side wallet engine for block-lattice ledgers: derive accounts
//! from a seed, build and sign state blocks, and submit them to a node.
//!
//! ## Overview
//!
//! - **Accounts**: one seed, many accounts, selected by index
//! - **Transactions**: send, receive and representative change, each a
//!   single signed state block
//! - **Work**: attached locally, delegated to a node, or left to the node
//!   on submission
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lattice_wallet::{TxOptions, Wallet};
//! use lattice_wallet::core::Seed;
//! use lattice_wallet::node::{HttpTransport, RpcNode};
//!
//! async fn example() {
//!     let transport = HttpTransport::new("https://kaliumapi.appditto.com/api").unwrap();
//!     let node = Arc::new(RpcNode::new(transport));
//!
//!     let seed = Seed::from_hex(&"0".repeat(64)).unwrap();
//!     let wallet = Wallet::new(node, seed);
//!     println!("{}", wallet.address());
//!
//!     // Receive everything waiting for the account
//!     // let hashes = wallet.receive_all(20, "0", &TxOptions::default()).await.unwrap();
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `lattice_wallet::core` - Keys, addresses, amounts, blocks, work
//! - `lattice_wallet::node` - Node trait, RPC adapter, in-memory node

pub mod error;
pub mod keys;
pub mod wallet;
pub mod work;

// Re-export component crates
pub use lattice_wallet_core as core;
pub use lattice_wallet_node as node;

pub use error::{Result, WalletError};
pub use keys::KeySource;
pub use wallet::{TxOptions, Wallet, WalletConfig, DEFAULT_RECEIVE_COUNT};
pub use work::{DelegatedWorkProvider, LocalWorkProvider, WorkProvider};

// Re-export commonly used core types
pub use lattice_wallet_core::{
    Address, BigUint, Block, BlockHash, BlockSubtype, PrivateKey, PublicKey, Seed, Signature, Work,
};
