//! # Lattice Wallet Node
//!
//! The wallet's view of a ledger node. Provides a trait-based interface for
//! account queries and block submission, with a JSON-RPC implementation and
//! an in-memory ledger.
//!
//! ## Key Types
//!
//! - [`Node`] - The async trait for everything the wallet asks of a node
//! - [`RpcNode`] - JSON-RPC adapter over any [`RpcTransport`]
//! - [`HttpTransport`] / [`FailoverTransport`] - Transports
//! - [`MemoryNode`] - In-memory ledger for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lattice_wallet_node::{HttpTransport, Node, RpcNode};
//! use lattice_wallet_core::Address;
//!
//! async fn example() {
//!     let transport = HttpTransport::new("https://kaliumapi.appditto.com/api").unwrap();
//!     let node = RpcNode::new(transport);
//!
//!     // let address = Address::parse("ban_...").unwrap();
//!     // let info = node.account_info(&address).await.unwrap();
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Unopened accounts**: reported as [`NodeError::AccountNotFound`]
//! - **Failover**: only transport failures move to the next endpoint

pub mod error;
pub mod memory;
pub mod messages;
pub mod rpc;
pub mod traits;
pub mod transport;

pub use error::{NodeError, Result};
pub use memory::{MemoryNode, EASY_WORK_THRESHOLD};
pub use messages::{AccountInfo, BlockInfo, Receivable};
pub use rpc::{RpcConfig, RpcNode, ACCOUNT_NOT_FOUND};
pub use traits::Node;
pub use transport::{FailoverTransport, HttpOptions, HttpTransport, RpcTransport};
