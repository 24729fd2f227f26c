//! # Lattice Wallet Testkit
//!
//! Testing utilities for the lattice wallet.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known blocks with expected hashes and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Wallets wired to a shared in-memory node
//!
//! ## Golden Vectors
//!
//! ```rust
//! use lattice_wallet_testkit::vectors::{all_vectors, block_from_vector};
//!
//! for vector in all_vectors() {
//!     let block = block_from_vector(&vector).unwrap();
//!     println!("{}: {}", vector.name, block.hash().unwrap());
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lattice_wallet_testkit::generators::{block_from_params, BlockParams};
//!
//! proptest! {
//!     #[test]
//!     fn block_verifies(params: BlockParams) {
//!         prop_assert!(block_from_params(&params).unwrap().verify().is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use lattice_wallet_testkit::fixtures::TestFixture;
//!
//! # async fn example() {
//! let fixture = TestFixture::with_seed([7; 32]);
//! fixture.fund(10).await;
//! let hashes = fixture.wallet.receive_all(20, "0", &Default::default()).await.unwrap();
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{faucet, multi_party_fixtures, whole, TestFixture};
pub use generators::{block_from_params, BlockParams};
pub use vectors::{all_vectors, block_from_vector, verify_all_vectors, GoldenVector};
