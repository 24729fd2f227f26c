//! Where a wallet's signing keys come from.

use lattice_wallet_core::{PrivateKey, Seed};

/// Produces the private key for an account index.
pub trait KeySource: Send + Sync {
    fn private_key(&self, index: u32) -> PrivateKey;
}

/// Seed wallets derive one key per index.
impl KeySource for Seed {
    fn private_key(&self, index: u32) -> PrivateKey {
        self.derive_private_key(index)
    }
}

/// A bare private key is a single account; the index is ignored.
impl KeySource for PrivateKey {
    fn private_key(&self, _index: u32) -> PrivateKey {
        self.clone()
    }
}
