//! Strong type definitions for the lattice wallet.
//!
//! All 32-byte identifiers are newtypes to prevent mixing a block hash with a
//! public key at compile time. On the wire they are uppercase hex strings.

use std::fmt;

use crate::codec::{hex_decode_array, hex_encode};
use crate::crypto::PublicKey;
use crate::error::Result;

/// Implement hex-string serde for a `[u8; N]` tuple newtype.
macro_rules! impl_hex_serde {
    ($ty:ty, $len:expr) => {
        impl serde::Serialize for $ty {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&$crate::codec::hex_encode(&self.0))
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let text = <String as serde::Deserialize>::deserialize(deserializer)?;
                $crate::codec::hex_decode_array::<$len>(&text)
                    .map(Self)
                    .map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use impl_hex_serde;

/// A 32-byte block hash, computed by [`crate::block::hash_block`].
///
/// An account's most recent block hash is its frontier; the zero hash stands
/// for "no previous block".
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHash(pub [u8; 32]);

impl BlockHash {
    /// Create a new BlockHash from raw bytes.
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

    /// Whether this is the zero hash.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// The zero hash (previous of an account's first block).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for BlockHash {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for BlockHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for BlockHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Work for an unopened account is computed against its public key.
impl From<PublicKey> for BlockHash {
    fn from(pk: PublicKey) -> Self {
        Self(pk.0)
    }
}

impl_hex_serde!(BlockHash, 32);
