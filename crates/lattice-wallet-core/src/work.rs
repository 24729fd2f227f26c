//! Proof-of-work: a nonce whose hash with the block root clears a threshold.
//!
//! The work value is `u64_le(blake2b-8(u64_le(nonce) || root))`. The root is
//! the account's frontier, or its public key if the account has no blocks.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::codec::hex_decode_array;
use crate::crypto::hash8;
use crate::error::{CoreError, Result};
use crate::types::BlockHash;

/// Network threshold for send and change blocks.
pub const WORK_THRESHOLD: u64 = 0xFFFF_FE00_0000_0000;

/// A proof-of-work nonce.
///
/// Rendered as 16 uppercase hex characters of the big-endian nonce, which is
/// how nodes report and accept it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Work(pub u64);

impl Work {
    /// The nonce.
    pub const fn nonce(&self) -> u64 {
        self.0
    }

    /// Render as 16 hex characters.
    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }

    /// Parse 16 hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 16 {
            return Err(CoreError::malformed(format!(
                "work must be 16 hex characters, got {}",
                s.len()
            )));
        }
        hex_decode_array::<8>(s).map(|bytes| Self(u64::from_be_bytes(bytes)))
    }
}

impl fmt::Debug for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Work({:016X})", self.0)
    }
}

impl fmt::Display for Work {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016X}", self.0)
    }
}

impl FromStr for Work {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Work {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Work {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// The work value of `work` against `root`.
pub fn work_value(root: &BlockHash, work: Work) -> u64 {
    u64::from_le_bytes(hash8(&[&work.0.to_le_bytes(), root.as_bytes()]))
}

/// Whether `work` clears `threshold` for `root`. The comparison is strict.
pub fn validate_work(root: &BlockHash, work: Work, threshold: u64) -> bool {
    work_value(root, work) > threshold
}

/// Find the smallest nonce that clears `threshold`, counting up from zero.
///
/// Deterministic for a given root and threshold. Expected cost at
/// [`WORK_THRESHOLD`] is about 2^23 hashes.
pub fn search_work(root: &BlockHash, threshold: u64) -> Work {
    let mut nonce = 0u64;
    loop {
        let work = Work(nonce);
        if validate_work(root, work, threshold) {
            return work;
        }
        nonce = nonce.wrapping_add(1);
    }
}
