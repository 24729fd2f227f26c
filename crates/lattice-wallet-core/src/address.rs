//! Account addresses: the checksummed text form of a public key.
//!
//! Layout after the prefix (60 base32 characters):
//!
//! ```text
//! base32(0000 || public_key)            52 chars (4 padding bits + 256 key bits)
//! base32(reverse(blake2b-5(public_key)))  8 chars
//! ```
//!
//! The padding bits make the key segment a whole number of 5-bit groups; the
//! first key character is therefore always `1` or `3`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::codec::{base32_decode, base32_encode};
use crate::crypto::{hash5, PublicKey};
use crate::error::{CoreError, Result};

/// Prefix of the ledger's own addresses.
pub const BAN_PREFIX: &str = "ban_";

/// Prefix used by the sibling network sharing the same address format.
pub const NANO_PREFIX: &str = "nano_";

/// Prefixes accepted by [`Address::parse`].
pub const KNOWN_PREFIXES: [&str; 2] = [BAN_PREFIX, NANO_PREFIX];

const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;
const BODY_CHARS: usize = KEY_CHARS + CHECKSUM_CHARS;

/// Leading zero characters that widen the 4 padding bits to 3 whole bytes.
const ALIGN: &str = "1111";

/// Encode a public key as an address with the given prefix.
pub fn address_from_public_key(public_key: &PublicKey, prefix: &str) -> Address {
    Address {
        text: format!("{prefix}{}", encode_body(public_key)),
        public_key: *public_key,
    }
}

/// Decode the public key of an address.
///
/// The checksum characters are not checked; use [`validate_address`] or
/// [`Address::parse`] for that.
pub fn public_key_from_address(address: &str) -> Result<PublicKey> {
    let (_, body) = split_address(address)?;
    decode_key_segment(&body[..KEY_CHARS])
}

/// Check prefix, length, alphabet, padding and checksum of an address.
pub fn validate_address(address: &str) -> Result<()> {
    Address::parse(address).map(|_| ())
}

fn encode_body(public_key: &PublicKey) -> String {
    // 3 zero bytes + 32 key bytes = 280 bits = 56 chars, of which the first
    // 4 only carry the extra 20 zero bits.
    let mut padded = [0u8; 35];
    padded[3..].copy_from_slice(public_key.as_bytes());
    let key_segment = base32_encode(&padded);

    let mut body = String::with_capacity(BODY_CHARS);
    body.push_str(&key_segment[ALIGN.len()..]);
    body.push_str(&checksum(public_key));
    body
}

fn checksum(public_key: &PublicKey) -> String {
    let mut digest = hash5(&[public_key.as_bytes()]);
    digest.reverse();
    base32_encode(&digest)
}

fn split_address(address: &str) -> Result<(&str, &str)> {
    let split = address
        .rfind('_')
        .ok_or_else(|| CoreError::malformed(format!("address {address:?} has no prefix")))?;
    let (prefix, body) = address.split_at(split + 1);

    if !body.is_ascii() || body.len() != BODY_CHARS {
        return Err(CoreError::malformed(format!(
            "address body must be {BODY_CHARS} base32 characters, got {:?}",
            body
        )));
    }
    Ok((prefix, body))
}

fn decode_key_segment(segment: &str) -> Result<PublicKey> {
    let mut aligned = String::with_capacity(ALIGN.len() + KEY_CHARS);
    aligned.push_str(ALIGN);
    aligned.push_str(segment);

    let bytes = base32_decode(&aligned)?;
    if bytes[..3] != [0u8; 3] {
        return Err(CoreError::malformed("address padding bits are not zero"));
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&bytes[3..]);
    Ok(PublicKey(key))
}

/// A syntactically valid, checksum-verified account address.
///
/// Holds both the text and the decoded public key, so converting to a key is
/// free and infallible.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address {
    text: String,
    public_key: PublicKey,
}

impl Address {
    /// Parse and fully validate an address.
    pub fn parse(address: &str) -> Result<Self> {
        let (prefix, body) = split_address(address)?;
        if !KNOWN_PREFIXES.contains(&prefix) {
            return Err(CoreError::InvalidAddress(format!("unknown prefix {prefix:?}")));
        }

        let public_key = decode_key_segment(&body[..KEY_CHARS])?;
        if checksum(&public_key) != body[KEY_CHARS..] {
            return Err(CoreError::InvalidAddress(format!(
                "checksum mismatch in {address}"
            )));
        }

        Ok(Self {
            text: address.to_string(),
            public_key,
        })
    }

    /// Encode a public key with the given prefix.
    pub fn from_public_key(public_key: &PublicKey, prefix: &str) -> Self {
        address_from_public_key(public_key, prefix)
    }

    /// The account's public key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// The prefix, including its trailing underscore.
    pub fn prefix(&self) -> &str {
        &self.text[..self.text.len() - BODY_CHARS]
    }

    /// The address text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.text
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
