//! Cryptographic primitives for the lattice wallet.
//!
//! Blake2b at several digest sizes, and Ed25519 signatures in which the
//! internal SHA-512 is replaced by Blake2b-512 (the ledger's signature
//! scheme). Keys are plain 32-byte values; a [`PrivateKey`] is expanded on
//! every use rather than cached.

use blake2::digest::consts::{U32, U5, U8};
use blake2::digest::{Digest, Output, Update, VariableOutput};
use blake2::{Blake2b, Blake2b512, Blake2bVar};
use ed25519_dalek::hazmat::{raw_sign, raw_verify, ExpandedSecretKey};
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use rand::{CryptoRng, RngCore};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::{hex_decode_array, hex_encode};
use crate::error::{CoreError, Result};
use crate::types::impl_hex_serde;

/// Blake2b over the concatenation of `parts`, with a digest of `size` bytes.
///
/// `size` must be in `1..=64`.
pub fn hash(size: usize, parts: &[&[u8]]) -> Result<Vec<u8>> {
    // Blake2bVar takes 0 without complaint
    if !(1..=64).contains(&size) {
        return Err(CoreError::malformed(format!("unsupported digest size {size}")));
    }
    let mut hasher = Blake2bVar::new(size)
        .map_err(|_| CoreError::malformed(format!("unsupported digest size {size}")))?;
    for part in parts {
        Update::update(&mut hasher, part);
    }
    let mut out = vec![0u8; size];
    hasher
        .finalize_variable(&mut out)
        .map_err(|_| CoreError::malformed("digest buffer size mismatch"))?;
    Ok(out)
}

fn digest_parts<D: Digest>(parts: &[&[u8]]) -> Output<D> {
    let mut hasher = D::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    hasher.finalize()
}

/// 5-byte Blake2b (address checksums).
pub fn hash5(parts: &[&[u8]]) -> [u8; 5] {
    let mut out = [0u8; 5];
    out.copy_from_slice(&digest_parts::<Blake2b<U5>>(parts));
    out
}

/// 8-byte Blake2b (proof-of-work).
pub fn hash8(parts: &[&[u8]]) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest_parts::<Blake2b<U8>>(parts));
    out
}

/// 32-byte Blake2b (key derivation, block hashes).
pub fn hash32(parts: &[&[u8]]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest_parts::<Blake2b<U32>>(parts));
    out
}

/// 64-byte Blake2b (signing key expansion).
pub fn hash64(parts: &[&[u8]]) -> [u8; 64] {
    let mut out = [0u8; 64];
    out.copy_from_slice(&digest_parts::<Blake2b512>(parts));
    out
}

/// A 32-byte wallet seed. Every private key of a wallet derives from it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; 32]);

impl Seed {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_decode_array::<32>(s).map(Self)
    }

    /// Draw a fresh seed from a cryptographically secure RNG.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 32];
        rng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Get the raw bytes (secret material).
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to uppercase hex (secret material).
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    /// Derive the private key at `index`: `blake2b-32(seed || u32_be(index))`.
    pub fn derive_private_key(&self, index: u32) -> PrivateKey {
        PrivateKey(hash32(&[&self.0, &index.to_be_bytes()]))
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// A 32-byte Ed25519 private key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_decode_array::<32>(s).map(Self)
    }

    /// Get the raw bytes (secret material).
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to uppercase hex (secret material).
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    fn expand(&self) -> ExpandedSecretKey {
        ExpandedSecretKey::from_bytes(&hash64(&[&self.0]))
    }

    /// Get the public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(VerifyingKey::from(&self.expand()).to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = self.expand();
        let verifying_key = VerifyingKey::from(&expanded);
        let sig = raw_sign::<Blake2b512>(&expanded, message, &verifying_key);
        Signature(sig.to_bytes())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKey({:?})", self.public_key())
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_decode_array::<32>(s).map(Self)
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;

        let sig = DalekSignature::from_bytes(&signature.0);

        raw_verify::<Blake2b512>(&verifying_key, message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(PublicKey, 32);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to uppercase hex.
    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        hex_decode_array::<64>(s).map(Self)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

impl_hex_serde!(Signature, 64);

/// Derive the private key for `index` from `seed`.
pub fn derive_private_key(seed: &Seed, index: u32) -> PrivateKey {
    seed.derive_private_key(index)
}

/// Derive the public key of a private key.
pub fn derive_public_key(private_key: &PrivateKey) -> PublicKey {
    private_key.public_key()
}

/// Sign `message` with `private_key`.
pub fn sign(private_key: &PrivateKey, message: &[u8]) -> Signature {
    private_key.sign(message)
}

/// Check a signature; any malformed key or signature simply fails.
pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
    public_key.verify(message, signature).is_ok()
}
