//! Off-chain message signing.
//!
//! A message is signed by signing the hash of a dummy state block that can
//! never be valid on the ledger: its account is the zero key, and its
//! representative encodes `blake2b-32("bananomsg-" || message)`. Signing the
//! block shape keeps hardware signers, which only sign blocks, usable.

use crate::address::{address_from_public_key, BAN_PREFIX};
use crate::block::{hash_block, BlockBuilder, UnsignedBlock};
use crate::crypto::{hash32, PrivateKey, PublicKey, Signature};
use crate::error::Result;
use crate::types::BlockHash;

/// Domain separator mixed into the message digest.
pub const MESSAGE_PREAMBLE: &[u8] = b"bananomsg-";

/// Build the dummy block standing in for `message`.
pub fn message_block(message: &str) -> UnsignedBlock {
    let digest = PublicKey(hash32(&[MESSAGE_PREAMBLE, message.as_bytes()]));
    let sentinel = address_from_public_key(&PublicKey([0u8; 32]), BAN_PREFIX);

    BlockBuilder::new(sentinel)
        .representative(address_from_public_key(&digest, BAN_PREFIX))
        .build()
}

/// The hash that is signed for `message`.
pub fn message_hash(message: &str) -> Result<BlockHash> {
    hash_block(&message_block(message))
}

/// Sign a UTF-8 message.
pub fn sign_message(private_key: &PrivateKey, message: &str) -> Result<Signature> {
    let hash = message_hash(message)?;
    Ok(private_key.sign(hash.as_bytes()))
}

/// Verify a signature produced by [`sign_message`].
pub fn verify_message(public_key: &PublicKey, message: &str, signature: &Signature) -> Result<()> {
    let hash = message_hash(message)?;
    public_key.verify(hash.as_bytes(), signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Seed;
    use num_bigint::BigUint;

    #[test]
    fn test_message_block_shape() {
        let block = message_block("hello banano");
        assert_eq!(block.account.public_key(), PublicKey([0u8; 32]));
        assert!(block.previous.is_zero());
        assert_eq!(block.balance, BigUint::default());
        assert_eq!(block.link.as_bytes(), &[0u8; 32]);
        assert_eq!(
            block.representative.as_str(),
            "ban_14edj3qbep4phf5hajsaxub987tjodx678h9wqf7q9re81f8q1fp4c4ba375"
        );
    }

    #[test]
    fn test_known_message_signature() {
        let key = Seed::from_bytes([0u8; 32]).derive_private_key(0);
        assert_eq!(
            message_hash("hello banano").unwrap().to_hex(),
            "A69A25C10142E185A93A7D687BDAA819AD8B11B3E4630F1688E0B726FCA69560"
        );
        assert_eq!(
            sign_message(&key, "hello banano").unwrap().to_hex(),
            "DE16AAF881488F961F079AD92B2C2C59C54B1008366D1F2A69A82E6881B12B14\
             D8A9EAAC89235BC7AA1E4892861055A3A4F14F33B043B466CB4DC8A91092A90D"
        );
    }

    #[test]
    fn test_verify_message() {
        let key = Seed::from_bytes([3u8; 32]).derive_private_key(2);
        let sig = sign_message(&key, "gm").unwrap();
        verify_message(&key.public_key(), "gm", &sig).unwrap();
        assert!(verify_message(&key.public_key(), "gn", &sig).is_err());

        let other = Seed::from_bytes([3u8; 32]).derive_private_key(3);
        assert!(verify_message(&other.public_key(), "gm", &sig).is_err());
    }

    #[test]
    fn test_empty_message_signs() {
        let key = PrivateKey::from_bytes([1u8; 32]);
        let sig = sign_message(&key, "").unwrap();
        verify_message(&key.public_key(), "", &sig).unwrap();
    }
}
