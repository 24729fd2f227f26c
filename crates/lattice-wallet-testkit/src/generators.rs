//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lattice_wallet_core::{
    address_from_public_key, Address, BigUint, Block, BlockBuilder, BlockHash, Link,
    PrivateKey, PublicKey, Result, Seed, BAN_PREFIX, NANO_PREFIX,
};

/// Generate a random seed.
pub fn seed() -> impl Strategy<Value = Seed> {
    any::<[u8; 32]>().prop_map(Seed::from_bytes)
}

/// Generate a random private key.
pub fn private_key() -> impl Strategy<Value = PrivateKey> {
    (seed(), any::<u32>()).prop_map(|(seed, index)| seed.derive_private_key(index))
}

/// Generate a public key with a known private key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    private_key().prop_map(|key| key.public_key())
}

/// Generate an arbitrary 32-byte public key. Not necessarily a curve point.
pub fn raw_public_key() -> impl Strategy<Value = PublicKey> {
    any::<[u8; 32]>().prop_map(PublicKey::from_bytes)
}

/// Generate an address with either known prefix.
pub fn address() -> impl Strategy<Value = Address> {
    (raw_public_key(), prop_oneof![Just(BAN_PREFIX), Just(NANO_PREFIX)])
        .prop_map(|(pk, prefix)| address_from_public_key(&pk, prefix))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a raw balance that fits the 128-bit field.
pub fn raw_balance() -> impl Strategy<Value = BigUint> {
    any::<u128>().prop_map(BigUint::from)
}

/// Generate a raw amount of up to 60 decimal digits, well past the 128-bit
/// balance field. Amount conversion has no width limit.
pub fn big_raw() -> impl Strategy<Value = BigUint> {
    "[0-9]{1,60}".prop_map(|digits| {
        digits
            .bytes()
            .fold(BigUint::default(), |acc, d| acc * 10u32 + u32::from(d - b'0'))
    })
}

/// Generate a decimal exponent.
pub fn decimals() -> impl Strategy<Value = u32> {
    0u32..=40
}

/// Generate a whole-unit amount as text: an integer part, optionally with
/// up to `max_fraction` fractional digits.
pub fn whole_amount(max_fraction: usize) -> impl Strategy<Value = String> {
    (
        0u64..=1_000_000_000,
        prop::collection::vec(0u8..10, 0..=max_fraction),
    )
        .prop_map(|(int, frac)| {
            if frac.is_empty() {
                int.to_string()
            } else {
                let digits: String = frac.iter().map(|d| char::from(b'0' + d)).collect();
                format!("{int}.{digits}")
            }
        })
}

/// Parameters for generating a block.
#[derive(Debug, Clone)]
pub struct BlockParams {
    pub seed: [u8; 32],
    pub index: u32,
    pub previous: Option<[u8; 32]>,
    pub representative: PublicKey,
    pub balance: u128,
    pub link: [u8; 32],
}

impl Arbitrary for BlockParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            any::<u32>(),      // index
            any::<Option<[u8; 32]>>(),
            raw_public_key(),
            any::<u128>(),
            any::<[u8; 32]>(),
        )
            .prop_map(|(seed, index, previous, representative, balance, link)| BlockParams {
                seed,
                index,
                previous,
                representative,
                balance,
                link,
            })
            .boxed()
    }
}

impl BlockParams {
    /// The signing key these parameters describe.
    pub fn private_key(&self) -> PrivateKey {
        Seed::from_bytes(self.seed).derive_private_key(self.index)
    }
}

/// Generate a signed block from parameters.
pub fn block_from_params(params: &BlockParams) -> Result<Block> {
    let key = params.private_key();
    let account = address_from_public_key(&key.public_key(), BAN_PREFIX);
    let representative = address_from_public_key(&params.representative, BAN_PREFIX);

    let mut builder = BlockBuilder::new(account)
        .representative(representative)
        .balance(BigUint::from(params.balance))
        .link(Link(params.link));

    if let Some(previous) = params.previous {
        builder = builder.previous(BlockHash::from_bytes(previous));
    }

    builder.sign(&key)
}
