//! Golden vectors for the wallet's observable outputs.
//!
//! Any wallet for the same ledger must derive the same:
//! - private key, public key and address for a seed and index
//! - block hash and signature for the same transaction
//! - message signature for the same text

use std::sync::Arc;

use lattice_wallet::core::{verify_message, BAN_PREFIX};
use lattice_wallet::node::MemoryNode;
use lattice_wallet::{
    Address, BigUint, BlockSubtype, Seed, Signature, TxOptions, Wallet, WalletConfig,
};
use serde::Serialize;

/// One account derived from a seed.
#[derive(Debug, Serialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub seed: String,
    pub index: u32,

    // Derived outputs
    pub private_key: String,
    pub public_key: String,
    pub address: String,
}

fn generate_vector(name: &str, description: &str, seed: &str, index: u32) -> GoldenVector {
    let mut wallet = wallet_for(seed);
    wallet.set_index(index);

    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        seed: seed.to_string(),
        index,
        private_key: wallet.private_key().to_hex(),
        public_key: wallet.public_key().to_hex(),
        address: wallet.address().to_string(),
    }
}

fn wallet_for(seed: &str) -> Wallet<MemoryNode> {
    let seed = Seed::from_hex(seed).unwrap();
    Wallet::new(Arc::new(MemoryNode::new()), seed)
}

fn whole(n: u32) -> BigUint {
    BigUint::from(n) * BigUint::from(10u32).pow(29)
}

const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
const REPEATED_SEED: &str = "4242424242424242424242424242424242424242424242424242424242424242";
const MIXED_SEED: &str = "BF0A1F5B2A6E1F7E2C0D8E3B9B6F0A6A1C5D4E3F2A1B0C9D8E7F6A5B4C3D2E1F";

pub fn generate_all_vectors() -> Vec<GoldenVector> {
    vec![
        generate_vector("zero_seed_first", "All-zero seed, first account", ZERO_SEED, 0),
        generate_vector("zero_seed_second", "All-zero seed, second account", ZERO_SEED, 1),
        generate_vector("repeated_seed_first", "Seed of 0x42 bytes, index 0", REPEATED_SEED, 0),
        generate_vector("repeated_seed_seventh", "Seed of 0x42 bytes, index 7", REPEATED_SEED, 7),
        generate_vector(
            "max_index",
            "Mixed seed at the largest index",
            MIXED_SEED,
            u32::MAX,
        ),
    ]
}

/// (name, private key, public key, address)
const EXPECTED: [(&str, &str, &str, &str); 5] = [
    (
        "zero_seed_first",
        "9F0E444C69F77A49BD0BE89DB92C38FE713E0963165CCA12FAF5712D7657120F",
        "C008B814A7D269A1FA3C6528B19201A24D797912DB9996FF02A1FF356E45552B",
        "ban_3i1aq1cchnmbn9x5rsbap8b15akfh7wj7pwskuzi7ahz8oq6cobd99d4r3b7",
    ),
    (
        "zero_seed_second",
        "B73B723BF7BD042B66AD3332718BA98DE7312F95ED3D05A130C9204552A7AFFF",
        "E30D22B7935BCC25412FC07427391AB4C98A4AD68BAA733300D23D82C9D20AD3",
        "ban_3rrf6cus8pye6o1kzi5n6wwjof8bjb7ff4xcgesi3njxid6x64pms6onw1f9",
    ),
    (
        "repeated_seed_first",
        "8565CD3BD794029F8EF2636101B10FBE98AA02AEA362D304273634586135CDC5",
        "3B3B64CA4C55E71DDEE246739A446D4A66EDBC5767097B68D91BDA89137FDA85",
        "ban_1gsuem76roh95qhg6jmmmb48tkm8xpy7gsrbhfnfk8ytj6bqzpn7qjuuf5au",
    ),
    (
        "repeated_seed_seventh",
        "66615B215C505D93DC17C7EC989D1C2ED47BE8856DDBE4D46C737518AEBCB98A",
        "2A35A2720D8128186C50558603D069AE1D0E9BAB2DAD54C51547AB341CB1D2B5",
        "ban_1cjonbs1u1ba53p71oe81ha8mdix3tftpdffcm4jcjxd8igd5noooib471w7",
    ),
    (
        "max_index",
        "7F352FDCBB944C168A2C74D3F0F5A434BE5BBDE95F3644A7539C5C6B2A7156D7",
        "737D9A359A86148F1CE6B644511BFE2B2A8004CDB386F3A94508635BDDF045B4",
        "ban_1wuxmatso3injwggffk6c6fzwcsci14euew8ygnnc455dhgz1jfn4hc5if9i",
    ),
];

#[test]
fn test_generate_vectors() {
    let vectors = generate_all_vectors();
    assert_eq!(vectors.len(), EXPECTED.len());

    for v in &vectors {
        println!("=== {} ===", v.name);
        println!("  description: {}", v.description);
        println!("  index: {}", v.index);
        println!("  address: {}", v.address);
        println!();
    }
}

#[test]
fn test_vectors_match_known_values() {
    for (v, (name, private_key, public_key, address)) in
        generate_all_vectors().iter().zip(EXPECTED.iter())
    {
        assert_eq!(v.name, *name);
        assert_eq!(v.private_key, *private_key, "private_key mismatch for {}", v.name);
        assert_eq!(v.public_key, *public_key, "public_key mismatch for {}", v.name);
        assert_eq!(v.address, *address, "address mismatch for {}", v.name);
    }
}

#[test]
fn test_vectors_deterministic() {
    let v1 = generate_all_vectors();
    let v2 = generate_all_vectors();

    for (a, b) in v1.iter().zip(v2.iter()) {
        assert_eq!(a.private_key, b.private_key, "private_key mismatch for {}", a.name);
        assert_eq!(a.address, b.address, "address mismatch for {}", a.name);
    }
}

#[test]
fn test_vectors_addresses_parse_back() {
    for v in generate_all_vectors() {
        let address = Address::parse(&v.address).unwrap();
        assert_eq!(address.public_key().to_hex(), v.public_key, "{}", v.name);
        assert_eq!(address.prefix(), BAN_PREFIX);
    }
}

#[test]
fn print_golden_vectors_json() {
    #[derive(Serialize)]
    struct VectorFile {
        description: String,
        prefix: String,
        vectors: Vec<GoldenVector>,
    }

    let file = VectorFile {
        description: "Seed and index to key and address. Every wallet must agree.".to_string(),
        prefix: BAN_PREFIX.to_string(),
        vectors: generate_all_vectors(),
    };

    let json = serde_json::to_string_pretty(&file).unwrap();
    println!("{}", json);
}

// =============================================================================
// TRANSACTION VECTORS
// Blocks produced by the wallet against a fresh in-memory node.
// =============================================================================

#[tokio::test]
async fn test_send_block_vector() {
    let wallet = wallet_for(ZERO_SEED);
    let node = Arc::clone(wallet.node());
    let recipient = Address::parse(EXPECTED[1].3).unwrap();

    // First synthetic frontier of a fresh node
    let frontier = node
        .open_account(&wallet.address(), whole(2), &recipient)
        .await;
    assert_eq!(
        frontier.to_hex(),
        "B16A5007479545A9E139838E1C207282700C6C976F92F89B4093F4A13DA3996E"
    );

    let hash = wallet.send(&recipient, "1", &TxOptions::default()).await.unwrap();
    assert_eq!(
        hash.to_hex(),
        "BFC10060ED84647482B18C6F3E06D121C0ECDB10DCB375630B6D543C87906DC4"
    );

    let processed = node.processed().await;
    let (block, subtype) = &processed[0];
    assert_eq!(*subtype, BlockSubtype::Send);
    assert_eq!(*block.balance(), whole(1));
    assert_eq!(
        block.signature.to_hex(),
        "FCC5C11E8180C35A29A438D9661497D85F2FD2B18E8A30FC587524ADEC641705\
         245343C1057F2C9064F7A8D5FF31D60F94E0B2B3F6945FB881DD79DDDF4D570F"
    );
}

#[tokio::test]
async fn test_send_block_json_shape() {
    let wallet = wallet_for(ZERO_SEED);
    let node = Arc::clone(wallet.node());
    let recipient = Address::parse(EXPECTED[1].3).unwrap();
    node.open_account(&wallet.address(), whole(2), &recipient)
        .await;
    wallet.send(&recipient, "1", &TxOptions::default()).await.unwrap();

    let (block, _) = node.processed().await.remove(0);
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["type"], "state");
    assert_eq!(json["account"], EXPECTED[0].3);
    assert_eq!(json["representative"], EXPECTED[1].3);
    assert_eq!(json["balance"], "100000000000000000000000000000");
    assert_eq!(json["link"], EXPECTED[1].2);
    assert_eq!(json["link_as_account"], EXPECTED[1].3);
    assert!(json.get("work").is_none());
}

#[tokio::test]
async fn test_nano_prefix_changes_only_the_prefix() {
    let config = WalletConfig {
        prefix: "nano_".to_string(),
        ..WalletConfig::default()
    };
    let wallet = wallet_for(ZERO_SEED).with_config(config);
    let address = wallet.address().to_string();
    assert!(address.starts_with("nano_"));
    assert_eq!(&address[5..], &EXPECTED[0].3[4..]);
}

// =============================================================================
// MESSAGE VECTORS
// =============================================================================

#[test]
fn test_message_signature_vector() {
    let wallet = wallet_for(ZERO_SEED);
    let signature = wallet.sign_message("hello banano").unwrap();
    assert_eq!(
        signature.to_hex(),
        "DE16AAF881488F961F079AD92B2C2C59C54B1008366D1F2A69A82E6881B12B14\
         D8A9EAAC89235BC7AA1E4892861055A3A4F14F33B043B466CB4DC8A91092A90D"
    );
    assert!(verify_message(&wallet.public_key(), "hello banano", &signature).is_ok());
}

#[test]
fn test_reject_tampered_message_signature() {
    let wallet = wallet_for(ZERO_SEED);
    let mut bytes = wallet.sign_message("hello banano").unwrap().0;
    bytes[0] ^= 1;
    let signature = Signature::from_bytes(bytes);
    assert!(verify_message(&wallet.public_key(), "hello banano", &signature).is_err());
    assert!(verify_message(&wallet.public_key(), "hello banana", &signature).is_err());
}

