//! End-to-end wallet flows against the in-memory node.

use std::sync::Arc;

use lattice_wallet::{LocalWorkProvider, TxOptions, WalletError};
use lattice_wallet_core::{validate_work, BigUint, BlockHash, BlockSubtype};
use lattice_wallet_node::{Node, EASY_WORK_THRESHOLD};
use lattice_wallet_testkit::{faucet, multi_party_fixtures, whole, TestFixture};

#[tokio::test]
async fn test_payment_between_two_wallets() {
    let parties = multi_party_fixtures(2);
    let (alice, bob) = (&parties[0], &parties[1]);
    let opts = TxOptions::default();

    alice.fund(10).await;
    alice.wallet.receive_all(20, "0", &opts).await.unwrap();
    assert_eq!(alice.balance().await, whole(10));

    let send = alice.wallet.send(&bob.address(), "2.5", &opts).await.unwrap();
    let received = bob.wallet.receive_all(20, "0", &opts).await.unwrap();

    assert_eq!(received.len(), 1);
    let expected_alice = whole(75) / BigUint::from(10u32);
    assert_eq!(alice.balance().await, expected_alice);
    assert_eq!(bob.balance().await, whole(25) / BigUint::from(10u32));

    // Bob's open block links to Alice's send
    let processed = bob.node.processed().await;
    let (open, subtype) = processed.last().unwrap();
    assert_eq!(*subtype, BlockSubtype::Receive);
    assert!(open.previous().is_zero());
    assert_eq!(open.body.link.as_block_hash(), send);
}

#[tokio::test]
async fn test_receive_all_chains_blocks() {
    let fixture = TestFixture::with_seed([3; 32]);
    for amount in [1, 2, 3] {
        fixture.fund(amount).await;
    }

    let hashes = fixture
        .wallet
        .receive_all(20, "0", &TxOptions::default())
        .await
        .unwrap();
    assert_eq!(hashes.len(), 3);
    assert_eq!(fixture.balance().await, whole(6));

    let info = fixture.node.account(&fixture.address()).await.unwrap();
    assert_eq!(info.frontier, hashes[2]);

    let processed = fixture.node.processed().await;
    assert!(processed[0].0.previous().is_zero());
    assert_eq!(processed[1].0.previous(), hashes[0]);
    assert_eq!(processed[2].0.previous(), hashes[1]);
}

#[tokio::test]
async fn test_receive_all_respects_count_and_threshold() {
    let fixture = TestFixture::with_seed([4; 32]);
    fixture.fund(1).await;
    fixture.fund(5).await;
    fixture.fund(9).await;

    let opts = TxOptions::default();
    let hashes = fixture.wallet.receive_all(20, "4", &opts).await.unwrap();
    assert_eq!(hashes.len(), 2);
    assert_eq!(fixture.balance().await, whole(14));

    let hashes = fixture.wallet.receive_all(1, "0", &opts).await.unwrap();
    assert_eq!(hashes.len(), 1);
    assert_eq!(fixture.balance().await, whole(15));

    assert!(fixture.wallet.receive_all(20, "0", &opts).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_send_all_empties_account() {
    let fixture = TestFixture::with_seed([5; 32]);
    fixture.open(7).await;

    fixture
        .wallet
        .send_all(&faucet(), &TxOptions::default())
        .await
        .unwrap();

    assert_eq!(fixture.balance().await, BigUint::default());
    let receivable = fixture
        .node
        .receivable(&faucet(), 20, &BigUint::default())
        .await
        .unwrap();
    assert_eq!(receivable.len(), 1);
    assert_eq!(receivable[0].amount, whole(7));
}

#[tokio::test]
async fn test_send_fixed_final_balance() {
    let fixture = TestFixture::with_seed([6; 32]);
    fixture.open(7).await;

    fixture
        .wallet
        .send_fixed_final_bal(&faucet(), "2", &TxOptions::default())
        .await
        .unwrap();
    assert_eq!(fixture.balance().await, whole(2));
}

#[tokio::test]
async fn test_overspend_is_rejected_locally() {
    let fixture = TestFixture::with_seed([7; 32]);
    fixture.open(1).await;

    let result = fixture
        .wallet
        .send(&faucet(), "1.5", &TxOptions::default())
        .await;
    assert!(matches!(result, Err(WalletError::InsufficientFunds { .. })));
    assert!(fixture.node.processed().await.is_empty());
}

#[tokio::test]
async fn test_change_representative_keeps_balance() {
    let parties = multi_party_fixtures(2);
    let (owner, rep) = (&parties[0], &parties[1]);
    owner.open(3).await;

    owner
        .wallet
        .change_rep(&rep.address(), &TxOptions::default())
        .await
        .unwrap();

    let info = owner.node.account(&owner.address()).await.unwrap();
    assert_eq!(info.representative, rep.address());
    assert_eq!(info.balance, whole(3));
}

#[tokio::test]
async fn test_change_representative_of_unopened_account() {
    let fixture = TestFixture::new();
    let result = fixture
        .wallet
        .change_representative(&faucet(), &TxOptions::default())
        .await;
    assert!(matches!(result, Err(WalletError::AccountNotFound(_))));
}

#[tokio::test]
async fn test_local_work_is_attached() {
    let mut fixture = TestFixture::with_seed([2; 32]);
    let provider = Arc::new(LocalWorkProvider::with_threshold(EASY_WORK_THRESHOLD));
    fixture.wallet = fixture.wallet.with_work_provider(provider);
    fixture.fund(1).await;

    fixture
        .wallet
        .receive_all(20, "0", &TxOptions::with_work())
        .await
        .unwrap();

    let (block, _) = fixture.node.processed().await.remove(0);
    let work = block.work.unwrap();
    // The first block of an account roots its work at the public key
    let root = BlockHash::from(fixture.wallet.public_key());
    assert!(validate_work(&root, work, EASY_WORK_THRESHOLD));
}

#[tokio::test]
async fn test_accounts_by_index_are_independent() {
    let mut fixture = TestFixture::with_seed([8; 32]);
    fixture.fund(2).await;

    fixture.wallet.set_index(1);
    let hashes = fixture
        .wallet
        .receive_all(20, "0", &TxOptions::default())
        .await
        .unwrap();
    assert!(hashes.is_empty());

    fixture.wallet.set_index(0);
    let hashes = fixture
        .wallet
        .receive_all(20, "0", &TxOptions::default())
        .await
        .unwrap();
    assert_eq!(hashes.len(), 1);
}

#[tokio::test]
async fn test_offline_node_surfaces_external_error() {
    let fixture = TestFixture::with_seed([9; 32]);
    fixture.node.set_offline(true);

    let result = fixture
        .wallet
        .send(&faucet(), "1", &TxOptions::default())
        .await;
    assert!(matches!(result, Err(WalletError::ExternalQuery(_))));
}
