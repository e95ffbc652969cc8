// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the suite client using fake implementations
//!
//! These tests exercise the receipt-driven workflows through the trait
//! seams: polling behavior under slow mining and RPC failures, and typed
//! event extraction from fabricated receipts, all without a running chain.

use alloy_chains::NamedChain;
use alloy_primitives::{address, aliases::U48, Address, TxHash, B256, U256};
use cpop_rs::testing::{event_log, receipt_with_logs, FakeClock, FakeReceiptProvider};
use cpop_rs::{Cpop, CpopError, Deployment, PollingConfig, CPNFT, SessionKeyManager};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn test_deployment() -> Deployment {
    Deployment::builder()
        .cpnft(address!("1111111111111111111111111111111111111111"))
        .mock_usdt(address!("2222222222222222222222222222222222222222"))
        .session_key_manager(address!("3333333333333333333333333333333333333333"))
        .build()
}

/// Helper function to create a test suite client with fake providers
fn create_test_suite(
    provider: FakeReceiptProvider,
    clock: FakeClock,
) -> Cpop<FakeReceiptProvider, FakeClock> {
    Cpop::builder()
        .chain(NamedChain::Sepolia)
        .deployment(test_deployment())
        .provider(provider)
        .clock(clock)
        .build()
}

#[tokio::test]
async fn test_current_block_reflects_provider() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    fake_provider.set_block_number(19_000_123);

    let suite = create_test_suite(fake_provider, FakeClock::new());

    assert_eq!(suite.current_block().await.unwrap(), 19_000_123);
}

#[tokio::test]
async fn test_receipt_timeout_with_fake_clock() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let fake_clock = FakeClock::new();
    let tx_hash = TxHash::from([1u8; 32]);

    fake_provider.add_not_found(tx_hash);

    let suite = create_test_suite(fake_provider.clone(), fake_clock.clone());

    let max_attempts = 5;
    let poll_interval = 2;
    let config = PollingConfig::default()
        .with_max_attempts(max_attempts)
        .with_poll_interval_secs(poll_interval);

    let result = suite.wait_for_receipt(tx_hash, config).await;

    assert!(
        matches!(
            result.unwrap_err(),
            CpopError::ReceiptTimeout { attempts, .. } if attempts == max_attempts
        ),
        "Expected ReceiptTimeout error"
    );

    assert_eq!(
        fake_clock.sleep_count(),
        max_attempts as usize,
        "Should have slept once per attempt"
    );
    assert_eq!(
        fake_clock.total_sleep_time(),
        Duration::from_secs(poll_interval * max_attempts as u64),
        "Total sleep time should match poll_interval * max_attempts"
    );
    assert_eq!(
        fake_provider.get_call_count(tx_hash),
        max_attempts as usize,
        "Should have polled the provider max_attempts times"
    );
}

#[tokio::test]
async fn test_receipt_found_after_delayed_mining() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let fake_clock = FakeClock::new();
    let tx_hash = TxHash::from([2u8; 32]);

    fake_provider.add_receipt_after(tx_hash, receipt_with_logs(tx_hash, vec![]), 2);

    let suite = create_test_suite(fake_provider.clone(), fake_clock.clone());

    let receipt = suite
        .wait_for_receipt(tx_hash, PollingConfig::default())
        .await
        .expect("receipt should appear on third poll");

    assert_eq!(receipt.transaction_hash, tx_hash);
    assert_eq!(fake_provider.get_call_count(tx_hash), 3);
    assert_eq!(fake_clock.sleep_count(), 2, "Slept only before the hit");
}

#[tokio::test]
async fn test_rpc_failure_aborts_polling() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let fake_clock = FakeClock::new();
    let tx_hash = TxHash::from([3u8; 32]);

    fake_provider.add_failure(tx_hash);

    let suite = create_test_suite(fake_provider.clone(), fake_clock.clone());

    let result = suite.wait_for_receipt(tx_hash, PollingConfig::default()).await;

    assert!(matches!(result.unwrap_err(), CpopError::Provider(_)));
    assert_eq!(
        fake_provider.get_call_count(tx_hash),
        1,
        "RPC errors should not be retried"
    );
    assert_eq!(fake_clock.sleep_count(), 0);
}

#[tokio::test]
async fn test_confirm_mint_returns_token_id() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let tx_hash = TxHash::from([4u8; 32]);
    let deployment = test_deployment();
    let recipient = address!("00000000000000000000000000000000000000bb");

    let minted = CPNFT::Transfer {
        from: Address::ZERO,
        to: recipient,
        tokenId: U256::from(42),
    };
    fake_provider.add_receipt(
        tx_hash,
        receipt_with_logs(tx_hash, vec![event_log(deployment.cpnft, &minted)]),
    );

    let suite = create_test_suite(fake_provider, FakeClock::new());

    let token_id = suite
        .confirm_mint(tx_hash, recipient, PollingConfig::default())
        .await
        .expect("mint should confirm");

    assert_eq!(token_id, U256::from(42));
}

#[tokio::test]
async fn test_confirm_mint_rejects_wrong_recipient() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let tx_hash = TxHash::from([5u8; 32]);
    let deployment = test_deployment();

    let minted = CPNFT::Transfer {
        from: Address::ZERO,
        to: address!("00000000000000000000000000000000000000bb"),
        tokenId: U256::from(42),
    };
    fake_provider.add_receipt(
        tx_hash,
        receipt_with_logs(tx_hash, vec![event_log(deployment.cpnft, &minted)]),
    );

    let suite = create_test_suite(fake_provider, FakeClock::new());

    let result = suite
        .confirm_mint(
            tx_hash,
            address!("00000000000000000000000000000000000000cc"),
            PollingConfig::default(),
        )
        .await;

    assert!(matches!(
        result.unwrap_err(),
        CpopError::EventNotFound {
            event: "Transfer",
            ..
        }
    ));
}

#[tokio::test]
async fn test_confirm_session_key_grant() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let tx_hash = TxHash::from([6u8; 32]);
    let deployment = test_deployment();
    let wallet = address!("00000000000000000000000000000000000000bb");
    let session_key = address!("00000000000000000000000000000000000000cc");

    let granted = SessionKeyManager::SessionKeyGranted {
        wallet,
        sessionKey: session_key,
        validAfter: U48::from(100u64),
        validUntil: U48::from(200u64),
        permissions: B256::from([0x42; 32]),
    };
    fake_provider.add_receipt(
        tx_hash,
        receipt_with_logs(
            tx_hash,
            vec![event_log(deployment.session_key_manager, &granted)],
        ),
    );

    let suite = create_test_suite(fake_provider, FakeClock::new());

    let event = suite
        .confirm_session_key_grant(tx_hash, wallet, session_key, PollingConfig::default())
        .await
        .expect("grant should confirm");

    assert_eq!(event.validUntil, U48::from(200u64));
    assert_eq!(event.permissions, B256::from([0x42; 32]));
}

#[tokio::test]
async fn test_confirm_session_key_grant_missing_event() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let tx_hash = TxHash::from([7u8; 32]);
    let deployment = test_deployment();
    let wallet = address!("00000000000000000000000000000000000000bb");
    let session_key = address!("00000000000000000000000000000000000000cc");

    // The transaction revoked instead of granting
    let revoked = SessionKeyManager::SessionKeyRevoked {
        wallet,
        sessionKey: session_key,
    };
    fake_provider.add_receipt(
        tx_hash,
        receipt_with_logs(
            tx_hash,
            vec![event_log(deployment.session_key_manager, &revoked)],
        ),
    );

    let suite = create_test_suite(fake_provider, FakeClock::new());

    let result = suite
        .confirm_session_key_grant(tx_hash, wallet, session_key, PollingConfig::default())
        .await;

    assert!(matches!(
        result.unwrap_err(),
        CpopError::EventNotFound {
            event: "SessionKeyGranted",
            ..
        }
    ));

    let revocations = suite.session_key_revocations(tx_hash).await.unwrap();
    assert_eq!(revocations.len(), 1);
    assert_eq!(revocations[0].sessionKey, session_key);
}

#[tokio::test]
async fn test_extraction_across_contracts_in_one_transaction() {
    init_tracing();
    let fake_provider = FakeReceiptProvider::new();
    let tx_hash = TxHash::from([8u8; 32]);
    let deployment = test_deployment();
    let buyer = address!("00000000000000000000000000000000000000bb");
    let seller = address!("00000000000000000000000000000000000000aa");

    // A sale: USDT payment plus NFT handover in one transaction
    let payment = cpop_rs::MockUSDT::Transfer {
        from: buyer,
        to: seller,
        value: U256::from(5_000_000u64),
    };
    let handover = CPNFT::Transfer {
        from: seller,
        to: buyer,
        tokenId: U256::from(9),
    };
    fake_provider.add_receipt(
        tx_hash,
        receipt_with_logs(
            tx_hash,
            vec![
                event_log(deployment.mock_usdt, &payment),
                event_log(deployment.cpnft, &handover),
            ],
        ),
    );

    let suite = create_test_suite(fake_provider, FakeClock::new());

    let nft = suite.nft_transfers(tx_hash).await.unwrap();
    assert_eq!(nft.len(), 1);
    assert_eq!(nft[0].tokenId, U256::from(9));

    let usdt = suite.usdt_transfers(tx_hash).await.unwrap();
    assert_eq!(usdt.len(), 1);
    assert_eq!(usdt[0].value, U256::from(5_000_000u64));

    // Nothing minted here
    let minted = suite.minted_token_ids(tx_hash).await.unwrap();
    assert!(minted.is_empty());
}
