// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

use alloy_chains::NamedChain;
use alloy_primitives::{Address, TxHash, U256};
use alloy_rpc_types::TransactionReceipt;
use alloy_sol_types::SolEvent;
use bon::Builder;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::contracts::cpnft::CPNFT;
use crate::contracts::mock_usdt::MockUSDT;
use crate::contracts::session_key_manager::SessionKeyManager;
use crate::deployment::Deployment;
use crate::error::{CpopError, Result};
use crate::scan::PollingConfig;
use crate::spans;
use crate::traits::{Clock, ReceiptProvider};

/// Suite client for one deployment of the CPOP contracts
///
/// Wraps a receipt provider and a clock behind the trait seams in
/// [`crate::traits`], and layers typed event extraction and receipt
/// polling on top. Contract calls and transaction building live on the
/// per-contract wrappers; this client covers the workflows that read
/// results back out of mined transactions.
///
/// # Example
///
/// ```rust,no_run
/// # use cpop_rs::{Cpop, CpopError, Deployment, PollingConfig};
/// # use cpop_rs::providers::{AlloyReceiptProvider, TokioClock};
/// # use alloy_chains::NamedChain;
/// # use alloy_primitives::FixedBytes;
/// # async fn example() -> Result<(), CpopError> {
/// # use alloy_provider::ProviderBuilder;
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
///
/// let suite = Cpop::builder()
///     .chain(NamedChain::Sepolia)
///     .deployment(Deployment::from_env()?)
///     .provider(AlloyReceiptProvider::new(provider))
///     .clock(TokioClock::new())
///     .build();
///
/// let mint_tx_hash = FixedBytes::from([0u8; 32]);
/// let token_ids = suite.minted_token_ids(mint_tx_hash).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Clone, Debug)]
pub struct Cpop<B: ReceiptProvider, C: Clock> {
    chain: NamedChain,
    deployment: Deployment,
    provider: B,
    clock: C,
}

impl<B: ReceiptProvider, C: Clock> Cpop<B, C> {
    /// Returns the chain this deployment lives on
    pub fn chain(&self) -> NamedChain {
        self.chain
    }

    /// Returns the deployment addresses
    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// Returns the receipt provider
    pub fn provider(&self) -> &B {
        &self.provider
    }

    /// Gets the provider's current block number
    ///
    /// Useful for anchoring a [`ScanRange`](crate::ScanRange) when querying
    /// recent events.
    pub async fn current_block(&self) -> Result<u64> {
        self.provider.get_block_number().await
    }

    /// Gets the CPNFT `Transfer` events emitted by a transaction
    ///
    /// Only logs emitted by the deployment's CPNFT contract are decoded;
    /// MockUSDT transfers in the same transaction are ignored even though
    /// the two events share a topic.
    pub async fn nft_transfers(&self, tx_hash: TxHash) -> Result<Vec<CPNFT::Transfer>> {
        let span = spans::extract_events(tx_hash, "CPNFT", "Transfer");
        let _guard = span.enter();

        let receipt = self.require_receipt(tx_hash).await?;
        let events = decode_contract_events::<CPNFT::Transfer>(&receipt, self.deployment.cpnft)?;

        info!(
            count = events.len(),
            chain = %self.chain,
            event = "nft_transfers_extracted"
        );

        Ok(events)
    }

    /// Gets the ids of tokens minted by a transaction
    ///
    /// A mint is a CPNFT `Transfer` from the zero address.
    pub async fn minted_token_ids(&self, tx_hash: TxHash) -> Result<Vec<U256>> {
        let transfers = self.nft_transfers(tx_hash).await?;
        Ok(transfers
            .into_iter()
            .filter(|transfer| transfer.from == Address::ZERO)
            .map(|transfer| transfer.tokenId)
            .collect())
    }

    /// Gets the MockUSDT `Transfer` events emitted by a transaction
    pub async fn usdt_transfers(&self, tx_hash: TxHash) -> Result<Vec<MockUSDT::Transfer>> {
        let span = spans::extract_events(tx_hash, "MockUSDT", "Transfer");
        let _guard = span.enter();

        let receipt = self.require_receipt(tx_hash).await?;
        decode_contract_events::<MockUSDT::Transfer>(&receipt, self.deployment.mock_usdt)
    }

    /// Gets the `SessionKeyGranted` events emitted by a transaction
    pub async fn session_key_grants(
        &self,
        tx_hash: TxHash,
    ) -> Result<Vec<SessionKeyManager::SessionKeyGranted>> {
        let span = spans::extract_events(tx_hash, "SessionKeyManager", "SessionKeyGranted");
        let _guard = span.enter();

        let receipt = self.require_receipt(tx_hash).await?;
        decode_contract_events::<SessionKeyManager::SessionKeyGranted>(
            &receipt,
            self.deployment.session_key_manager,
        )
    }

    /// Gets the `SessionKeyRevoked` events emitted by a transaction
    pub async fn session_key_revocations(
        &self,
        tx_hash: TxHash,
    ) -> Result<Vec<SessionKeyManager::SessionKeyRevoked>> {
        let span = spans::extract_events(tx_hash, "SessionKeyManager", "SessionKeyRevoked");
        let _guard = span.enter();

        let receipt = self.require_receipt(tx_hash).await?;
        decode_contract_events::<SessionKeyManager::SessionKeyRevoked>(
            &receipt,
            self.deployment.session_key_manager,
        )
    }

    /// Polls the provider until the transaction has a receipt
    ///
    /// Sleeps `poll_interval_secs` between attempts and gives up after
    /// `max_attempts`, returning [`CpopError::ReceiptTimeout`].
    pub async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        polling_config: PollingConfig,
    ) -> Result<TransactionReceipt> {
        let max_attempts = polling_config.max_attempts;
        let poll_interval = polling_config.poll_interval_secs;

        let span = spans::wait_for_receipt(tx_hash, max_attempts, poll_interval);
        let _guard = span.enter();

        info!(
            tx_hash = %tx_hash,
            chain = %self.chain,
            event = "receipt_polling_started"
        );

        for attempt in 1..=max_attempts {
            let attempt_span = spans::get_transaction_receipt(tx_hash, attempt);
            let _attempt_guard = attempt_span.enter();

            match self.provider.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => {
                    info!(
                        tx_hash = %tx_hash,
                        attempt = attempt,
                        block_number = receipt.block_number,
                        event = "receipt_retrieved"
                    );
                    return Ok(receipt);
                }
                Ok(None) => {
                    debug!(
                        tx_hash = %tx_hash,
                        attempt = attempt,
                        event = "receipt_pending"
                    );
                }
                Err(e) => {
                    spans::record_error_with_context(
                        "ReceiptRetrievalFailed",
                        &format!("Failed to get transaction receipt: {e}"),
                        Some(&format!("Attempt {attempt}/{max_attempts}")),
                    );
                    error!(
                        error = %e,
                        attempt = attempt,
                        event = "receipt_retrieval_failed"
                    );
                    return Err(e);
                }
            }

            self.clock.sleep(Duration::from_secs(poll_interval)).await;
        }

        spans::record_error_with_context(
            "ReceiptTimeout",
            &format!("Receipt polling timed out after {max_attempts} attempts"),
            Some(&format!(
                "Total duration: {} seconds",
                polling_config.total_timeout_secs()
            )),
        );
        error!(
            total_duration_secs = polling_config.total_timeout_secs(),
            event = "receipt_timeout"
        );
        Err(CpopError::ReceiptTimeout {
            tx_hash,
            attempts: max_attempts,
        })
    }

    /// Waits for a mint transaction and returns the minted token id
    ///
    /// Verifies that the mined transaction emitted a CPNFT `Transfer` from
    /// the zero address to `to`.
    pub async fn confirm_mint(
        &self,
        tx_hash: TxHash,
        to: Address,
        polling_config: PollingConfig,
    ) -> Result<U256> {
        let receipt = self.wait_for_receipt(tx_hash, polling_config).await?;

        decode_contract_events::<CPNFT::Transfer>(&receipt, self.deployment.cpnft)?
            .into_iter()
            .find(|transfer| transfer.from == Address::ZERO && transfer.to == to)
            .map(|transfer| transfer.tokenId)
            .ok_or_else(|| {
                spans::record_error_with_context(
                    "EventNotFound",
                    "Mint Transfer event not found in transaction logs",
                    Some("The transaction may have reverted or minted to a different address"),
                );
                error!(event = "mint_transfer_not_found");
                CpopError::EventNotFound {
                    event: "Transfer",
                    tx_hash,
                }
            })
    }

    /// Waits for a grant transaction and returns the emitted grant event
    ///
    /// Verifies that the mined transaction emitted `SessionKeyGranted` for
    /// the given wallet and session key.
    pub async fn confirm_session_key_grant(
        &self,
        tx_hash: TxHash,
        wallet: Address,
        session_key: Address,
        polling_config: PollingConfig,
    ) -> Result<SessionKeyManager::SessionKeyGranted> {
        let receipt = self.wait_for_receipt(tx_hash, polling_config).await?;

        decode_contract_events::<SessionKeyManager::SessionKeyGranted>(
            &receipt,
            self.deployment.session_key_manager,
        )?
        .into_iter()
        .find(|granted| granted.wallet == wallet && granted.sessionKey == session_key)
        .ok_or_else(|| {
            spans::record_error_with_context(
                "EventNotFound",
                "SessionKeyGranted event not found in transaction logs",
                Some("The grant may have reverted or targeted a different key"),
            );
            error!(event = "session_key_granted_not_found");
            CpopError::EventNotFound {
                event: "SessionKeyGranted",
                tx_hash,
            }
        })
    }

    async fn require_receipt(&self, tx_hash: TxHash) -> Result<TransactionReceipt> {
        match self.provider.get_transaction_receipt(tx_hash).await? {
            Some(receipt) => Ok(receipt),
            None => {
                spans::record_error_with_context(
                    "TransactionNotFound",
                    "Transaction receipt not found",
                    Some("The transaction may not have been mined yet"),
                );
                error!(tx_hash = %tx_hash, event = "transaction_not_found");
                Err(CpopError::TransactionNotFound { tx_hash })
            }
        }
    }
}

/// Decodes every log in the receipt that `contract` emitted with `E`'s
/// signature topic. Logs from other contracts with the same topic are
/// skipped, as are this contract's other events.
fn decode_contract_events<E: SolEvent>(
    receipt: &TransactionReceipt,
    contract: Address,
) -> Result<Vec<E>> {
    let mut events = Vec::new();
    for log in receipt.inner.logs() {
        if log.address() != contract {
            continue;
        }
        if log.topics().first() != Some(&E::SIGNATURE_HASH) {
            continue;
        }
        events.push(E::decode_log(&log.inner)?.data);
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{event_log, receipt_with_logs, FakeClock, FakeReceiptProvider};
    use alloy_primitives::address;
    use rstest::rstest;

    fn test_deployment() -> Deployment {
        Deployment::builder()
            .cpnft(address!("1111111111111111111111111111111111111111"))
            .mock_usdt(address!("2222222222222222222222222222222222222222"))
            .session_key_manager(address!("3333333333333333333333333333333333333333"))
            .build()
    }

    fn test_suite(provider: FakeReceiptProvider, clock: FakeClock) -> Cpop<FakeReceiptProvider, FakeClock> {
        Cpop::builder()
            .chain(NamedChain::Sepolia)
            .deployment(test_deployment())
            .provider(provider)
            .clock(clock)
            .build()
    }

    #[rstest]
    #[case(NamedChain::Mainnet)]
    #[case(NamedChain::Sepolia)]
    #[case(NamedChain::BinanceSmartChain)]
    fn test_builder_accepts_any_chain(#[case] chain: NamedChain) {
        let suite = Cpop::builder()
            .chain(chain)
            .deployment(test_deployment())
            .provider(FakeReceiptProvider::new())
            .clock(FakeClock::new())
            .build();
        assert_eq!(suite.chain(), chain);
    }

    #[tokio::test]
    async fn test_decode_skips_same_topic_from_other_contract() {
        let provider = FakeReceiptProvider::new();
        let tx_hash = TxHash::from([1u8; 32]);
        let deployment = test_deployment();

        // Same Transfer topic, but emitted by MockUSDT rather than CPNFT
        let usdt_transfer = MockUSDT::Transfer {
            from: Address::ZERO,
            to: address!("00000000000000000000000000000000000000bb"),
            value: U256::from(100),
        };
        let nft_transfer = CPNFT::Transfer {
            from: Address::ZERO,
            to: address!("00000000000000000000000000000000000000bb"),
            tokenId: U256::from(7),
        };
        provider.add_receipt(
            tx_hash,
            receipt_with_logs(
                tx_hash,
                vec![
                    event_log(deployment.mock_usdt, &usdt_transfer),
                    event_log(deployment.cpnft, &nft_transfer),
                ],
            ),
        );

        let suite = test_suite(provider, FakeClock::new());

        let transfers = suite.nft_transfers(tx_hash).await.unwrap();
        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].tokenId, U256::from(7));

        let usdt = suite.usdt_transfers(tx_hash).await.unwrap();
        assert_eq!(usdt.len(), 1);
        assert_eq!(usdt[0].value, U256::from(100));
    }

    #[tokio::test]
    async fn test_nft_transfers_requires_receipt() {
        let provider = FakeReceiptProvider::new();
        let tx_hash = TxHash::from([2u8; 32]);
        provider.add_not_found(tx_hash);

        let suite = test_suite(provider, FakeClock::new());

        let result = suite.nft_transfers(tx_hash).await;
        assert!(matches!(
            result.unwrap_err(),
            CpopError::TransactionNotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_minted_token_ids_ignores_regular_transfers() {
        let provider = FakeReceiptProvider::new();
        let tx_hash = TxHash::from([3u8; 32]);
        let deployment = test_deployment();

        let minted = CPNFT::Transfer {
            from: Address::ZERO,
            to: address!("00000000000000000000000000000000000000bb"),
            tokenId: U256::from(1),
        };
        let moved = CPNFT::Transfer {
            from: address!("00000000000000000000000000000000000000aa"),
            to: address!("00000000000000000000000000000000000000bb"),
            tokenId: U256::from(2),
        };
        provider.add_receipt(
            tx_hash,
            receipt_with_logs(
                tx_hash,
                vec![
                    event_log(deployment.cpnft, &minted),
                    event_log(deployment.cpnft, &moved),
                ],
            ),
        );

        let suite = test_suite(provider, FakeClock::new());

        let token_ids = suite.minted_token_ids(tx_hash).await.unwrap();
        assert_eq!(token_ids, vec![U256::from(1)]);
    }
}
