// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Alloy-based receipt provider implementation.

use alloy_network::Ethereum;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionReceipt;
use async_trait::async_trait;
use tracing::{instrument, trace};

use crate::error::{CpopError, Result};
use crate::traits::ReceiptProvider;

/// Production receipt provider wrapping Alloy's [`Provider`] trait.
///
/// Adapts an Alloy provider to the [`ReceiptProvider`] trait so the suite
/// client can be driven by any Alloy transport in production and by fakes
/// in tests.
///
/// # Examples
///
/// ```rust,no_run
/// use cpop_rs::providers::AlloyReceiptProvider;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let receipts = AlloyReceiptProvider::new(provider);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AlloyReceiptProvider<P>
where
    P: Provider<Ethereum> + Clone,
{
    provider: P,
}

impl<P> AlloyReceiptProvider<P>
where
    P: Provider<Ethereum> + Clone,
{
    /// Creates a new [`AlloyReceiptProvider`] wrapping the given provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns a reference to the underlying Alloy provider.
    pub fn inner(&self) -> &P {
        &self.provider
    }
}

#[async_trait]
impl<P> ReceiptProvider for AlloyReceiptProvider<P>
where
    P: Provider<Ethereum> + Clone + Send + Sync,
{
    #[instrument(skip(self), fields(tx_hash = %tx_hash))]
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
        trace!("Fetching transaction receipt");
        self.provider
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| CpopError::Provider(e.to_string()))
    }

    #[instrument(skip(self))]
    async fn get_block_number(&self) -> Result<u64> {
        trace!("Fetching block number");
        self.provider
            .get_block_number()
            .await
            .map_err(|e| CpopError::Provider(e.to_string()))
    }
}
