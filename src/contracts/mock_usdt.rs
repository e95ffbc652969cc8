// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! MockUSDT contract bindings and wrapper
//!
//! MockUSDT is the suite's test stablecoin: a 6-decimal ERC-20 with open
//! `mint` and `burn` so test environments can fund accounts at will. The
//! wrapper mirrors [`CpnftContract`](crate::CpnftContract): instrumented
//! view calls, transaction-request builders, and typed event access.

use alloy_contract::{Error as ContractError, EventPoller};
use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{Log, TransactionRequest};
use alloy_sol_types::sol;
use tracing::{debug, info};
use MockUSDT::MockUSDTInstance;

use crate::scan::ScanRange;
use crate::spans;

/// The MockUSDT contract wrapper
///
/// # Example
///
/// ```rust,no_run
/// use cpop_rs::MockUsdtContract;
/// use alloy_primitives::{address, U256};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let usdt = MockUsdtContract::new(
///     address!("2222222222222222222222222222222222222222"),
///     provider,
/// );
///
/// let holder = address!("1234567890123456789012345678901234567890");
/// let balance = usdt.balance_of(holder).await?;
/// if balance < U256::from(1_000_000u64) {
///     let tx = usdt.mint_transaction(holder, holder, U256::from(1_000_000u64));
///     // Send transaction...
/// }
/// # Ok(())
/// # }
/// ```
pub struct MockUsdtContract<P: Provider<Ethereum>> {
    instance: MockUSDTInstance<P>,
}

impl<P: Provider<Ethereum>> MockUsdtContract<P> {
    /// Create a new MockUSDT contract wrapper
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "mock_usdt_contract_initialized"
        );
        Self {
            instance: MockUSDTInstance::new(address, provider),
        }
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Get the token balance of an address
    pub async fn balance_of(&self, account: Address) -> Result<U256, ContractError> {
        debug!(
            account = %account,
            contract_address = %self.instance.address(),
            event = "checking_balance"
        );

        let result = self.instance.balanceOf(account).call().await?;

        info!(
            account = %account,
            balance = %result,
            contract_address = %self.instance.address(),
            event = "balance_retrieved"
        );

        Ok(result)
    }

    /// Get the current allowance for a spender
    pub async fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<U256, ContractError> {
        debug!(
            owner = %owner,
            spender = %spender,
            contract_address = %self.instance.address(),
            event = "checking_allowance"
        );

        let result = self.instance.allowance(owner, spender).call().await?;

        info!(
            owner = %owner,
            spender = %spender,
            allowance = %result,
            contract_address = %self.instance.address(),
            event = "allowance_retrieved"
        );

        Ok(result)
    }

    /// Get the total token supply
    pub async fn total_supply(&self) -> Result<U256, ContractError> {
        self.instance.totalSupply().call().await
    }

    /// Get the token decimals (6 for this deployment)
    pub async fn decimals(&self) -> Result<u8, ContractError> {
        self.instance.decimals().call().await
    }

    /// Create a transaction request to transfer tokens
    pub fn transfer_transaction(
        &self,
        from: Address,
        to: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            to = %to,
            amount = %amount,
            contract_address = %self.instance.address(),
            event = "transfer_transaction_created"
        );

        self.instance
            .transfer(to, amount)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to approve a spender
    pub fn approve_transaction(
        &self,
        from: Address,
        spender: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            spender = %spender,
            amount = %amount,
            contract_address = %self.instance.address(),
            event = "approve_transaction_created"
        );

        self.instance
            .approve(spender, amount)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request for `transferFrom`
    pub fn transfer_from_transaction(
        &self,
        from: Address,
        token_from: Address,
        to: Address,
        amount: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            token_from = %token_from,
            to = %to,
            amount = %amount,
            contract_address = %self.instance.address(),
            event = "transfer_from_transaction_created"
        );

        self.instance
            .transferFrom(token_from, to, amount)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to mint tokens
    ///
    /// Minting is unrestricted on MockUSDT; any account can fund itself on
    /// test networks.
    pub fn mint_transaction(&self, from: Address, to: Address, amount: U256) -> TransactionRequest {
        let span = spans::mint(&from, &to, self.instance.address());
        let _guard = span.enter();

        info!(
            from = %from,
            to = %to,
            amount = %amount,
            contract_address = %self.instance.address(),
            event = "mint_transaction_created"
        );

        self.instance
            .mint(to, amount)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to burn tokens from the sender
    pub fn burn_transaction(&self, from: Address, amount: U256) -> TransactionRequest {
        info!(
            from = %from,
            amount = %amount,
            contract_address = %self.instance.address(),
            event = "burn_transaction_created"
        );

        self.instance
            .burn(amount)
            .from(from)
            .into_transaction_request()
    }

    /// Query historical `Transfer` events over a block range
    pub async fn transfer_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(MockUSDT::Transfer, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "Transfer",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.Transfer_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        let logs = event.query().await?;

        info!(
            count = logs.len(),
            contract_address = %self.instance.address(),
            event = "transfer_events_queried"
        );

        Ok(logs)
    }

    /// Query historical `Approval` events over a block range
    pub async fn approval_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(MockUSDT::Approval, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "Approval",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.Approval_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        event.query().await
    }

    /// Subscribe to new `Transfer` events via a polling filter
    pub async fn watch_transfers(&self) -> Result<EventPoller<MockUSDT::Transfer>, ContractError> {
        self.instance
            .Transfer_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `Approval` events via a polling filter
    pub async fn watch_approvals(&self) -> Result<EventPoller<MockUSDT::Approval>, ContractError> {
        self.instance
            .Approval_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }
}

sol!(
    #[allow(clippy::too_many_arguments)]
    #[allow(missing_docs)]
    #[derive(Debug)]
    #[sol(rpc)]
    MockUSDT,
    "abis/MockUSDT.json"
);
