// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! CPNFT contract bindings and wrapper
//!
//! This module contains the Alloy-generated bindings for the CPNFT token
//! contract and a typed wrapper over them. CPNFT follows the ERC-721
//! surface (ownership, approvals, safe transfers) with owner-gated `mint`,
//! `burn`, and `setBaseURI` entry points.

use alloy_contract::{Error as ContractError, EventPoller};
use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_rpc_types::{Log, TransactionRequest};
use alloy_sol_types::sol;
use tracing::{debug, info};
use CPNFT::CPNFTInstance;

use crate::scan::ScanRange;
use crate::spans;

/// The CPNFT contract wrapper
///
/// # Example
///
/// ```rust,no_run
/// use cpop_rs::CpnftContract;
/// use alloy_primitives::{address, U256};
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let nft = CpnftContract::new(
///     address!("1111111111111111111111111111111111111111"),
///     provider,
/// );
///
/// let owner = nft.owner_of(U256::from(1)).await?;
/// let held = nft.balance_of(owner).await?;
/// # Ok(())
/// # }
/// ```
pub struct CpnftContract<P: Provider<Ethereum>> {
    instance: CPNFTInstance<P>,
}

impl<P: Provider<Ethereum>> CpnftContract<P> {
    /// Create a new CPNFT contract wrapper
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "cpnft_contract_initialized"
        );
        Self {
            instance: CPNFTInstance::new(address, provider),
        }
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Get the number of tokens held by an address
    pub async fn balance_of(&self, owner: Address) -> Result<U256, ContractError> {
        debug!(
            owner = %owner,
            contract_address = %self.instance.address(),
            event = "checking_balance"
        );

        let result = self.instance.balanceOf(owner).call().await?;

        info!(
            owner = %owner,
            balance = %result,
            contract_address = %self.instance.address(),
            event = "balance_retrieved"
        );

        Ok(result)
    }

    /// Get the owner of a token
    pub async fn owner_of(&self, token_id: U256) -> Result<Address, ContractError> {
        debug!(
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "checking_token_owner"
        );

        let result = self.instance.ownerOf(token_id).call().await?;

        info!(
            token_id = %token_id,
            owner = %result,
            contract_address = %self.instance.address(),
            event = "token_owner_retrieved"
        );

        Ok(result)
    }

    /// Get the metadata URI of a token
    pub async fn token_uri(&self, token_id: U256) -> Result<String, ContractError> {
        self.instance.tokenURI(token_id).call().await
    }

    /// Get the total number of minted tokens
    pub async fn total_supply(&self) -> Result<U256, ContractError> {
        self.instance.totalSupply().call().await
    }

    /// Get the approved spender of a token, if any
    pub async fn get_approved(&self, token_id: U256) -> Result<Address, ContractError> {
        self.instance.getApproved(token_id).call().await
    }

    /// Check whether an operator is approved for all tokens of an owner
    pub async fn is_approved_for_all(
        &self,
        owner: Address,
        operator: Address,
    ) -> Result<bool, ContractError> {
        self.instance.isApprovedForAll(owner, operator).call().await
    }

    /// Get the contract owner
    pub async fn owner(&self) -> Result<Address, ContractError> {
        self.instance.owner().call().await
    }

    /// Create a transaction request to mint a token
    ///
    /// This creates but does not send the transaction. The caller is
    /// responsible for signing and sending it from the contract owner.
    pub fn mint_transaction(&self, from: Address, to: Address, token_id: U256) -> TransactionRequest {
        let span = spans::mint(&from, &to, self.instance.address());
        let _guard = span.enter();

        info!(
            from = %from,
            to = %to,
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "mint_transaction_created"
        );

        self.instance
            .mint(to, token_id)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to burn a token
    pub fn burn_transaction(&self, from: Address, token_id: U256) -> TransactionRequest {
        info!(
            from = %from,
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "burn_transaction_created"
        );

        self.instance
            .burn(token_id)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to approve a spender for a token
    pub fn approve_transaction(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            to = %to,
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "approve_transaction_created"
        );

        self.instance
            .approve(to, token_id)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to set or clear an operator approval
    pub fn set_approval_for_all_transaction(
        &self,
        from: Address,
        operator: Address,
        approved: bool,
    ) -> TransactionRequest {
        info!(
            from = %from,
            operator = %operator,
            approved = approved,
            contract_address = %self.instance.address(),
            event = "set_approval_for_all_transaction_created"
        );

        self.instance
            .setApprovalForAll(operator, approved)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request for `transferFrom`
    pub fn transfer_from_transaction(
        &self,
        from: Address,
        token_from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            token_from = %token_from,
            to = %to,
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "transfer_from_transaction_created"
        );

        self.instance
            .transferFrom(token_from, to, token_id)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request for `safeTransferFrom`
    pub fn safe_transfer_from_transaction(
        &self,
        from: Address,
        token_from: Address,
        to: Address,
        token_id: U256,
    ) -> TransactionRequest {
        info!(
            from = %from,
            token_from = %token_from,
            to = %to,
            token_id = %token_id,
            contract_address = %self.instance.address(),
            event = "safe_transfer_from_transaction_created"
        );

        self.instance
            .safeTransferFrom(token_from, to, token_id)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to change the base metadata URI
    pub fn set_base_uri_transaction(&self, from: Address, base_uri: String) -> TransactionRequest {
        info!(
            from = %from,
            base_uri = %base_uri,
            contract_address = %self.instance.address(),
            event = "set_base_uri_transaction_created"
        );

        self.instance
            .setBaseURI(base_uri)
            .from(from)
            .into_transaction_request()
    }

    /// Query historical `Transfer` events over a block range
    pub async fn transfer_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(CPNFT::Transfer, Log)>, ContractError> {
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
    ) -> Result<Vec<(CPNFT::Approval, Log)>, ContractError> {
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

    /// Query historical `ApprovalForAll` events over a block range
    pub async fn approval_for_all_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(CPNFT::ApprovalForAll, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "ApprovalForAll",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.ApprovalForAll_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        event.query().await
    }

    /// Subscribe to new `Transfer` events via a polling filter
    ///
    /// The returned poller can be turned into a stream with
    /// [`EventPoller::into_stream`].
    pub async fn watch_transfers(&self) -> Result<EventPoller<CPNFT::Transfer>, ContractError> {
        self.instance
            .Transfer_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `Approval` events via a polling filter
    pub async fn watch_approvals(&self) -> Result<EventPoller<CPNFT::Approval>, ContractError> {
        self.instance
            .Approval_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `ApprovalForAll` events via a polling filter
    pub async fn watch_approval_for_all(
        &self,
    ) -> Result<EventPoller<CPNFT::ApprovalForAll>, ContractError> {
        self.instance
            .ApprovalForAll_filter()
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
    CPNFT,
    "abis/CPNFT.json"
);
