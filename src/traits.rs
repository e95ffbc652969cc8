// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Core trait abstractions for suite client operations.
//!
//! This module defines the traits that enable dependency injection and
//! testing of the receipt-driven operations in [`Cpop`](crate::Cpop). By
//! abstracting receipt retrieval and time control behind traits, test code
//! can substitute fakes that simulate missing transactions, slow mining,
//! and RPC failures without a running chain.
//!
//! Production implementations live in [`crate::providers`]; fakes live in
//! [`crate::testing`].

use alloy_primitives::TxHash;
use alloy_rpc_types::TransactionReceipt;
use async_trait::async_trait;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Trait for transaction receipt retrieval.
///
/// # Test Scenarios
///
/// Implementing this trait with fakes enables testing:
/// - Transaction receipt not found
/// - Receipts that appear only after several polls
/// - RPC failures mid-poll
/// - Receipts carrying unexpected or missing event logs
#[async_trait]
pub trait ReceiptProvider: Send + Sync {
    /// Fetches the transaction receipt for a given transaction hash.
    ///
    /// Returns `None` if the transaction is not found or not yet mined.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails or the response cannot be parsed.
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>>;

    /// Gets the current block number.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC call fails.
    async fn get_block_number(&self) -> Result<u64>;
}

/// Trait for time operations.
///
/// Abstracting the clock lets tests fast-forward through polling loops
/// instead of sleeping for real.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant.
    fn now(&self) -> Instant;
}
