// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Test utilities and fake implementations for the suite client.
//!
//! This module provides fake implementations of the traits in
//! [`crate::traits`] plus helpers for fabricating receipts that carry
//! encoded event logs, so integration tests can exercise the
//! [`Cpop`](crate::Cpop) client without a running chain.
//!
//! The fakes are designed for adversarial scenarios: transactions that are
//! never mined, receipts that appear only after several polls, RPC failures
//! mid-poll, and receipts whose logs do not contain the expected event.

use alloy_primitives::{Address, Bloom, TxHash};
use alloy_rpc_types::{Log, TransactionReceipt};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::error::{CpopError, Result};
use crate::traits::{Clock, ReceiptProvider};

// ============================================================================
// Fake Receipt Provider
// ============================================================================

/// A fake receipt provider that returns pre-configured transaction receipts.
///
/// This allows testing scenarios like:
/// - Transaction not found
/// - Receipt appearing only after N polls
/// - RPC failures
/// - Receipts with unexpected logs
#[derive(Clone, Debug, Default)]
pub struct FakeReceiptProvider {
    receipts: Arc<Mutex<HashMap<TxHash, Option<TransactionReceipt>>>>,
    pending_polls: Arc<Mutex<HashMap<TxHash, usize>>>,
    failures: Arc<Mutex<Vec<TxHash>>>,
    call_counts: Arc<Mutex<HashMap<TxHash, usize>>>,
    block_number: Arc<Mutex<u64>>,
}

impl FakeReceiptProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction receipt that will be returned for the given hash
    pub fn add_receipt(&self, tx_hash: TxHash, receipt: TransactionReceipt) {
        self.receipts.lock().unwrap().insert(tx_hash, Some(receipt));
    }

    /// Add a receipt that only becomes available after `polls` empty responses
    pub fn add_receipt_after(&self, tx_hash: TxHash, receipt: TransactionReceipt, polls: usize) {
        self.receipts.lock().unwrap().insert(tx_hash, Some(receipt));
        self.pending_polls.lock().unwrap().insert(tx_hash, polls);
    }

    /// Configure a transaction hash to return None (not found)
    pub fn add_not_found(&self, tx_hash: TxHash) {
        self.receipts.lock().unwrap().insert(tx_hash, None);
    }

    /// Configure a transaction hash to return an error
    pub fn add_failure(&self, tx_hash: TxHash) {
        self.failures.lock().unwrap().push(tx_hash);
    }

    /// Set the block number reported by the provider
    pub fn set_block_number(&self, block_number: u64) {
        *self.block_number.lock().unwrap() = block_number;
    }

    /// Number of receipt lookups seen for the given hash
    pub fn get_call_count(&self, tx_hash: TxHash) -> usize {
        self.call_counts
            .lock()
            .unwrap()
            .get(&tx_hash)
            .copied()
            .unwrap_or(0)
    }
}

#[async_trait]
impl ReceiptProvider for FakeReceiptProvider {
    async fn get_transaction_receipt(&self, tx_hash: TxHash) -> Result<Option<TransactionReceipt>> {
        *self
            .call_counts
            .lock()
            .unwrap()
            .entry(tx_hash)
            .or_insert(0) += 1;

        if self.failures.lock().unwrap().contains(&tx_hash) {
            return Err(CpopError::Provider("Simulated RPC error".to_string()));
        }

        if let Some(remaining) = self.pending_polls.lock().unwrap().get_mut(&tx_hash) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(None);
            }
        }

        Ok(self
            .receipts
            .lock()
            .unwrap()
            .get(&tx_hash)
            .cloned()
            .unwrap_or(None))
    }

    async fn get_block_number(&self) -> Result<u64> {
        Ok(*self.block_number.lock().unwrap())
    }
}

// ============================================================================
// Fake Clock
// ============================================================================

/// A fake clock that allows fast-forwarding time in tests.
///
/// This enables testing timeout behavior without actually waiting.
#[derive(Clone, Debug)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Get the total time "slept" by this clock
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Get the number of times sleep was called
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

// ============================================================================
// Receipt builders
// ============================================================================

/// Build a log carrying the given event, as emitted by `address`.
pub fn event_log<E: SolEvent>(address: Address, event: &E) -> Log {
    Log {
        inner: alloy_primitives::Log {
            address,
            data: event.encode_log_data(),
        },
        block_hash: None,
        block_number: None,
        block_timestamp: None,
        transaction_hash: None,
        transaction_index: None,
        log_index: None,
        removed: false,
    }
}

/// Build a successful transaction receipt carrying the given logs.
pub fn receipt_with_logs(tx_hash: TxHash, logs: Vec<Log>) -> TransactionReceipt {
    TransactionReceipt {
        inner: alloy_rpc_types::ReceiptEnvelope::Legacy(alloy_rpc_types::ReceiptWithBloom {
            receipt: alloy_rpc_types::Receipt {
                status: true.into(),
                cumulative_gas_used: 21_000,
                logs,
            },
            logs_bloom: Bloom::ZERO,
        }),
        transaction_hash: tx_hash,
        transaction_index: Some(0),
        block_hash: None,
        block_number: Some(1),
        gas_used: 21_000,
        effective_gas_price: 0,
        blob_gas_used: None,
        blob_gas_price: None,
        from: Address::ZERO,
        to: None,
        contract_address: None,
    }
}
