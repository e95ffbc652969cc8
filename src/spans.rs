// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! OpenTelemetry span helpers for suite operations.
//!
//! This module provides orthogonal span instrumentation following production
//! best practices: static span names, structured attributes, and separation
//! from business logic.
//!
//! These span helpers are used internally by the [`Cpop`](crate::Cpop)
//! client but are exposed publicly for advanced users who need custom
//! instrumentation or want to integrate with existing OpenTelemetry setups.
//!
//! # Example
//!
//! ```rust,no_run
//! use cpop_rs::spans;
//! use alloy_primitives::FixedBytes;
//!
//! let tx_hash = FixedBytes::from([0u8; 32]);
//! let span = spans::wait_for_receipt(tx_hash, 30, 2);
//! let _guard = span.enter();
//! // Your custom polling logic here
//! ```

use alloy_primitives::{Address, TxHash};
use tracing::Span;

/// Create span for extracting typed events from a transaction receipt.
///
/// Parent: Top-level operation span (auto-attached by tracing)
/// Children: Provider RPC calls (from alloy instrumentation)
#[inline]
pub fn extract_events(tx_hash: TxHash, contract: &str, event: &str) -> Span {
    tracing::info_span!(
        "cpop_rs.extract_events",
        tx_hash = %tx_hash,
        contract = contract,
        event = event,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a historical event query over a block range.
///
/// Parent: Top-level operation span
/// Children: Provider RPC calls (eth_getLogs)
#[inline]
pub fn scan_events(
    contract_address: &Address,
    event: &str,
    from_block: Option<u64>,
    to_block: Option<u64>,
) -> Span {
    tracing::debug_span!(
        "cpop_rs.scan_events",
        contract_address = %contract_address,
        event = event,
        from_block = from_block,
        to_block = to_block,
    )
}

/// Create span for the receipt polling loop.
///
/// Parent: Top-level operation span
/// Children: cpop_rs.get_transaction_receipt (multiple attempts)
#[inline]
pub fn wait_for_receipt(tx_hash: TxHash, max_attempts: u32, poll_interval_secs: u64) -> Span {
    tracing::info_span!(
        "cpop_rs.wait_for_receipt",
        tx_hash = %tx_hash,
        max_attempts = max_attempts,
        poll_interval_secs = poll_interval_secs,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.source = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for a single receipt retrieval attempt.
///
/// Parent: cpop_rs.wait_for_receipt
/// Children: Provider RPC calls
#[inline]
pub fn get_transaction_receipt(tx_hash: TxHash, attempt: u32) -> Span {
    tracing::debug_span!(
        "cpop_rs.get_transaction_receipt",
        tx_hash = %tx_hash,
        attempt = attempt,
    )
}

/// Create span for NFT mint transaction creation.
///
/// Parent: Top-level operation span
/// Children: Contract call preparation spans
#[inline]
pub fn mint(from_address: &Address, to: &Address, contract_address: &Address) -> Span {
    tracing::info_span!(
        "cpop_rs.mint",
        from_address = %from_address,
        to = %to,
        contract_address = %contract_address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for session key grant transaction creation.
///
/// Parent: Top-level operation span
/// Children: Contract call preparation spans
#[inline]
pub fn grant_session_key(
    wallet: &Address,
    session_key: &Address,
    contract_address: &Address,
) -> Span {
    tracing::info_span!(
        "cpop_rs.grant_session_key",
        wallet = %wallet,
        session_key = %session_key,
        contract_address = %contract_address,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        error.context = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
/// - error.source: Optional error chain context
///
/// # Example
///
/// ```rust,no_run
/// use cpop_rs::spans;
/// use cpop_rs::CpopError;
///
/// # fn example() -> Result<(), CpopError> {
/// let span = tracing::info_span!("cpop_rs.operation");
/// let _guard = span.enter();
///
/// let result = some_operation();
/// if let Err(ref e) = result {
///     spans::record_error(e);
/// }
/// result
/// # }
/// # fn some_operation() -> Result<(), CpopError> { Ok(()) }
/// ```
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = tracing::Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");

    // Record error chain if available
    if let Some(source) = error.source() {
        current_span.record("error.source", source.to_string());
    }
}

/// Record error attributes with custom context on the current span.
///
/// This variant allows adding additional context fields to the error.
pub fn record_error_with_context(
    error_type: &str,
    error_message: &str,
    additional_context: Option<&str>,
) {
    let current_span = tracing::Span::current();
    current_span.record("error.type", error_type);
    current_span.record("error.message", error_message);
    current_span.record("otel.status_code", "ERROR");

    if let Some(context) = additional_context {
        current_span.record("error.context", context);
    }
}
