// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

use alloy_primitives::TxHash;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpopError {
    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("ABI encoding/decoding error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transaction not found: {tx_hash}")]
    TransactionNotFound { tx_hash: TxHash },

    #[error("{event} event not found in transaction {tx_hash}")]
    EventNotFound {
        event: &'static str,
        tx_hash: TxHash,
    },

    #[error("Timed out waiting for receipt of {tx_hash} after {attempts} attempts")]
    ReceiptTimeout { tx_hash: TxHash, attempts: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CpopError>;
