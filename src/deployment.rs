// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Deployment configuration for the CPOP contract suite.
//!
//! The suite contracts have no canonical cross-chain addresses; every
//! environment (local anvil node, testnet, production) deploys its own set.
//! A [`Deployment`] records the three addresses and can be built directly,
//! loaded from a JSON manifest, or read from the environment.

use alloy_primitives::Address;
use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{CpopError, Result};

/// Environment variable holding the CPNFT contract address.
pub const CPNFT_ADDRESS_VAR: &str = "CPNFT_ADDRESS";

/// Environment variable holding the MockUSDT contract address.
pub const MOCK_USDT_ADDRESS_VAR: &str = "MOCK_USDT_ADDRESS";

/// Environment variable holding the SessionKeyManager contract address.
pub const SESSION_KEY_MANAGER_ADDRESS_VAR: &str = "SESSION_KEY_MANAGER_ADDRESS";

/// Addresses of one deployed instance of the contract suite.
///
/// # Examples
///
/// ```rust
/// use cpop_rs::Deployment;
/// use alloy_primitives::address;
///
/// let deployment = Deployment::builder()
///     .cpnft(address!("1111111111111111111111111111111111111111"))
///     .mock_usdt(address!("2222222222222222222222222222222222222222"))
///     .session_key_manager(address!("3333333333333333333333333333333333333333"))
///     .build();
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
    /// Address of the CPNFT token contract.
    pub cpnft: Address,
    /// Address of the MockUSDT token contract.
    pub mock_usdt: Address,
    /// Address of the SessionKeyManager contract.
    pub session_key_manager: Address,
}

impl Deployment {
    /// Parses a deployment manifest from a JSON string.
    ///
    /// The manifest shape matches the serde derivation:
    ///
    /// ```json
    /// {
    ///   "cpnft": "0x...",
    ///   "mock_usdt": "0x...",
    ///   "session_key_manager": "0x..."
    /// }
    /// ```
    pub fn from_json_str(manifest: &str) -> Result<Self> {
        Ok(serde_json::from_str(manifest)?)
    }

    /// Reads a deployment from the environment.
    ///
    /// Loads a `.env` file if one is present, then reads
    /// `CPNFT_ADDRESS`, `MOCK_USDT_ADDRESS`, and
    /// `SESSION_KEY_MANAGER_ADDRESS`.
    ///
    /// # Errors
    ///
    /// Returns [`CpopError::InvalidConfig`] if a variable is unset and
    /// [`CpopError::Hex`] if one does not parse as an address.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self {
            cpnft: env_address(CPNFT_ADDRESS_VAR)?,
            mock_usdt: env_address(MOCK_USDT_ADDRESS_VAR)?,
            session_key_manager: env_address(SESSION_KEY_MANAGER_ADDRESS_VAR)?,
        })
    }
}

fn env_address(var: &str) -> Result<Address> {
    let raw = std::env::var(var)
        .map_err(|_| CpopError::InvalidConfig(format!("{var} is not set")))?;
    Ok(raw.trim().parse()?)
}
