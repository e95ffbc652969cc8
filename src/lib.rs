// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! # cpop-rs
//!
//! A Rust SDK for the CPOP contract suite: the CPNFT token, the MockUSDT
//! test stablecoin, and the SessionKeyManager session-key registry.
//!
//! The contract surface is derived at compile time from the ABI JSON
//! documents under `abis/` via Alloy's `sol!` macro; typed wrappers and a
//! receipt-driven suite client are layered on top.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cpop_rs::{Cpop, CpopError, Deployment, PollingConfig};
//! use cpop_rs::providers::{AlloyReceiptProvider, TokioClock};
//! use alloy_chains::NamedChain;
//! use alloy_primitives::FixedBytes;
//!
//! # async fn example() -> Result<(), CpopError> {
//! # use alloy_provider::ProviderBuilder;
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//!
//! let suite = Cpop::builder()
//!     .chain(NamedChain::Sepolia)
//!     .deployment(Deployment::from_env()?)
//!     .provider(AlloyReceiptProvider::new(provider))
//!     .clock(TokioClock::new())
//!     .build();
//!
//! // Wait for a mint transaction and read the token id back out
//! let mint_tx_hash = FixedBytes::from([0u8; 32]);
//! let recipient = "0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d".parse()?;
//! let token_id = suite
//!     .confirm_mint(mint_tx_hash, recipient, PollingConfig::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Direct Contract Access
//!
//! For calls and transaction building, use the contract wrappers directly:
//!
//! ```rust,no_run
//! use cpop_rs::{CpnftContract, ScanRange, SessionKeyManagerContract};
//! use alloy_primitives::address;
//! use alloy_provider::ProviderBuilder;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
//!
//! let nft = CpnftContract::new(
//!     address!("1111111111111111111111111111111111111111"),
//!     provider,
//! );
//!
//! // Historical events over a block range
//! let range = ScanRange::default().with_from_block(19_000_000);
//! let transfers = nft.transfer_events(range).await?;
//!
//! // Or a live polling subscription
//! let poller = nft.watch_transfers().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Public API
//!
//! - [`Cpop`] - Receipt-driven suite client over one [`Deployment`]
//! - [`CpopError`] and [`Result`] - Error types for error handling
//! - [`ScanRange`] and [`PollingConfig`] - Event query and polling knobs
//! - [`ReceiptProvider`] and [`Clock`] - Trait seams for testability
//! - Contract wrappers for direct contract interaction:
//!   [`CpnftContract`], [`MockUsdtContract`], [`SessionKeyManagerContract`]
//! - Generated bindings for advanced use: [`CPNFT`], [`MockUSDT`],
//!   [`SessionKeyManager`]

mod contracts;
mod deployment;
mod error;
mod scan;
mod suite;
mod traits;

pub use contracts::cpnft::{CpnftContract, CPNFT};
pub use contracts::mock_usdt::{MockUsdtContract, MockUSDT};
pub use contracts::session_key_manager::{
    BatchSessionKeyOp, SessionKeyInfo, SessionKeyManager, SessionKeyManagerContract,
};
pub use deployment::{
    Deployment, CPNFT_ADDRESS_VAR, MOCK_USDT_ADDRESS_VAR, SESSION_KEY_MANAGER_ADDRESS_VAR,
};
pub use error::{CpopError, Result};
pub use scan::{PollingConfig, ScanRange};
pub use suite::Cpop;
pub use traits::{Clock, ReceiptProvider};

// Production trait implementations
pub mod providers;

// Public module for advanced users who need custom instrumentation
pub mod spans;

// Fakes and receipt builders for tests that run without a chain
pub mod testing;
