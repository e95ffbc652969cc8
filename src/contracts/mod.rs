// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! CPOP contract bindings
//!
//! This module contains Alloy-generated contract bindings for the CPOP
//! suite, derived at compile time from the ABI JSON documents under
//! `abis/`.
//!
//! - [`cpnft`] — the CPNFT token (ERC-721 style)
//! - [`mock_usdt`] — the MockUSDT test stablecoin (ERC-20 style)
//! - [`session_key_manager`] — the session key registry
//!
//! ## Public API
//!
//! Contract wrappers provide type-safe, instrumented interfaces:
//!
//! - [`CpnftContract`](cpnft::CpnftContract)
//! - [`MockUsdtContract`](mock_usdt::MockUsdtContract)
//! - [`SessionKeyManagerContract`](session_key_manager::SessionKeyManagerContract)

pub mod cpnft;
pub mod mock_usdt;
pub mod session_key_manager;
