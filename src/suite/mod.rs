// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Suite client for receipt-driven workflows across the three contracts.

mod client;

pub use client::Cpop;
