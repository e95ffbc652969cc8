// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! Block range and polling configuration for event access.

/// Block range applied to historical event queries.
///
/// Bounds are optional; an unset bound leaves the node's default in place
/// (earliest for `from_block`, latest for `to_block`).
///
/// # Examples
///
/// ```rust
/// use cpop_rs::ScanRange;
///
/// // Everything the node has
/// let range = ScanRange::default();
///
/// // A bounded window
/// let range = ScanRange::default().with_from_block(19_000_000).with_to_block(19_000_100);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanRange {
    /// First block to include, if bounded.
    pub from_block: Option<u64>,
    /// Last block to include, if bounded.
    pub to_block: Option<u64>,
}

impl ScanRange {
    /// Bounds the range to start at the given block.
    pub fn with_from_block(mut self, block: u64) -> Self {
        self.from_block = Some(block);
        self
    }

    /// Bounds the range to end at the given block.
    pub fn with_to_block(mut self, block: u64) -> Self {
        self.to_block = Some(block);
        self
    }
}

/// Configuration for receipt polling behavior.
///
/// Controls how the suite client polls the receipt provider while waiting
/// for a transaction to be mined.
///
/// # Examples
///
/// ```rust
/// use cpop_rs::PollingConfig;
///
/// // Use defaults (30 attempts, 2 second intervals)
/// let config = PollingConfig::default();
///
/// // Customize polling behavior
/// let config = PollingConfig::default()
///     .with_max_attempts(10)
///     .with_poll_interval_secs(6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollingConfig {
    /// Maximum number of polling attempts before giving up.
    pub max_attempts: u32,
    /// Seconds to wait between polling attempts.
    pub poll_interval_secs: u64,
}

impl Default for PollingConfig {
    /// Creates a polling configuration suitable for a ~12 second block time.
    ///
    /// - `max_attempts`: 30
    /// - `poll_interval_secs`: 2
    ///
    /// This results in a maximum wait of one minute, several blocks' worth
    /// of headroom on mainnet and generous headroom on faster chains.
    fn default() -> Self {
        Self {
            max_attempts: 30,
            poll_interval_secs: 2,
        }
    }
}

impl PollingConfig {
    /// Sets the maximum number of polling attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Sets the interval between polling attempts in seconds.
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.poll_interval_secs = secs;
        self
    }

    /// Returns the total maximum wait time in seconds.
    ///
    /// This is calculated as `max_attempts * poll_interval_secs`.
    pub fn total_timeout_secs(&self) -> u64 {
        self.max_attempts as u64 * self.poll_interval_secs
    }
}
