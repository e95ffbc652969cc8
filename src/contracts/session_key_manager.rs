// SPDX-FileCopyrightText: 2026 cpop-rs contributors
//
// SPDX-License-Identifier: Apache-2.0

//! SessionKeyManager contract bindings and wrapper
//!
//! The SessionKeyManager contract is a registry of delegated session keys
//! for account-abstraction wallets. A wallet (or an authorized caller on
//! its behalf) grants a session key a validity window and a permissions
//! digest; validators consult the registry when deciding whether a session
//! key may sign for the wallet. Batch maintenance goes through
//! `batchUpdateSessionKeys`, where an op with `validUntil == 0` revokes.

use alloy_contract::{Error as ContractError, EventPoller};
use alloy_network::Ethereum;
use alloy_primitives::{aliases::U48, Address, B256};
use alloy_provider::Provider;
use alloy_rpc_types::{Log, TransactionRequest};
use alloy_sol_types::sol;
use tracing::{debug, info};
use SessionKeyManager::SessionKeyManagerInstance;

use crate::scan::ScanRange;
use crate::spans;

pub use ISessionKeyManager::BatchSessionKeyOp;

/// Registered validity window and permissions of one session key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeyInfo {
    /// Earliest timestamp at which the key is valid.
    pub valid_after: U48,
    /// Timestamp after which the key is no longer valid. Zero means the key
    /// is not registered (or has been revoked).
    pub valid_until: U48,
    /// Digest of the permission set granted to the key.
    pub permissions: B256,
}

/// The SessionKeyManager contract wrapper
///
/// # Example
///
/// ```rust,no_run
/// use cpop_rs::SessionKeyManagerContract;
/// use alloy_primitives::address;
/// use alloy_provider::ProviderBuilder;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = ProviderBuilder::new().connect("http://localhost:8545").await?;
/// let manager = SessionKeyManagerContract::new(
///     address!("3333333333333333333333333333333333333333"),
///     provider,
/// );
///
/// let wallet = address!("1234567890123456789012345678901234567890");
/// let session_key = address!("0987654321098765432109876543210987654321");
/// if manager.is_session_key_valid(wallet, session_key).await? {
///     let info = manager.session_key_info(wallet, session_key).await?;
///     println!("valid until {}", info.valid_until);
/// }
/// # Ok(())
/// # }
/// ```
pub struct SessionKeyManagerContract<P: Provider<Ethereum>> {
    instance: SessionKeyManagerInstance<P>,
}

impl<P: Provider<Ethereum>> SessionKeyManagerContract<P> {
    /// Create a new SessionKeyManager contract wrapper
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "session_key_manager_contract_initialized"
        );
        Self {
            instance: SessionKeyManagerInstance::new(address, provider),
        }
    }

    /// Returns the contract address
    pub fn address(&self) -> Address {
        *self.instance.address()
    }

    /// Check whether a session key is currently valid for a wallet
    pub async fn is_session_key_valid(
        &self,
        wallet: Address,
        session_key: Address,
    ) -> Result<bool, ContractError> {
        debug!(
            wallet = %wallet,
            session_key = %session_key,
            contract_address = %self.instance.address(),
            event = "checking_session_key_validity"
        );

        let result = self
            .instance
            .isSessionKeyValid(wallet, session_key)
            .call()
            .await?;

        info!(
            wallet = %wallet,
            session_key = %session_key,
            valid = result,
            contract_address = %self.instance.address(),
            event = "session_key_validity_retrieved"
        );

        Ok(result)
    }

    /// Get the registered window and permissions of a session key
    ///
    /// A `valid_until` of zero means the key is not registered.
    pub async fn session_key_info(
        &self,
        wallet: Address,
        session_key: Address,
    ) -> Result<SessionKeyInfo, ContractError> {
        let result = self
            .instance
            .sessionKeyInfo(wallet, session_key)
            .call()
            .await?;

        Ok(SessionKeyInfo {
            valid_after: result.validAfter,
            valid_until: result.validUntil,
            permissions: result.permissions,
        })
    }

    /// Check whether an address may grant and revoke on behalf of wallets
    pub async fn is_authorized_caller(&self, caller: Address) -> Result<bool, ContractError> {
        self.instance.isAuthorizedCaller(caller).call().await
    }

    /// Get the contract owner
    pub async fn owner(&self) -> Result<Address, ContractError> {
        self.instance.owner().call().await
    }

    /// Create a transaction request to grant a session key
    ///
    /// This creates but does not send the transaction. The caller is
    /// responsible for signing and sending it from the wallet or an
    /// authorized caller.
    pub fn grant_session_key_transaction(
        &self,
        from: Address,
        wallet: Address,
        session_key: Address,
        valid_after: U48,
        valid_until: U48,
        permissions: B256,
    ) -> TransactionRequest {
        let span = spans::grant_session_key(&wallet, &session_key, self.instance.address());
        let _guard = span.enter();

        info!(
            from = %from,
            wallet = %wallet,
            session_key = %session_key,
            valid_after = %valid_after,
            valid_until = %valid_until,
            contract_address = %self.instance.address(),
            event = "grant_session_key_transaction_created"
        );

        self.instance
            .grantSessionKey(wallet, session_key, valid_after, valid_until, permissions)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to revoke a session key
    pub fn revoke_session_key_transaction(
        &self,
        from: Address,
        wallet: Address,
        session_key: Address,
    ) -> TransactionRequest {
        info!(
            from = %from,
            wallet = %wallet,
            session_key = %session_key,
            contract_address = %self.instance.address(),
            event = "revoke_session_key_transaction_created"
        );

        self.instance
            .revokeSessionKey(wallet, session_key)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request applying a batch of grant/revoke ops
    ///
    /// An op with `validUntil == 0` revokes; any other op grants or updates.
    pub fn batch_update_session_keys_transaction(
        &self,
        from: Address,
        ops: Vec<BatchSessionKeyOp>,
    ) -> TransactionRequest {
        info!(
            from = %from,
            op_count = ops.len(),
            contract_address = %self.instance.address(),
            event = "batch_update_session_keys_transaction_created"
        );

        self.instance
            .batchUpdateSessionKeys(ops)
            .from(from)
            .into_transaction_request()
    }

    /// Create a transaction request to add or remove an authorized caller
    pub fn set_authorized_caller_transaction(
        &self,
        from: Address,
        caller: Address,
        authorized: bool,
    ) -> TransactionRequest {
        info!(
            from = %from,
            caller = %caller,
            authorized = authorized,
            contract_address = %self.instance.address(),
            event = "set_authorized_caller_transaction_created"
        );

        self.instance
            .setAuthorizedCaller(caller, authorized)
            .from(from)
            .into_transaction_request()
    }

    /// Query historical `SessionKeyGranted` events over a block range
    pub async fn session_key_granted_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(SessionKeyManager::SessionKeyGranted, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "SessionKeyGranted",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.SessionKeyGranted_filter();
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
            event = "session_key_granted_events_queried"
        );

        Ok(logs)
    }

    /// Query historical `SessionKeyRevoked` events over a block range
    pub async fn session_key_revoked_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(SessionKeyManager::SessionKeyRevoked, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "SessionKeyRevoked",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.SessionKeyRevoked_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        event.query().await
    }

    /// Query historical `BatchSessionKeysUpdated` events over a block range
    pub async fn batch_session_keys_updated_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(SessionKeyManager::BatchSessionKeysUpdated, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "BatchSessionKeysUpdated",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.BatchSessionKeysUpdated_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        event.query().await
    }

    /// Query historical `AuthorizedCallerUpdated` events over a block range
    pub async fn authorized_caller_updated_events(
        &self,
        range: ScanRange,
    ) -> Result<Vec<(SessionKeyManager::AuthorizedCallerUpdated, Log)>, ContractError> {
        let span = spans::scan_events(
            self.instance.address(),
            "AuthorizedCallerUpdated",
            range.from_block,
            range.to_block,
        );
        let _guard = span.enter();

        let mut event = self.instance.AuthorizedCallerUpdated_filter();
        if let Some(from_block) = range.from_block {
            event = event.from_block(from_block);
        }
        if let Some(to_block) = range.to_block {
            event = event.to_block(to_block);
        }
        event.query().await
    }

    /// Subscribe to new `SessionKeyGranted` events via a polling filter
    pub async fn watch_session_key_granted(
        &self,
    ) -> Result<EventPoller<SessionKeyManager::SessionKeyGranted>, ContractError> {
        self.instance
            .SessionKeyGranted_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `SessionKeyRevoked` events via a polling filter
    pub async fn watch_session_key_revoked(
        &self,
    ) -> Result<EventPoller<SessionKeyManager::SessionKeyRevoked>, ContractError> {
        self.instance
            .SessionKeyRevoked_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `BatchSessionKeysUpdated` events via a polling filter
    pub async fn watch_batch_session_keys_updated(
        &self,
    ) -> Result<EventPoller<SessionKeyManager::BatchSessionKeysUpdated>, ContractError> {
        self.instance
            .BatchSessionKeysUpdated_filter()
            .watch()
            .await
            .map_err(ContractError::from)
    }

    /// Subscribe to new `AuthorizedCallerUpdated` events via a polling filter
    pub async fn watch_authorized_caller_updated(
        &self,
    ) -> Result<EventPoller<SessionKeyManager::AuthorizedCallerUpdated>, ContractError> {
        self.instance
            .AuthorizedCallerUpdated_filter()
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
    SessionKeyManager,
    "abis/SessionKeyManager.json"
);

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, hex, TxKind, B256};
    use alloy_provider::ProviderBuilder;
    use alloy_sol_types::{SolCall, SolEvent};
    use rstest::rstest;

    fn test_contract() -> SessionKeyManagerContract<impl Provider<Ethereum> + Clone> {
        let provider =
            ProviderBuilder::new().connect_http("http://localhost:8545".parse().unwrap());
        SessionKeyManagerContract::new(
            address!("3333333333333333333333333333333333333333"),
            provider,
        )
    }

    #[rstest]
    #[case(
        SessionKeyManager::SessionKeyGranted::SIGNATURE,
        "SessionKeyGranted(address,address,uint48,uint48,bytes32)"
    )]
    #[case(
        SessionKeyManager::SessionKeyRevoked::SIGNATURE,
        "SessionKeyRevoked(address,address)"
    )]
    #[case(
        SessionKeyManager::BatchSessionKeysUpdated::SIGNATURE,
        "BatchSessionKeysUpdated(address,uint256,uint256)"
    )]
    #[case(
        SessionKeyManager::AuthorizedCallerUpdated::SIGNATURE,
        "AuthorizedCallerUpdated(address,bool)"
    )]
    fn test_event_signatures(#[case] signature: &str, #[case] expected: &str) {
        assert_eq!(signature, expected);
    }

    #[test]
    fn test_grant_transaction_calldata() {
        let manager = test_contract();
        let sender = address!("00000000000000000000000000000000000000aa");
        let wallet = address!("00000000000000000000000000000000000000bb");
        let session_key = address!("00000000000000000000000000000000000000cc");
        let permissions = B256::from([0x42; 32]);

        let tx = manager.grant_session_key_transaction(
            sender,
            wallet,
            session_key,
            U48::from(100u64),
            U48::from(200u64),
            permissions,
        );

        assert_eq!(tx.from, Some(sender));
        assert_eq!(tx.to, Some(TxKind::Call(manager.address())));
        let input = tx.input.input().expect("grant calldata");
        let decoded = SessionKeyManager::grantSessionKeyCall::abi_decode(input).unwrap();
        assert_eq!(decoded.wallet, wallet);
        assert_eq!(decoded.sessionKey, session_key);
        assert_eq!(decoded.validAfter, U48::from(100u64));
        assert_eq!(decoded.validUntil, U48::from(200u64));
        assert_eq!(decoded.permissions, permissions);
    }

    #[test]
    fn test_batch_update_round_trips_ops() {
        let manager = test_contract();
        let sender = address!("00000000000000000000000000000000000000aa");
        let ops = vec![
            BatchSessionKeyOp {
                wallet: address!("00000000000000000000000000000000000000bb"),
                sessionKey: address!("00000000000000000000000000000000000000cc"),
                validAfter: U48::from(0u64),
                validUntil: U48::from(500u64),
                permissions: B256::from([0x01; 32]),
            },
            // validUntil == 0 marks a revocation
            BatchSessionKeyOp {
                wallet: address!("00000000000000000000000000000000000000bb"),
                sessionKey: address!("00000000000000000000000000000000000000dd"),
                validAfter: U48::from(0u64),
                validUntil: U48::from(0u64),
                permissions: B256::ZERO,
            },
        ];

        let tx = manager.batch_update_session_keys_transaction(sender, ops.clone());

        let input = tx.input.input().expect("batch calldata");
        let decoded = SessionKeyManager::batchUpdateSessionKeysCall::abi_decode(input).unwrap();
        assert_eq!(decoded.ops.len(), 2);
        assert_eq!(decoded.ops[0].sessionKey, ops[0].sessionKey);
        assert_eq!(decoded.ops[1].validUntil, U48::from(0u64));
    }

    #[test]
    fn test_batch_op_visible_at_crate_root() {
        // BatchSessionKeyOp is generated under the interface namespace but
        // re-exported here and at the crate root
        let op = crate::BatchSessionKeyOp {
            wallet: Address::ZERO,
            sessionKey: Address::ZERO,
            validAfter: U48::from(0u64),
            validUntil: U48::from(0u64),
            permissions: B256::ZERO,
        };
        assert_eq!(op.validUntil, U48::from(0u64));
    }

    #[test]
    fn test_watch_granted_yields_contract_error() {
        fn assert_output<F>(_: &F)
        where
            F: std::future::Future<
                Output = Result<EventPoller<SessionKeyManager::SessionKeyGranted>, ContractError>,
            >,
        {
        }
        let manager = test_contract();
        let fut = manager.watch_session_key_granted();
        assert_output(&fut);
    }

    #[test]
    fn test_granted_event_encodes_wallet_and_key_as_topics() {
        let event = SessionKeyManager::SessionKeyGranted {
            wallet: address!("00000000000000000000000000000000000000bb"),
            sessionKey: address!("00000000000000000000000000000000000000cc"),
            validAfter: U48::from(1u64),
            validUntil: U48::from(2u64),
            permissions: B256::from([0x42; 32]),
        };
        let log_data = event.encode_log_data();
        // selector + two indexed addresses
        assert_eq!(log_data.topics().len(), 3);
        insta::assert_snapshot!(
            hex::encode(SessionKeyManager::SessionKeyGranted::SIGNATURE_HASH),
            @"0a69d79cdbb91e0ca3d4f37263b779de2ed80370f0bf36853f5fe5ad84631157"
        );
    }
}
