//! Lifecycle State Machine.
//!
//! [`WalletManager`] is the single owner of [`ConnectionState`] for a page
//! session. It negotiates connect/disconnect with the provider, restores a
//! previous connection silently on startup, and mirrors every transition
//! into the [`PersistenceBridge`].
//!
//! # Cancellation
//!
//! Each `connect()` and the restore probe hold a ticket from a generation
//! counter. `disconnect()` (including a provider-forced one) and any newer
//! `connect()` advance the counter, and an operation whose ticket is stale
//! drops its provider responses instead of writing them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use serde_json::json;

use crate::address::Address;
use crate::chain::chain_id_from_value;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::provider::{Provider, accounts_from_value, methods};
use crate::state::{ConnectionState, ConnectionStatus};
use crate::storage::{KeyValueStore, PersistedSnapshot, PersistenceBridge};
use crate::task::Spawner;

type Observer = Rc<dyn Fn(&ConnectionState)>;

/// Result of [`WalletManager::connect`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected(Address),
    /// Recorded in `last_error`; state is `Disconnected`.
    Failed(WalletError),
    /// A disconnect or newer connect started while this one was in flight.
    Superseded,
}

/// Result of [`WalletManager::restore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored(Address),
    /// The persisted disconnect flag is set; the provider was not queried.
    OptedOut,
    NoProvider,
    NoAccounts,
    /// Probe error; logged, never surfaced as a user-visible error.
    Failed(WalletError),
    Superseded,
    AlreadyRan,
}

/// Provider-side revocation attempts, tried in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevocationMethod {
    /// `wallet_revokePermissions` for `eth_accounts`.
    RevokePermissions,
    /// `wallet_requestPermissions` with an empty permission set.
    ResetPermissions,
    /// Bare `eth_requestAccounts`, result discarded.
    RequestAccounts,
    /// Remove every listener registered on the provider.
    ClearListeners,
}

impl RevocationMethod {
    pub const CHAIN: [RevocationMethod; 4] = [
        Self::RevokePermissions,
        Self::ResetPermissions,
        Self::RequestAccounts,
        Self::ClearListeners,
    ];

    async fn attempt<P: Provider>(self, provider: &P) -> Result<(), WalletError> {
        match self {
            Self::RevokePermissions => provider
                .request(methods::REVOKE_PERMISSIONS, Some(json!([{ "eth_accounts": {} }])))
                .await
                .map(drop),
            Self::ResetPermissions => provider
                .request(methods::REQUEST_PERMISSIONS, Some(json!([])))
                .await
                .map(drop),
            Self::RequestAccounts => provider
                .request(methods::REQUEST_ACCOUNTS, None)
                .await
                .map(drop),
            Self::ClearListeners => provider.clear_listeners(),
        }
    }
}

/// Result of the provider-side half of a disconnect.
///
/// Local state is always cleared regardless of this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevocationOutcome {
    Revoked(RevocationMethod),
    /// No provider injected, so there was no grant to revoke.
    NoProvider,
    /// Every method in [`RevocationMethod::CHAIN`] failed.
    Failed,
}

impl RevocationOutcome {
    pub fn is_revoked(&self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Walk the revocation chain; the first method that succeeds wins.
pub(crate) async fn revoke_grant<P: Provider>(provider: Rc<P>) -> RevocationOutcome {
    if !provider.is_available() {
        return RevocationOutcome::NoProvider;
    }

    for method in RevocationMethod::CHAIN {
        match method.attempt(provider.as_ref()).await {
            Ok(()) => {
                info!("wallet: provider grant revoked via {:?}", method);
                return RevocationOutcome::Revoked(method);
            }
            Err(e) => debug!("wallet: revocation via {:?} failed: {}", method, e),
        }
    }

    warn!("wallet: all revocation methods failed; local state is cleared anyway");
    RevocationOutcome::Failed
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Ticket(u64);

pub(crate) struct Inner<P, S> {
    pub(crate) provider: Rc<P>,
    persistence: PersistenceBridge<S>,
    spawner: Box<dyn Spawner>,
    config: WalletConfig,
    state: RefCell<ConnectionState>,
    generation: Cell<u64>,
    restored: Cell<bool>,
    observers: RefCell<Vec<Observer>>,
}

/// Handle to the wallet lifecycle. Clones share the same state.
pub struct WalletManager<P, S> {
    pub(crate) inner: Rc<Inner<P, S>>,
}

impl<P, S> Clone for WalletManager<P, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<P, S> WalletManager<P, S>
where
    P: Provider + 'static,
    S: KeyValueStore + 'static,
{
    pub fn new(provider: P, store: S, spawner: impl Spawner + 'static, config: WalletConfig) -> Self {
        let persistence = PersistenceBridge::new(store, config.keys.clone());
        Self {
            inner: Rc::new(Inner {
                provider: Rc::new(provider),
                persistence,
                spawner: Box::new(spawner),
                config,
                state: RefCell::new(ConnectionState::default()),
                generation: Cell::new(0),
                restored: Cell::new(false),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ConnectionState {
        self.inner.state.borrow().clone()
    }

    pub fn config(&self) -> &WalletConfig {
        &self.inner.config
    }

    pub fn is_provider_available(&self) -> bool {
        self.inner.provider.is_available()
    }

    /// True once storage failed and state lives in memory only.
    pub fn is_persistence_degraded(&self) -> bool {
        self.inner.persistence.is_degraded()
    }

    /// Register a callback invoked with the new state after every transition.
    pub fn on_change(&self, observer: impl Fn(&ConnectionState) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    // ------------------------------------------------------------------------
    // Connect
    // ------------------------------------------------------------------------

    /// Request a connection, prompting the user through the provider.
    ///
    /// Never panics and never leaves a failure unrecorded: errors land in
    /// `last_error` and the machine returns to `Disconnected`.
    pub async fn connect(&self) -> ConnectOutcome {
        if !self.is_provider_available() {
            let err = WalletError::ProviderMissing;
            self.transition(|s| s.last_error = Some(err.to_string()));
            return ConnectOutcome::Failed(err);
        }

        let ticket = self.next_ticket();
        info!("wallet: connecting");
        self.transition(|s| {
            s.status = ConnectionStatus::Connecting;
            s.account = None;
            s.chain_id = None;
            s.last_error = None;
            s.user_disconnected = false;
        });

        let result = self.first_account(methods::REQUEST_ACCOUNTS).await;
        if !self.is_current(ticket) {
            debug!("wallet: connect superseded while awaiting accounts");
            return ConnectOutcome::Superseded;
        }

        let address = match result {
            Ok(address) => address,
            Err(e) => {
                warn!("wallet: connect failed: {}", e);
                self.transition(|s| {
                    s.status = ConnectionStatus::Disconnected;
                    s.last_error = Some(e.to_string());
                });
                return ConnectOutcome::Failed(e);
            }
        };

        let chain_id = self.query_chain_id().await;
        if !self.is_current(ticket) {
            debug!("wallet: connect superseded while awaiting chain id");
            return ConnectOutcome::Superseded;
        }

        self.inner.persistence.clear_disconnected();
        self.transition(|s| {
            s.status = ConnectionStatus::Connected;
            s.account = Some(address.clone());
            s.chain_id = chain_id;
        });
        info!("wallet: connected {}", address);
        ConnectOutcome::Connected(address)
    }

    // ------------------------------------------------------------------------
    // Disconnect
    // ------------------------------------------------------------------------

    /// Clear local state unconditionally, then try to revoke the grant.
    ///
    /// Idempotent. The return value reports only the provider-side
    /// revocation; local disconnect always succeeds.
    pub async fn disconnect(&self) -> RevocationOutcome {
        self.disconnect_local();
        let outcome = revoke_grant(Rc::clone(&self.inner.provider)).await;
        if !outcome.is_revoked() {
            info!("wallet: disconnect partially successful - local state cleared");
        }
        outcome
    }

    /// Synchronous half of a disconnect: cancel, clear, persist the opt-out.
    pub(crate) fn disconnect_local(&self) {
        self.next_ticket();
        self.transition(|s| {
            *s = ConnectionState {
                user_disconnected: true,
                ..ConnectionState::default()
            };
        });
        self.inner.persistence.mark_disconnected();
    }

    /// Run the provider revocation chain as a detached task.
    pub(crate) fn spawn_revocation(&self) {
        let revocation = revoke_grant(Rc::clone(&self.inner.provider));
        self.inner.spawner.spawn_local(Box::pin(async move {
            let outcome = revocation.await;
            debug!("wallet: background revocation finished: {:?}", outcome);
        }));
    }

    // ------------------------------------------------------------------------
    // Auto-restore
    // ------------------------------------------------------------------------

    /// Silently restore a previous connection. Runs at most once.
    pub async fn restore(&self) -> RestoreOutcome {
        if self.inner.restored.replace(true) {
            return RestoreOutcome::AlreadyRan;
        }

        let snapshot = self.inner.persistence.load();
        if snapshot.user_disconnected {
            info!("wallet: user disconnected previously; skipping auto-restore");
            self.transition(|s| s.user_disconnected = true);
            return RestoreOutcome::OptedOut;
        }

        if !self.is_provider_available() {
            return RestoreOutcome::NoProvider;
        }

        let ticket = self.current_ticket();
        let result = self.first_account(methods::ACCOUNTS).await;
        if !self.is_current(ticket) {
            return RestoreOutcome::Superseded;
        }

        let address = match result {
            Ok(address) => address,
            Err(WalletError::EmptyAccountSet) => {
                if snapshot.connected {
                    debug!("wallet: persisted session is stale; clearing it");
                    self.inner.persistence.save(&self.state());
                }
                return RestoreOutcome::NoAccounts;
            }
            Err(e) => {
                warn!("wallet: failed to check wallet connection: {}", e);
                return RestoreOutcome::Failed(e);
            }
        };

        let chain_id = self.query_chain_id().await;
        if !self.is_current(ticket) {
            return RestoreOutcome::Superseded;
        }

        self.transition(|s| {
            s.status = ConnectionStatus::Connected;
            s.account = Some(address.clone());
            s.chain_id = chain_id;
        });
        info!("wallet: restored session for {}", address);
        RestoreOutcome::Restored(address)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    async fn first_account(&self, method: &str) -> Result<Address, WalletError> {
        let value = self.inner.provider.request(method, None).await?;
        let accounts = accounts_from_value(&value)?;
        let first = accounts.first().ok_or(WalletError::EmptyAccountSet)?;
        Address::parse(first)
    }

    /// Chain id lookup; failure is logged and leaves the chain unknown.
    async fn query_chain_id(&self) -> Option<u64> {
        let result = self
            .inner
            .provider
            .request(methods::CHAIN_ID, None)
            .await
            .and_then(|v| chain_id_from_value(&v));

        result
            .inspect_err(|e| warn!("wallet: failed to get chain id: {}", e))
            .ok()
    }

    /// Apply `update`, persist if the mirrored fields changed, notify.
    pub(crate) fn transition(&self, update: impl FnOnce(&mut ConnectionState)) {
        let (before, after) = {
            let mut state = self.inner.state.borrow_mut();
            let before = PersistedSnapshot::from_state(&state);
            update(&mut state);
            (before, state.clone())
        };

        if PersistedSnapshot::from_state(&after) != before {
            self.inner.persistence.save(&after);
        }

        let observers = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&after);
        }
    }

    pub(crate) fn status(&self) -> ConnectionStatus {
        self.inner.state.borrow().status
    }

    /// True if `address` is the current account, ignoring casing.
    pub(crate) fn holds_account(&self, address: &Address) -> bool {
        self.inner
            .state
            .borrow()
            .account
            .as_ref()
            .is_some_and(|current| current.same_account(address))
    }

    fn next_ticket(&self) -> Ticket {
        let next = self.inner.generation.get() + 1;
        self.inner.generation.set(next);
        Ticket(next)
    }

    fn current_ticket(&self) -> Ticket {
        Ticket(self.inner.generation.get())
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.inner.generation.get() == ticket.0
    }
}
