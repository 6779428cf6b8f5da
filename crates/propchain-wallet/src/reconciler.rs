//! Event Reconciler.
//!
//! Folds provider-originated `accountsChanged` / `chainChanged`
//! notifications into the lifecycle state. Handlers hold only a weak
//! reference to the manager, and [`EventSubscription`] removes them when it
//! is detached or dropped, so a torn-down UI never receives stale calls.

use std::rc::{Rc, Weak};

use log::{debug, info, warn};

use crate::address::Address;
use crate::chain::parse_chain_id;
use crate::error::WalletError;
use crate::lifecycle::{Inner, WalletManager};
use crate::provider::{EventHandler, EventKind, ListenerId, Provider, ProviderEvent};
use crate::state::ConnectionStatus;
use crate::storage::KeyValueStore;

/// Live provider subscriptions owned by one UI instance.
pub struct EventSubscription<P: Provider> {
    provider: Rc<P>,
    listeners: Vec<(EventKind, ListenerId)>,
}

impl<P: Provider> EventSubscription<P> {
    /// Unsubscribe every handler. Dropping the subscription does the same.
    pub fn detach(mut self) {
        self.unsubscribe_all();
    }

    fn unsubscribe_all(&mut self) {
        for (kind, id) in self.listeners.drain(..) {
            if let Err(e) = self.provider.unsubscribe(kind, id) {
                debug!("wallet: failed to remove {} listener: {}", kind, e);
            }
        }
    }
}

impl<P: Provider> Drop for EventSubscription<P> {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

impl<P, S> WalletManager<P, S>
where
    P: Provider + 'static,
    S: KeyValueStore + 'static,
{
    /// Subscribe the account and chain change handlers.
    pub fn attach_events(&self) -> Result<EventSubscription<P>, WalletError> {
        let mut subscription = EventSubscription {
            provider: Rc::clone(&self.inner.provider),
            listeners: Vec::with_capacity(2),
        };

        for kind in [EventKind::AccountsChanged, EventKind::ChainChanged] {
            let id = self
                .inner
                .provider
                .subscribe(kind, self.event_handler())?;
            subscription.listeners.push((kind, id));
        }

        Ok(subscription)
    }

    fn event_handler(&self) -> EventHandler {
        let weak: Weak<Inner<P, S>> = Rc::downgrade(&self.inner);
        Rc::new(move |event| match weak.upgrade() {
            Some(inner) => WalletManager { inner }.handle_event(event),
            None => debug!("wallet: event after teardown ignored"),
        })
    }

    /// Apply one provider notification to the current state.
    pub fn handle_event(&self, event: ProviderEvent) {
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.apply_accounts(&accounts),
            ProviderEvent::ChainChanged(raw) => self.apply_chain(&raw),
        }
    }

    fn apply_accounts(&self, accounts: &[String]) {
        let Some(first) = accounts.first() else {
            info!("wallet: provider revoked access; disconnecting");
            self.disconnect_local();
            self.spawn_revocation();
            return;
        };

        let status = self.status();
        if status != ConnectionStatus::Connected {
            debug!("wallet: account change while {:?} ignored", status);
            return;
        }

        let address = match Address::parse(first) {
            Ok(address) => address,
            Err(e) => {
                warn!("wallet: ignoring account change: {}", e);
                return;
            }
        };

        if self.holds_account(&address) {
            debug!("wallet: account change to the current account ignored");
            return;
        }

        self.transition(|s| s.account = Some(address));
    }

    /// Chain id is recorded in every status; only `account` is tied to it.
    fn apply_chain(&self, raw: &str) {
        match parse_chain_id(raw) {
            Ok(chain_id) => self.transition(|s| s.chain_id = Some(chain_id)),
            Err(e) => warn!("wallet: ignoring chain change: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalletConfig;
    use crate::lifecycle::{ConnectOutcome, RestoreOutcome};
    use crate::mock::{FakeProvider, MemoryStore, QueueSpawner};
    use crate::provider::methods;
    use serde_json::json;

    const ADDR: &str = "0x1234567890abcdef1234567890abcdef12345678";
    const OTHER: &str = "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd";

    fn setup() -> (
        WalletManager<FakeProvider, MemoryStore>,
        FakeProvider,
        MemoryStore,
        QueueSpawner,
    ) {
        let provider = FakeProvider::with_accounts(&[ADDR], "0x1");
        let store = MemoryStore::new();
        let spawner = QueueSpawner::new();
        let wallet = WalletManager::new(
            provider.clone(),
            store.clone(),
            spawner.clone(),
            WalletConfig::default(),
        );
        (wallet, provider, store, spawner)
    }

    #[tokio::test]
    async fn test_account_switch_updates_in_place() {
        let (wallet, provider, store, _) = setup();
        let _subscription = wallet.attach_events().unwrap();
        wallet.connect().await;
        let calls_before = provider.calls().len();

        provider.emit(ProviderEvent::AccountsChanged(vec![OTHER.to_string()]));

        let state = wallet.state();
        assert!(state.is_connected());
        assert_eq!(state.address().map(|a| a.as_str()), Some(OTHER));
        assert_eq!(state.chain_id(), Some(1));
        assert_eq!(store.value("walletAddress").as_deref(), Some(OTHER));
        // No chain id re-fetch.
        assert_eq!(provider.calls().len(), calls_before);
    }

    #[tokio::test]
    async fn test_empty_account_list_forces_disconnect() {
        let (wallet, provider, store, spawner) = setup();
        let _subscription = wallet.attach_events().unwrap();
        wallet.connect().await;
        provider.respond(methods::REVOKE_PERMISSIONS, json!(null));

        provider.emit(ProviderEvent::AccountsChanged(vec![]));

        let state = wallet.state();
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(state.user_disconnected);
        assert_eq!(store.value("walletDisconnected").as_deref(), Some("true"));

        assert_eq!(spawner.pending(), 1);
        spawner.run_pending().await;
        assert!(provider.calls().contains(&methods::REVOKE_PERMISSIONS.to_string()));
    }

    #[tokio::test]
    async fn test_empty_account_list_while_disconnected_sets_opt_out() {
        let (wallet, provider, store, spawner) = setup();
        let _subscription = wallet.attach_events().unwrap();
        provider.respond(methods::REVOKE_PERMISSIONS, json!(null));

        provider.emit(ProviderEvent::AccountsChanged(vec![]));

        let state = wallet.state();
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(state.is_disconnected());
        assert_eq!(store.value("walletDisconnected").as_deref(), Some("true"));

        assert_eq!(spawner.pending(), 1);
        spawner.run_pending().await;
        assert!(provider.calls().contains(&methods::REVOKE_PERMISSIONS.to_string()));
    }

    #[tokio::test]
    async fn test_opt_out_from_empty_account_list_blocks_restore() {
        let (wallet, provider, _, _) = setup();
        let _subscription = wallet.attach_events().unwrap();

        provider.emit(ProviderEvent::AccountsChanged(vec![]));

        assert_eq!(wallet.restore().await, RestoreOutcome::OptedOut);
        assert!(!provider.calls().contains(&methods::ACCOUNTS.to_string()));
    }

    #[tokio::test]
    async fn test_account_change_while_disconnected_is_ignored() {
        let (wallet, provider, _, _) = setup();
        let _subscription = wallet.attach_events().unwrap();

        provider.emit(ProviderEvent::AccountsChanged(vec![OTHER.to_string()]));

        assert!(!wallet.state().is_connected());
        assert_eq!(wallet.state().account, None);
    }

    #[tokio::test]
    async fn test_empty_account_list_mid_connect_supersedes_connect() {
        let (wallet, provider, _, _) = setup();
        let _subscription = wallet.attach_events().unwrap();
        let gate = provider.hold(methods::REQUEST_ACCOUNTS);

        let (outcome, _) = tokio::join!(wallet.connect(), async {
            provider.emit(ProviderEvent::AccountsChanged(vec![]));
            gate.open();
        });

        assert_eq!(outcome, ConnectOutcome::Superseded);
        assert!(!wallet.state().is_connected());
        assert!(wallet.state().user_disconnected);
    }

    #[tokio::test]
    async fn test_chain_change_updates_chain_only() {
        let (wallet, provider, store, _) = setup();
        let _subscription = wallet.attach_events().unwrap();
        wallet.connect().await;

        provider.emit(ProviderEvent::ChainChanged("0x89".to_string()));

        let state = wallet.state();
        assert_eq!(state.chain_id(), Some(137));
        assert_eq!(state.address().map(|a| a.as_str()), Some(ADDR));
        assert_eq!(store.value("chainId").as_deref(), Some("0x89"));
    }

    #[test]
    fn test_chain_change_while_disconnected_is_recorded() {
        let (wallet, provider, store, _) = setup();
        let _subscription = wallet.attach_events().unwrap();

        provider.emit(ProviderEvent::ChainChanged("0x89".to_string()));

        let state = wallet.state();
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert_eq!(state.chain_id(), Some(137));
        assert_eq!(state.account, None);
        assert_eq!(store.value("chainId").as_deref(), Some("0x89"));
    }

    #[tokio::test]
    async fn test_same_account_in_other_casing_is_not_a_change() {
        let (wallet, provider, store, _) = setup();
        let _subscription = wallet.attach_events().unwrap();
        wallet.connect().await;

        let observed = Rc::new(std::cell::Cell::new(0));
        let counter = Rc::clone(&observed);
        wallet.on_change(move |_| counter.set(counter.get() + 1));

        let shouted = ADDR.to_uppercase().replace("0X", "0x");
        provider.emit(ProviderEvent::AccountsChanged(vec![shouted]));

        assert_eq!(observed.get(), 0);
        assert_eq!(wallet.state().address().map(|a| a.as_str()), Some(ADDR));
        assert_eq!(store.value("walletAddress").as_deref(), Some(ADDR));
    }

    #[tokio::test]
    async fn test_malformed_chain_change_is_ignored() {
        let (wallet, provider, _, _) = setup();
        let _subscription = wallet.attach_events().unwrap();
        wallet.connect().await;

        provider.emit(ProviderEvent::ChainChanged("mainnet".to_string()));
        assert_eq!(wallet.state().chain_id(), Some(1));
    }

    #[test]
    fn test_detach_removes_listeners() {
        let (wallet, provider, _, _) = setup();
        let subscription = wallet.attach_events().unwrap();
        assert_eq!(provider.listener_count(), 2);

        subscription.detach();
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_drop_removes_listeners() {
        let (wallet, provider, _, _) = setup();
        {
            let _subscription = wallet.attach_events().unwrap();
            assert_eq!(provider.listener_count(), 2);
        }
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_events_after_manager_dropped_are_ignored() {
        let (wallet, provider, _, _) = setup();
        let subscription = wallet.attach_events().unwrap();
        drop(wallet);

        provider.emit(ProviderEvent::ChainChanged("0x1".to_string()));
        drop(subscription);
        assert_eq!(provider.listener_count(), 0);
    }

    #[test]
    fn test_attach_without_provider_fails() {
        let wallet = WalletManager::new(
            FakeProvider::missing(),
            MemoryStore::new(),
            QueueSpawner::new(),
            WalletConfig::default(),
        );
        assert!(matches!(
            wallet.attach_events(),
            Err(WalletError::ProviderUnavailable)
        ));
    }
}
