//! Browser wallet wiring.
//!
//! Builds the [`WalletManager`] over `window.ethereum` and localStorage and
//! mirrors its state into a signal so components stay reactive.

use leptos::prelude::*;
use leptos::reactive::owner::LocalStorage;
use log::{debug, info, warn};
use propchain_wallet::browser::{EthereumProvider, LocalStorageStore, WasmSpawner};
use propchain_wallet::{
    ConnectOutcome, ConnectionState, EventSubscription, RestoreOutcome, WalletManager,
};
use wasm_bindgen_futures::spawn_local;

use crate::config::wallet_config;

pub type BrowserWallet = WalletManager<EthereumProvider, LocalStorageStore>;

/// Reactive view of the wallet plus the actions components may trigger.
///
/// `Copy` because both fields are arena handles.
#[derive(Clone, Copy)]
pub struct WalletHandle {
    /// Mirror of the manager's state, updated after every transition.
    pub state: RwSignal<ConnectionState>,
    manager: StoredValue<BrowserWallet, LocalStorage>,
}

impl WalletHandle {
    pub fn new() -> Self {
        let config = wallet_config();
        let manager = WalletManager::new(
            EthereumProvider::new(&config),
            LocalStorageStore,
            WasmSpawner,
            config,
        );

        let state = RwSignal::new(manager.state());
        manager.on_change(move |next| {
            // Signal is gone once the root owner is disposed
            if state.try_set(next.clone()).is_some() {
                debug!("wallet: state change after teardown dropped");
            }
        });

        Self {
            state,
            manager: StoredValue::new_local(manager),
        }
    }

    fn manager(&self) -> BrowserWallet {
        self.manager.get_value()
    }

    pub fn is_provider_available(&self) -> bool {
        self.manager.with_value(|m| m.is_provider_available())
    }

    /// Button/badge label using the configured address slice. Reactive.
    pub fn display_name(&self) -> String {
        let state = self.state;
        self.manager
            .with_value(|m| state.with(|s| s.display_name_with(m.config())))
    }

    /// True once localStorage failed and the session lives in memory only.
    pub fn is_persistence_degraded(&self) -> bool {
        self.manager.with_value(|m| m.is_persistence_degraded())
    }

    /// Attach the event reconciler and schedule auto-restore.
    ///
    /// The returned subscription must be held for as long as events should
    /// be applied; dropping it detaches the listeners.
    pub fn start(&self) -> Option<EventSubscription<EthereumProvider>> {
        let manager = self.manager();

        let subscription = match manager.attach_events() {
            Ok(subscription) => Some(subscription),
            Err(e) if e.is_provider_missing() => None,
            Err(e) => {
                warn!("wallet: could not attach provider events: {}", e);
                None
            }
        };

        spawn_local(async move {
            match manager.restore().await {
                RestoreOutcome::Restored(address) => {
                    info!("wallet: session restored for {}", address.short_with(manager.config()))
                }
                other => debug!("wallet: restore finished: {:?}", other),
            }
        });

        subscription
    }

    /// Request a connection; `on_missing` runs if no wallet is installed.
    pub fn connect(&self, on_missing: impl FnOnce() + 'static) {
        let manager = self.manager();
        spawn_local(async move {
            match manager.connect().await {
                ConnectOutcome::Connected(_) | ConnectOutcome::Superseded => {}
                ConnectOutcome::Failed(e) if e.is_provider_missing() => on_missing(),
                ConnectOutcome::Failed(e) => debug!("wallet: connect failed: {}", e),
            }
        });
    }

    pub fn disconnect(&self) {
        let manager = self.manager();
        spawn_local(async move {
            let outcome = manager.disconnect().await;
            if !outcome.is_revoked() {
                warn!("wallet: provider still holds a grant; it will be re-requested on connect");
            }
        });
    }
}

impl Default for WalletHandle {
    fn default() -> Self {
        Self::new()
    }
}
