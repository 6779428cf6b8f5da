//! Persistence Bridge.
//!
//! Mirrors the connection state into a durable key/value store (browser
//! localStorage in production) and reads it back once at startup.
//!
//! Layout: `connected` / `account` / `chain_id` are rewritten on every
//! transition; the `disconnected` flag is owned by explicit
//! disconnect/connect. Absent keys read as defaults. A failed write puts
//! the bridge into in-memory-only mode for the rest of the session.

use std::cell::Cell;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::chain::format_chain_id;
use crate::config::StorageKeys;
use crate::error::WalletError;
use crate::state::ConnectionState;

const TRUE: &str = "true";

/// String key/value storage scoped to the page origin.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError>;
    fn set(&self, key: &str, value: &str) -> Result<(), WalletError>;
    fn remove(&self, key: &str) -> Result<(), WalletError>;
}

/// Durable mirror of a subset of [`ConnectionState`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    pub connected: bool,
    pub account: Option<String>,
    /// Hex string, as the provider reports it.
    pub chain_id: Option<String>,
    pub user_disconnected: bool,
}

impl PersistedSnapshot {
    pub fn from_state(state: &ConnectionState) -> Self {
        Self {
            connected: state.is_connected(),
            account: state.account.as_ref().map(|a| a.to_string()),
            chain_id: state.chain_id.map(format_chain_id),
            user_disconnected: state.user_disconnected,
        }
    }
}

pub struct PersistenceBridge<S> {
    store: S,
    keys: StorageKeys,
    degraded: Cell<bool>,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            degraded: Cell::new(false),
        }
    }

    /// True once a write has failed; storage is no longer touched.
    pub fn is_degraded(&self) -> bool {
        self.degraded.get()
    }

    /// Read the persisted snapshot. Failures read as the default snapshot.
    pub fn load(&self) -> PersistedSnapshot {
        if self.is_degraded() {
            return PersistedSnapshot::default();
        }

        match self.read_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("wallet: failed to read persisted state: {}", e);
                PersistedSnapshot::default()
            }
        }
    }

    fn read_snapshot(&self) -> Result<PersistedSnapshot, WalletError> {
        let flag = |key: &str| -> Result<bool, WalletError> {
            Ok(self.store.get(key)?.as_deref() == Some(TRUE))
        };

        Ok(PersistedSnapshot {
            connected: flag(&self.keys.connected)?,
            account: self.store.get(&self.keys.account)?,
            chain_id: self.store.get(&self.keys.chain_id)?,
            user_disconnected: flag(&self.keys.disconnected)?,
        })
    }

    /// Write the connected flag, account and chain id for `state`.
    pub fn save(&self, state: &ConnectionState) {
        let snapshot = PersistedSnapshot::from_state(state);
        self.write(|store, keys| {
            if !snapshot.connected {
                store.remove(&keys.connected)?;
                store.remove(&keys.account)?;
                return store.remove(&keys.chain_id);
            }

            store.set(&keys.connected, TRUE)?;
            match &snapshot.account {
                Some(account) => store.set(&keys.account, account)?,
                None => store.remove(&keys.account)?,
            }
            match &snapshot.chain_id {
                Some(chain_id) => store.set(&keys.chain_id, chain_id),
                None => store.remove(&keys.chain_id),
            }
        });
    }

    /// Record an explicit disconnect so later page loads skip auto-restore.
    pub fn mark_disconnected(&self) {
        self.write(|store, keys| store.set(&keys.disconnected, TRUE));
    }

    pub fn clear_disconnected(&self) {
        self.write(|store, keys| store.remove(&keys.disconnected));
    }

    fn write(&self, op: impl FnOnce(&S, &StorageKeys) -> Result<(), WalletError>) {
        if self.is_degraded() {
            return;
        }

        if let Err(e) = op(&self.store, &self.keys) {
            warn!(
                "wallet: persistence disabled for this session ({}); state is kept in memory only",
                e
            );
            self.degraded.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::Address;
    use crate::mock::MemoryStore;
    use crate::state::ConnectionStatus;

    const ADDR: &str = "0x1234567890abcdef1234567890abcdef12345678";

    fn bridge(store: &MemoryStore) -> PersistenceBridge<MemoryStore> {
        PersistenceBridge::new(store.clone(), StorageKeys::default())
    }

    fn connected_state() -> ConnectionState {
        ConnectionState {
            status: ConnectionStatus::Connected,
            account: Some(Address::parse(ADDR).unwrap()),
            chain_id: Some(11155111),
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_keys_read_as_defaults() {
        let store = MemoryStore::new();
        assert_eq!(bridge(&store).load(), PersistedSnapshot::default());
    }

    #[test]
    fn test_save_connected_layout() {
        let store = MemoryStore::new();
        let bridge = bridge(&store);
        bridge.save(&connected_state());

        assert_eq!(store.value("walletConnected").as_deref(), Some("true"));
        assert_eq!(store.value("walletAddress").as_deref(), Some(ADDR));
        assert_eq!(store.value("chainId").as_deref(), Some("0xaa36a7"));

        let snapshot = bridge.load();
        assert!(snapshot.connected);
        assert_eq!(snapshot.account.as_deref(), Some(ADDR));
        assert_eq!(snapshot.chain_id.as_deref(), Some("0xaa36a7"));
        assert!(!snapshot.user_disconnected);
    }

    #[test]
    fn test_save_disconnected_clears_keys() {
        let store = MemoryStore::new();
        let bridge = bridge(&store);
        bridge.save(&connected_state());
        bridge.save(&ConnectionState::default());

        assert_eq!(store.value("walletConnected"), None);
        assert_eq!(store.value("walletAddress"), None);
        assert_eq!(store.value("chainId"), None);
    }

    #[test]
    fn test_disconnect_flag() {
        let store = MemoryStore::new();
        let bridge = bridge(&store);

        bridge.mark_disconnected();
        assert!(bridge.load().user_disconnected);
        assert_eq!(store.value("walletDisconnected").as_deref(), Some("true"));

        bridge.clear_disconnected();
        assert!(!bridge.load().user_disconnected);
    }

    #[test]
    fn test_failed_write_degrades_to_memory() {
        let store = MemoryStore::new();
        let bridge = bridge(&store);
        store.set_failing(true);

        bridge.save(&connected_state());
        assert!(bridge.is_degraded());

        // Storage recovers, but the bridge stays out of it for the session.
        store.set_failing(false);
        bridge.mark_disconnected();
        assert_eq!(store.value("walletDisconnected"), None);
        assert_eq!(bridge.load(), PersistedSnapshot::default());
    }

    #[test]
    fn test_failed_read_yields_default() {
        let store = MemoryStore::new();
        store.insert("walletDisconnected", "true");
        store.set_failing(true);
        assert_eq!(bridge(&store).load(), PersistedSnapshot::default());
    }
}
