use serde::Serialize;

use crate::address::Address;
use crate::chain::chain_name;
use crate::config::WalletConfig;

/// Connection status of the lifecycle state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Wallet connection state.
///
/// Owned by [`WalletManager`](crate::WalletManager); consumers only ever see
/// clones. `status == Connected` holds exactly when `account` is present.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionState {
    pub status: ConnectionStatus,
    pub account: Option<Address>,
    pub chain_id: Option<u64>,
    pub last_error: Option<String>,
    /// Set by an explicit disconnect, cleared only by a successful connect.
    pub user_disconnected: bool,
}

impl ConnectionState {
    /// Check if wallet is connected
    pub fn is_connected(&self) -> bool {
        self.status == ConnectionStatus::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.status == ConnectionStatus::Connecting
    }

    /// True after the user explicitly disconnected in this or a prior session.
    pub fn is_disconnected(&self) -> bool {
        self.user_disconnected
    }

    pub fn address(&self) -> Option<&Address> {
        self.account.as_ref()
    }

    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Network name for the current chain, if known.
    pub fn network_name(&self) -> Option<&'static str> {
        self.chain_id.map(chain_name)
    }

    /// Format account for display (0x1234...5678)
    pub fn display_name(&self) -> String {
        self.label(Address::short)
    }

    /// Like [`display_name`](Self::display_name) with the configured slice.
    pub fn display_name_with(&self, config: &WalletConfig) -> String {
        self.label(|address| address.short_with(config))
    }

    fn label(&self, short: impl FnOnce(&Address) -> String) -> String {
        match (self.status, &self.account) {
            (ConnectionStatus::Connected, Some(address)) => short(address),
            (ConnectionStatus::Connected, None) => "Connected".to_string(),
            (ConnectionStatus::Connecting, _) => "Connecting...".to_string(),
            (ConnectionStatus::Disconnected, _) => "Connect Wallet".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> ConnectionState {
        ConnectionState {
            status: ConnectionStatus::Connected,
            account: Some(Address::parse("0x1234567890123456789012345678901234567890").unwrap()),
            chain_id: Some(137),
            last_error: None,
            user_disconnected: false,
        }
    }

    #[test]
    fn test_default() {
        let state = ConnectionState::default();
        assert_eq!(state.status, ConnectionStatus::Disconnected);
        assert!(!state.is_connected());
        assert!(!state.is_disconnected());
        assert_eq!(state.address(), None);
        assert_eq!(state.display_name(), "Connect Wallet");
    }

    #[test]
    fn test_connecting_state() {
        let state = ConnectionState {
            status: ConnectionStatus::Connecting,
            ..Default::default()
        };
        assert!(state.is_connecting());
        assert!(!state.is_connected());
        assert_eq!(state.display_name(), "Connecting...");
    }

    #[test]
    fn test_connected_state() {
        let state = connected();
        assert!(state.is_connected());
        assert_eq!(state.chain_id(), Some(137));
        assert_eq!(state.network_name(), Some("Polygon"));
        assert_eq!(state.display_name(), "0x1234...7890");
    }

    #[test]
    fn test_display_name_with_configured_slice() {
        let config = WalletConfig {
            prefix_len: 8,
            suffix_len: 6,
            ..WalletConfig::default()
        };
        assert_eq!(connected().display_name_with(&config), "0x123456...567890");

        let idle = ConnectionState::default();
        assert_eq!(idle.display_name_with(&config), "Connect Wallet");
    }
}
