//! Provider Adapter.
//!
//! A narrow capability set over an injected EIP-1193 provider: detection,
//! request/response, and event subscription. The lifecycle manager only
//! talks to this trait, so it can run against
//! [`FakeProvider`](crate::mock::FakeProvider) in tests and
//! `EthereumProvider` in the browser.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::error::WalletError;

/// RPC method names used by the lifecycle manager.
pub mod methods {
    /// Prompting account request.
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    /// Silent query of already-authorized accounts.
    pub const ACCOUNTS: &str = "eth_accounts";
    pub const CHAIN_ID: &str = "eth_chainId";
    pub const REVOKE_PERMISSIONS: &str = "wallet_revokePermissions";
    pub const REQUEST_PERMISSIONS: &str = "wallet_requestPermissions";

    /// Methods that must never show a prompt.
    pub fn is_silent(method: &str) -> bool {
        matches!(method, ACCOUNTS | CHAIN_ID)
    }
}

/// Provider-originated notifications the reconciler listens for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    AccountsChanged,
    ChainChanged,
}

impl EventKind {
    /// Event name as passed to `ethereum.on(...)`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccountsChanged => "accountsChanged",
            Self::ChainChanged => "chainChanged",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded event payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProviderEvent {
    /// New authorized account list; empty means access was revoked.
    AccountsChanged(Vec<String>),
    /// New chain id as a hex string.
    ChainChanged(String),
}

impl ProviderEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::AccountsChanged(_) => EventKind::AccountsChanged,
            Self::ChainChanged(_) => EventKind::ChainChanged,
        }
    }
}

/// Callback registered for provider events.
pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Handle returned by [`Provider::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Uniform request/subscribe surface over an injected wallet provider.
///
/// Implementations are single-threaded; futures need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Provider {
    /// True iff the host environment exposes the provider object.
    fn is_available(&self) -> bool;

    /// Forward a named RPC call.
    ///
    /// Fails with [`WalletError::ProviderUnavailable`] if no provider is
    /// present and [`WalletError::ProviderRejected`] if the provider
    /// returns an error, including user cancellation.
    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError>;

    /// Register a handler. No ordering guarantee between handlers.
    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, WalletError>;

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) -> Result<(), WalletError>;

    /// Drop every handler registered on the provider, ours included.
    fn clear_listeners(&self) -> Result<(), WalletError>;
}

/// Decode an account list from an `eth_accounts`-style response.
pub fn accounts_from_value(value: &Value) -> Result<Vec<String>, WalletError> {
    let Value::Array(items) = value else {
        return Err(WalletError::MalformedResponse(format!(
            "expected account list, got {}",
            value
        )));
    };

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                WalletError::MalformedResponse(format!("expected address string, got {}", item))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accounts_from_value() {
        let accounts = accounts_from_value(&json!(["0xabc", "0xdef"])).unwrap();
        assert_eq!(accounts, vec!["0xabc".to_string(), "0xdef".to_string()]);
        assert_eq!(accounts_from_value(&json!([])).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_accounts_from_value_rejects_wrong_shape() {
        assert!(accounts_from_value(&json!("0xabc")).is_err());
        assert!(accounts_from_value(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::AccountsChanged.as_str(), "accountsChanged");
        assert_eq!(EventKind::ChainChanged.to_string(), "chainChanged");
        assert_eq!(
            ProviderEvent::ChainChanged("0x1".into()).kind(),
            EventKind::ChainChanged
        );
    }

    #[test]
    fn test_silent_methods() {
        assert!(methods::is_silent(methods::ACCOUNTS));
        assert!(methods::is_silent(methods::CHAIN_ID));
        assert!(!methods::is_silent(methods::REQUEST_ACCOUNTS));
    }
}
