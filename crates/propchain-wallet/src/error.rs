//! Error taxonomy for the wallet lifecycle.
//!
//! Every lifecycle operation catches these at its boundary and folds the
//! message into [`ConnectionState::last_error`](crate::ConnectionState);
//! nothing here is fatal to the page.

use thiserror::Error;

/// Wallet-related errors for EIP-1193 provider integration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No wallet extension detected; the caller should prompt installation.
    #[error("MetaMask is not installed. Please install MetaMask to continue.")]
    ProviderMissing,
    /// A provider call was attempted while no provider is injected.
    #[error("Wallet provider is not available")]
    ProviderUnavailable,
    /// The user declined, or the provider answered with an RPC error.
    #[error("{0}")]
    ProviderRejected(String),
    /// The request succeeded but granted no accounts.
    #[error("No account returned from wallet")]
    EmptyAccountSet,
    /// Durable storage could not be read or written.
    #[error("Storage unavailable: {0}")]
    PersistenceUnavailable(String),
    /// The provider returned something that is not a `0x` + 40 hex address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    /// The provider returned an unparseable chain id.
    #[error("Invalid chain id: {0}")]
    InvalidChainId(String),
    /// The provider returned a payload of the wrong shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
    /// The provider does not implement the requested capability.
    #[error("Unsupported by provider: {0}")]
    Unsupported(&'static str),
}

impl WalletError {
    /// True for errors the UI answers by prompting a wallet install.
    pub fn is_provider_missing(&self) -> bool {
        matches!(self, Self::ProviderMissing | Self::ProviderUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_message_is_passed_through() {
        let err = WalletError::ProviderRejected("User rejected the request.".to_string());
        assert_eq!(err.to_string(), "User rejected the request.");
    }

    #[test]
    fn test_provider_missing_message() {
        assert_eq!(
            WalletError::ProviderMissing.to_string(),
            "MetaMask is not installed. Please install MetaMask to continue."
        );
        assert!(WalletError::ProviderMissing.is_provider_missing());
        assert!(!WalletError::EmptyAccountSet.is_provider_missing());
    }
}
