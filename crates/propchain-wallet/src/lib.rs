//! Wallet connection lifecycle for PropChain.
//!
//! This crate provides:
//! - [`WalletManager`] - connect, disconnect and auto-restore against an
//!   injected EIP-1193 provider
//! - [`EventSubscription`] - account/chain change reconciliation
//! - [`PersistenceBridge`] - localStorage mirror of the connection state
//! - [`Provider`], [`KeyValueStore`], [`Spawner`] - seams for the browser
//!   bindings in `browser` and the test doubles in `mock`

pub mod address;
pub mod browser;
pub mod chain;
pub mod config;
pub mod error;
mod lifecycle;
pub mod provider;
mod reconciler;
pub mod state;
pub mod storage;
pub mod task;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use address::{Address, format_address, is_valid_address};
pub use chain::{chain_name, format_chain_id, parse_chain_id};
pub use config::WalletConfig;
pub use error::WalletError;
pub use lifecycle::{
    ConnectOutcome, RestoreOutcome, RevocationMethod, RevocationOutcome, WalletManager,
};
pub use provider::{EventKind, Provider, ProviderEvent};
pub use reconciler::EventSubscription;
pub use state::{ConnectionState, ConnectionStatus};
pub use storage::{KeyValueStore, PersistedSnapshot, PersistenceBridge};
pub use task::Spawner;
