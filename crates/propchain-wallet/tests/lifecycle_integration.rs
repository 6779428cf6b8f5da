//! End-to-end lifecycle scenarios against the mock provider and store,
//! including simulated page reloads (a fresh manager over the same store).

use propchain_wallet::mock::{FakeProvider, MemoryStore, QueueSpawner};
use propchain_wallet::provider::methods;
use propchain_wallet::{
    ConnectOutcome, ConnectionStatus, PersistedSnapshot, PersistenceBridge, ProviderEvent,
    RestoreOutcome, WalletConfig, WalletManager, format_address,
};
use serde_json::json;

const ADDR: &str = "0x1234567890abcdef1234567890abcdef12345678";
const SECOND: &str = "0x00000000000000000000000000000000000000aa";

type Wallet = WalletManager<FakeProvider, MemoryStore>;

/// One page load: a new manager over whatever the provider and store hold.
fn page_load(provider: &FakeProvider, store: &MemoryStore) -> Wallet {
    WalletManager::new(
        provider.clone(),
        store.clone(),
        QueueSpawner::new(),
        WalletConfig::default(),
    )
}

fn persisted(store: &MemoryStore) -> PersistedSnapshot {
    PersistenceBridge::new(store.clone(), WalletConfig::default().keys).load()
}

#[tokio::test]
async fn connect_success_matches_persisted_snapshot() {
    let provider = FakeProvider::with_accounts(&[ADDR, SECOND], "0x1");
    let store = MemoryStore::new();
    let wallet = page_load(&provider, &store);

    assert!(matches!(wallet.connect().await, ConnectOutcome::Connected(_)));

    let state = wallet.state();
    assert_eq!(state.status, ConnectionStatus::Connected);
    assert_eq!(state.account.as_ref().map(|a| a.as_str()), Some(ADDR));
    assert!(!state.user_disconnected);
    assert_eq!(persisted(&store), PersistedSnapshot::from_state(&state));
}

#[tokio::test]
async fn connect_without_provider_only_sets_error() {
    let provider = FakeProvider::missing();
    let store = MemoryStore::new();
    let wallet = page_load(&provider, &store);
    let before = wallet.state();

    wallet.connect().await;

    let after = wallet.state();
    assert_eq!(after.status, ConnectionStatus::Disconnected);
    assert!(after.last_error.is_some());
    assert_eq!(
        propchain_wallet::ConnectionState {
            last_error: None,
            ..after
        },
        before
    );
}

#[tokio::test]
async fn disconnect_twice_equals_disconnect_once() {
    let provider = FakeProvider::with_accounts(&[ADDR], "0x1");
    let store = MemoryStore::new();

    let once = page_load(&provider, &store);
    once.connect().await;
    once.disconnect().await;

    let twice_store = MemoryStore::new();
    let twice = page_load(&provider, &twice_store);
    twice.connect().await;
    twice.disconnect().await;
    twice.disconnect().await;

    assert_eq!(once.state(), twice.state());
    assert_eq!(persisted(&store), persisted(&twice_store));
}

#[tokio::test]
async fn reload_after_connect_restores_without_prompt() {
    let provider = FakeProvider::with_accounts(&[ADDR], "0xaa36a7");
    let store = MemoryStore::new();

    let first = page_load(&provider, &store);
    first.connect().await;
    let connected = first.state();
    drop(first);

    let prompts_before = count(&provider, methods::REQUEST_ACCOUNTS);
    let reloaded = page_load(&provider, &store);
    assert!(matches!(reloaded.restore().await, RestoreOutcome::Restored(_)));

    assert_eq!(reloaded.state().status, ConnectionStatus::Connected);
    assert_eq!(reloaded.state().account, connected.account);
    assert_eq!(count(&provider, methods::REQUEST_ACCOUNTS), prompts_before);
}

#[tokio::test]
async fn reload_after_disconnect_stays_disconnected_until_connect() {
    let provider = FakeProvider::with_accounts(&[ADDR], "0x1");
    provider.respond(methods::REVOKE_PERMISSIONS, json!(null));
    let store = MemoryStore::new();

    let first = page_load(&provider, &store);
    first.connect().await;
    first.disconnect().await;

    // The provider still reports the account as authorized.
    let reloaded = page_load(&provider, &store);
    assert_eq!(reloaded.restore().await, RestoreOutcome::OptedOut);
    assert!(!reloaded.state().is_connected());
    assert!(reloaded.state().is_disconnected());

    // Only an explicit connect lifts the opt-out, for this and later loads.
    reloaded.connect().await;
    assert!(reloaded.state().is_connected());

    let later = page_load(&provider, &store);
    assert!(matches!(later.restore().await, RestoreOutcome::Restored(_)));
}

#[tokio::test]
async fn provider_revocation_event_disconnects() {
    let provider = FakeProvider::with_accounts(&[ADDR], "0x1");
    let store = MemoryStore::new();
    let wallet = page_load(&provider, &store);
    let subscription = wallet.attach_events().expect("provider is injected");
    wallet.connect().await;

    provider.emit(ProviderEvent::AccountsChanged(Vec::new()));

    let state = wallet.state();
    assert_eq!(state.status, ConnectionStatus::Disconnected);
    assert!(state.user_disconnected);
    assert!(persisted(&store).user_disconnected);

    subscription.detach();
    assert_eq!(provider.listener_count(), 0);
}

#[test]
fn format_address_default_slicing() {
    assert_eq!(
        format_address("0x1234567890abcdef1234567890abcdef12345678", 6, 4),
        "0x1234...5678"
    );
    assert_eq!(format_address("0x12345678", 6, 4), "0x12345678");
}

fn count(provider: &FakeProvider, method: &str) -> usize {
    provider.calls().iter().filter(|m| *m == method).count()
}
