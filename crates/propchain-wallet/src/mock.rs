//! Test doubles for the provider, storage and spawner seams.
//!
//! All doubles are cheap `Clone` handles over shared state, so a test can
//! keep one copy for inspection after handing another to the manager.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use serde_json::{Value, json};

use crate::error::WalletError;
use crate::provider::{EventHandler, EventKind, ListenerId, Provider, ProviderEvent, methods};
use crate::storage::KeyValueStore;
use crate::task::{LocalTask, Spawner};

// ============================================================================
// Gate
// ============================================================================

#[derive(Default)]
struct GateState {
    open: bool,
    wakers: Vec<Waker>,
}

/// A future that stays pending until [`Gate::open`] is called.
#[derive(Clone, Default)]
pub struct Gate(Rc<RefCell<GateState>>);

impl Gate {
    pub fn open(&self) {
        let wakers = {
            let mut state = self.0.borrow_mut();
            state.open = true;
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }
}

impl Future for Gate {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let mut state = self.0.borrow_mut();
        if state.open {
            Poll::Ready(())
        } else {
            state.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}

// ============================================================================
// FakeProvider
// ============================================================================

struct FakeState {
    available: bool,
    responses: HashMap<String, Result<Value, String>>,
    gates: HashMap<String, Gate>,
    calls: Vec<(String, Option<Value>)>,
    listeners: Vec<(EventKind, ListenerId, EventHandler)>,
    next_listener: u64,
    clear_supported: bool,
}

/// Scriptable in-memory provider.
///
/// Unscripted methods are rejected, as a real provider rejects methods it
/// does not implement.
#[derive(Clone)]
pub struct FakeProvider {
    state: Rc<RefCell<FakeState>>,
}

impl FakeProvider {
    /// An injected provider with no scripted responses.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                available: true,
                responses: HashMap::new(),
                gates: HashMap::new(),
                calls: Vec::new(),
                listeners: Vec::new(),
                next_listener: 0,
                clear_supported: true,
            })),
        }
    }

    /// No provider injected into the page.
    pub fn missing() -> Self {
        let provider = Self::new();
        provider.set_available(false);
        provider
    }

    /// A provider that has authorized `accounts` on chain `chain_hex`.
    pub fn with_accounts(accounts: &[&str], chain_hex: &str) -> Self {
        let provider = Self::new();
        provider.respond(methods::REQUEST_ACCOUNTS, json!(accounts));
        provider.respond(methods::ACCOUNTS, json!(accounts));
        provider.respond(methods::CHAIN_ID, json!(chain_hex));
        provider
    }

    pub fn set_available(&self, available: bool) {
        self.state.borrow_mut().available = available;
    }

    pub fn respond(&self, method: &str, value: Value) {
        self.state
            .borrow_mut()
            .responses
            .insert(method.to_string(), Ok(value));
    }

    pub fn reject(&self, method: &str, message: &str) {
        self.state
            .borrow_mut()
            .responses
            .insert(method.to_string(), Err(message.to_string()));
    }

    /// Make calls to `method` wait until the returned gate is opened.
    pub fn hold(&self, method: &str) -> Gate {
        let gate = Gate::default();
        self.state
            .borrow_mut()
            .gates
            .insert(method.to_string(), gate.clone());
        gate
    }

    pub fn set_clear_supported(&self, supported: bool) {
        self.state.borrow_mut().clear_supported = supported;
    }

    /// Method names requested so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state
            .borrow()
            .calls
            .iter()
            .map(|(method, _)| method.clone())
            .collect()
    }

    pub fn last_params(&self, method: &str) -> Option<Value> {
        self.state
            .borrow()
            .calls
            .iter()
            .rev()
            .find(|(m, _)| m == method)
            .and_then(|(_, params)| params.clone())
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Deliver `event` to every handler subscribed to its kind.
    pub fn emit(&self, event: ProviderEvent) {
        let handlers: Vec<EventHandler> = self
            .state
            .borrow()
            .listeners
            .iter()
            .filter(|(kind, _, _)| *kind == event.kind())
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler(event.clone());
        }
    }
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for FakeProvider {
    fn is_available(&self) -> bool {
        self.state.borrow().available
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        let gate = {
            let mut state = self.state.borrow_mut();
            if !state.available {
                return Err(WalletError::ProviderUnavailable);
            }
            state.calls.push((method.to_string(), params));
            state.gates.get(method).cloned()
        };

        if let Some(gate) = gate {
            gate.await;
        }

        match self.state.borrow().responses.get(method) {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(message)) => Err(WalletError::ProviderRejected(message.clone())),
            None => Err(WalletError::ProviderRejected(format!(
                "The method \"{}\" does not exist / is not available.",
                method
            ))),
        }
    }

    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, WalletError> {
        let mut state = self.state.borrow_mut();
        if !state.available {
            return Err(WalletError::ProviderUnavailable);
        }
        state.next_listener += 1;
        let id = ListenerId(state.next_listener);
        state.listeners.push((kind, id, handler));
        Ok(id)
    }

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) -> Result<(), WalletError> {
        self.state
            .borrow_mut()
            .listeners
            .retain(|(k, i, _)| !(*k == kind && *i == id));
        Ok(())
    }

    fn clear_listeners(&self) -> Result<(), WalletError> {
        let mut state = self.state.borrow_mut();
        if !state.clear_supported {
            return Err(WalletError::Unsupported("removeAllListeners"));
        }
        state.listeners.clear();
        Ok(())
    }
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory [`KeyValueStore`] that can be switched into a failing mode.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    failing: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entry directly, bypassing the failure switch.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    /// Read an entry directly, bypassing the failure switch.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn check(&self) -> Result<(), WalletError> {
        if self.failing.get() {
            Err(WalletError::PersistenceUnavailable(
                "QuotaExceededError".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        self.check()?;
        Ok(self.value(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WalletError> {
        self.check()?;
        self.insert(key, value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), WalletError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// ============================================================================
// QueueSpawner
// ============================================================================

/// Collects spawned tasks so a test decides when they run.
#[derive(Clone, Default)]
pub struct QueueSpawner {
    tasks: Rc<RefCell<Vec<LocalTask>>>,
}

impl QueueSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run queued tasks to completion, including any they spawn.
    pub async fn run_pending(&self) {
        loop {
            let next = {
                let mut tasks = self.tasks.borrow_mut();
                if tasks.is_empty() {
                    None
                } else {
                    Some(tasks.remove(0))
                }
            };
            match next {
                Some(task) => task.await,
                None => break,
            }
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}
