//! EIP-1193 provider binding.
//!
//! Talks to `window.ethereum` through the Reflect API. The object is looked
//! up on every call since extensions may inject it after page load.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Array, Function, Object, Promise, Reflect};
use log::warn;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::js_error_message;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::provider::{EventHandler, EventKind, ListenerId, Provider, ProviderEvent, methods};

/// Get the window.ethereum object injected by the wallet extension.
fn get_ethereum() -> Result<Object, WalletError> {
    let window = web_sys::window().ok_or(WalletError::ProviderUnavailable)?;
    Reflect::get(&window, &"ethereum".into())
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .ok_or(WalletError::ProviderUnavailable)
}

fn get_function(target: &Object, name: &'static str) -> Result<Function, WalletError> {
    Reflect::get(target, &name.into())
        .ok()
        .and_then(|v| v.dyn_into::<Function>().ok())
        .ok_or(WalletError::Unsupported(name))
}

/// Result of a promise race with timeout.
enum RaceResult {
    Completed(JsValue),
    TimedOut,
    Error(JsValue),
}

/// Race a promise against a timeout using `Promise.race`.
async fn race_with_timeout(promise: Promise, timeout_ms: i32) -> RaceResult {
    let Some(window) = web_sys::window() else {
        return RaceResult::Error("Window not available".into());
    };

    // Resolves to undefined when the timer fires
    let timeout_promise = Promise::new(&mut |resolve, _| {
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, timeout_ms);
    });

    let race_array = Array::new();
    race_array.push(&promise);
    race_array.push(&timeout_promise);

    match JsFuture::from(Promise::race(&race_array)).await {
        Ok(result) if result.is_undefined() => RaceResult::TimedOut,
        Ok(result) => RaceResult::Completed(result),
        Err(e) => RaceResult::Error(e),
    }
}

fn decode_event(kind: EventKind, payload: &JsValue) -> Option<ProviderEvent> {
    match kind {
        EventKind::AccountsChanged => serde_wasm_bindgen::from_value::<Vec<String>>(payload.clone())
            .ok()
            .map(ProviderEvent::AccountsChanged),
        EventKind::ChainChanged => payload.as_string().map(ProviderEvent::ChainChanged),
    }
}

struct Registered {
    kind: EventKind,
    closure: Closure<dyn Fn(JsValue)>,
}

/// [`Provider`] over the injected `window.ethereum` object.
///
/// Registered closures are kept alive here, not leaked, so the same function
/// reference can be handed back to `removeListener`.
pub struct EthereumProvider {
    silent_timeout_ms: i32,
    listeners: RefCell<HashMap<ListenerId, Registered>>,
    next_listener: Cell<u64>,
}

impl EthereumProvider {
    pub fn new(config: &WalletConfig) -> Self {
        Self {
            silent_timeout_ms: config.silent_probe_timeout_ms,
            listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(0),
        }
    }

    /// Helper to call ethereum.request({ method, params })
    fn start_request(&self, method: &str, params: Option<&Value>) -> Result<Promise, WalletError> {
        let ethereum = get_ethereum()?;

        let args = Object::new();
        Reflect::set(&args, &"method".into(), &method.into())
            .map_err(|_| WalletError::Unsupported("request"))?;
        if let Some(params) = params {
            let js_params = params
                .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(|e| WalletError::MalformedResponse(e.to_string()))?;
            Reflect::set(&args, &"params".into(), &js_params)
                .map_err(|_| WalletError::Unsupported("request"))?;
        }

        let request = get_function(&ethereum, "request")?;
        let promise = request
            .call1(&ethereum, &args)
            .map_err(|e| WalletError::ProviderRejected(js_error_message(&e)))?;
        Ok(promise.into())
    }
}

impl Provider for EthereumProvider {
    fn is_available(&self) -> bool {
        get_ethereum().is_ok()
    }

    async fn request(&self, method: &str, params: Option<Value>) -> Result<Value, WalletError> {
        let promise = self.start_request(method, params.as_ref())?;

        let result = if methods::is_silent(method) {
            match race_with_timeout(promise, self.silent_timeout_ms).await {
                RaceResult::Completed(value) => value,
                RaceResult::TimedOut => {
                    return Err(WalletError::ProviderRejected(format!("{} timed out", method)));
                }
                RaceResult::Error(e) => {
                    return Err(WalletError::ProviderRejected(js_error_message(&e)));
                }
            }
        } else {
            JsFuture::from(promise)
                .await
                .map_err(|e| WalletError::ProviderRejected(js_error_message(&e)))?
        };

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| WalletError::MalformedResponse(e.to_string()))
    }

    fn subscribe(&self, kind: EventKind, handler: EventHandler) -> Result<ListenerId, WalletError> {
        let ethereum = get_ethereum()?;
        let on = get_function(&ethereum, "on")?;

        let closure = Closure::wrap(Box::new(move |payload: JsValue| {
            match decode_event(kind, &payload) {
                Some(event) => handler(event),
                None => warn!("wallet: undecodable {} payload: {:?}", kind, payload),
            }
        }) as Box<dyn Fn(JsValue)>);

        on.call2(&ethereum, &kind.as_str().into(), closure.as_ref())
            .map_err(|e| WalletError::ProviderRejected(js_error_message(&e)))?;

        let id = ListenerId(self.next_listener.get() + 1);
        self.next_listener.set(id.0);
        self.listeners
            .borrow_mut()
            .insert(id, Registered { kind, closure });
        Ok(id)
    }

    fn unsubscribe(&self, kind: EventKind, id: ListenerId) -> Result<(), WalletError> {
        let Some(registered) = self.listeners.borrow_mut().remove(&id) else {
            return Ok(());
        };
        debug_assert_eq!(registered.kind, kind);

        let removed = get_ethereum().and_then(|ethereum| {
            let remove = get_function(&ethereum, "removeListener")?;
            remove
                .call2(&ethereum, &kind.as_str().into(), registered.closure.as_ref())
                .map_err(|e| WalletError::ProviderRejected(js_error_message(&e)))
        });

        if let Err(e) = removed {
            // The provider may still call it; it must outlive this handle.
            registered.closure.forget();
            return Err(e);
        }
        Ok(())
    }

    fn clear_listeners(&self) -> Result<(), WalletError> {
        let ethereum = get_ethereum()?;
        let remove_all = get_function(&ethereum, "removeAllListeners")?;
        remove_all
            .call0(&ethereum)
            .map_err(|e| WalletError::ProviderRejected(js_error_message(&e)))?;
        self.listeners.borrow_mut().clear();
        Ok(())
    }
}
