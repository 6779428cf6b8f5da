//! Browser bindings for the wallet seams.
//!
//! - [`EthereumProvider`] - EIP-1193 provider at `window.ethereum`
//! - [`LocalStorageStore`] - `window.localStorage`
//! - [`WasmSpawner`] - `wasm_bindgen_futures::spawn_local`

mod ethereum;
mod local_storage;

pub use ethereum::EthereumProvider;
pub use local_storage::LocalStorageStore;

use crate::task::{LocalTask, Spawner};

/// Spawns onto the browser microtask queue.
#[derive(Clone, Copy, Debug, Default)]
pub struct WasmSpawner;

impl Spawner for WasmSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

/// Best-effort message extraction from a thrown JS value.
///
/// EIP-1193 errors are objects carrying `message` and `code`.
pub(crate) fn js_error_message(err: &wasm_bindgen::JsValue) -> String {
    js_sys::Reflect::get(err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}
