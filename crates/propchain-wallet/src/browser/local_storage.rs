use web_sys::Storage;

use super::js_error_message;
use crate::error::WalletError;
use crate::storage::KeyValueStore;

/// [`KeyValueStore`] over the origin's localStorage.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

fn local_storage() -> Result<Storage, WalletError> {
    let window = web_sys::window()
        .ok_or_else(|| WalletError::PersistenceUnavailable("no window".to_string()))?;
    window
        .local_storage()
        .map_err(|e| WalletError::PersistenceUnavailable(js_error_message(&e)))?
        .ok_or_else(|| WalletError::PersistenceUnavailable("localStorage not available".to_string()))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, WalletError> {
        local_storage()?
            .get_item(key)
            .map_err(|e| WalletError::PersistenceUnavailable(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), WalletError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|e| WalletError::PersistenceUnavailable(js_error_message(&e)))
    }

    fn remove(&self, key: &str) -> Result<(), WalletError> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| WalletError::PersistenceUnavailable(js_error_message(&e)))
    }
}
