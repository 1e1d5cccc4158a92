//! `window.localStorage` backend.
//! Persistent across page reloads; synchronous, string values only.

use wasm_bindgen::JsValue;
use web_sys::Storage;

use chat_core::ports::StoragePort;
use chat_types::{ChatError, Result};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    /// Open the origin's local storage. Fails when there is no window or
    /// the browser denies access (private mode, disabled storage).
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| ChatError::Storage("No window object".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| ChatError::Storage("localStorage not available".to_string()))?;

        Ok(Self { storage })
    }
}

impl StoragePort for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        // Throws QuotaExceededError when the origin is out of space
        self.storage.set_item(key, value).map_err(js_error)
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.storage.remove_item(key).map_err(js_error)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}

fn js_error(e: JsValue) -> ChatError {
    ChatError::JsInterop(format!("{:?}", e))
}
