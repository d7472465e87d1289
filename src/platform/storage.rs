//! `localStorage`-backed key-value store

use wasm_bindgen::JsValue;

use crate::error::StoreError;
use crate::persistence::KeyValueStore;

pub struct LocalStore {
    storage: web_sys::Storage,
}

impl LocalStore {
    /// `None` when storage is disabled (private browsing, sandboxed iframe)
    pub fn open() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

fn rejected(op: &'static str, key: &str, err: JsValue) -> StoreError {
    StoreError::Rejected {
        op,
        key: key.to_string(),
        reason: err.as_string().unwrap_or_else(|| format!("{:?}", err)),
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| rejected("get", key, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| rejected("set", key, e))
    }
}
