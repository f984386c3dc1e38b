//! Persisted token storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session manager is the only writer. Layout matches what the backend
//! login flow has always produced in the browser:
//!
//! - `tokens`: full login response JSON
//! - `access`: raw access token
//! - `refresh`: raw refresh token
//!
//! TRADE-OFFS
//! ==========
//! Browser storage is best-effort: write failures (quota, private mode) are
//! swallowed so a failed persist degrades to "not logged in" on next check
//! rather than breaking the page.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::net::types::{LoginResponse, TokenPair};

pub const TOKENS_KEY: &str = "tokens";
pub const ACCESS_KEY: &str = "access";
pub const REFRESH_KEY: &str = "refresh";

/// Raw string key-value persistence.
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    fn clear(&self);
}

/// `window.localStorage`. Every call re-resolves the storage handle so the
/// type stays `Send + Sync` for Leptos context.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            None
        }
    }

    fn set_item(&self, key: &str, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(key, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
        }
    }

    fn remove_item(&self, key: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(key);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.clear();
            }
        }
    }
}

/// In-process storage shared between clones.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_items<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut items = self.items.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        f(&mut items)
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.with_items(|items| items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.with_items(|items| items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) {
        self.with_items(|items| {
            items.insert(key.to_owned(), value.to_owned());
        });
    }

    fn remove_item(&self, key: &str) {
        self.with_items(|items| {
            items.remove(key);
        });
    }

    fn clear(&self) {
        self.with_items(HashMap::clear);
    }
}

/// Typed view over a [`Storage`] backend holding the session tokens.
#[derive(Clone, Debug, Default)]
pub struct TokenStore<S> {
    storage: S,
}

impl<S: Storage> TokenStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn access(&self) -> Option<String> {
        self.storage.get_item(ACCESS_KEY).filter(|t| !t.is_empty())
    }

    pub fn refresh(&self) -> Option<String> {
        self.storage.get_item(REFRESH_KEY).filter(|t| !t.is_empty())
    }

    /// The persisted login response, if present and parseable.
    pub fn login_payload(&self) -> Option<LoginResponse> {
        let raw = self.storage.get_item(TOKENS_KEY)?;
        serde_json::from_str(&raw).ok()
    }

    /// Persist a fresh login: full payload plus both tokens.
    ///
    /// The body as received is stored when available; a payload built in
    /// code is serialized instead.
    pub fn store_login(&self, login: &LoginResponse) {
        match &login.raw {
            Some(raw) => self.storage.set_item(TOKENS_KEY, raw),
            None => {
                if let Ok(raw) = serde_json::to_string(login) {
                    self.storage.set_item(TOKENS_KEY, &raw);
                }
            }
        }
        self.storage.set_item(ACCESS_KEY, &login.access);
        self.storage.set_item(REFRESH_KEY, &login.refresh);
    }

    /// Overwrite both tokens. The `tokens` payload is left as-is.
    pub fn store_pair(&self, pair: &TokenPair) {
        self.storage.set_item(ACCESS_KEY, &pair.access);
        self.storage.set_item(REFRESH_KEY, &pair.refresh);
    }

    pub fn clear(&self) {
        self.storage.clear();
    }
}
