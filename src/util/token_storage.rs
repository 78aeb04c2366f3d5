//! Session token persistence.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client reads the bearer token from here on every request and
//! clears the whole session (token, refresh token, cached user) when the
//! backend answers 401. In the browser this is `localStorage`; native tests
//! and server rendering use [`MemoryTokenStore`].

#[cfg(test)]
#[path = "token_storage_test.rs"]
mod token_storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

/// String key/value storage scoped to the current origin.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-process store for tests and server rendering.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// `window.localStorage`. Every operation is a no-op outside the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserTokenStore;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl TokenStore for BrowserTokenStore {
    fn get(&self, key: &str) -> Option<String> {
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

    fn set(&self, key: &str, value: &str) {
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

    fn remove(&self, key: &str) {
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
}

/// Stored bearer token, ignoring blank values.
pub fn bearer_token(store: &dyn TokenStore) -> Option<String> {
    store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())
}

/// Persist a freshly issued session.
pub fn store_session<U: Serialize>(store: &dyn TokenStore, token: &str, refresh_token: Option<&str>, user: &U) {
    store.set(TOKEN_KEY, token);
    match refresh_token {
        Some(refresh) => store.set(REFRESH_TOKEN_KEY, refresh),
        None => store.remove(REFRESH_TOKEN_KEY),
    }
    if let Ok(raw) = serde_json::to_string(user) {
        store.set(USER_KEY, &raw);
    }
}

/// Cached user profile, if present and decodable.
pub fn cached_user<U: DeserializeOwned>(store: &dyn TokenStore) -> Option<U> {
    let raw = store.get(USER_KEY)?;
    serde_json::from_str(&raw).ok()
}

/// Drop every session key. Navigation is left to the caller.
pub fn clear_session(store: &dyn TokenStore) {
    store.remove(TOKEN_KEY);
    store.remove(REFRESH_TOKEN_KEY);
    store.remove(USER_KEY);
}
