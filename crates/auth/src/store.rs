//! Secure key-value storage seam for session persistence

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

/// Storage key for the bearer token
pub const TOKEN_KEY: &str = "userToken";

/// Storage key for the cached user profile blob
pub const USER_KEY: &str = "userData";

/// Error reported by a [`SecureStore`] backend
#[derive(Error, Debug)]
#[error("secure store error: {0}")]
pub struct StoreError(pub String);

/// Durable, encrypted-at-rest string storage keyed by name.
///
/// Platform keychains (Keychain, Keystore, libsecret) implement this on the
/// application side. Reads and writes are atomic per key; the session manager
/// layers the joint token/user record discipline on top.
#[async_trait]
pub trait SecureStore: Send + Sync {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the value stored under `key`; removing an absent key is not an error
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory [`SecureStore`] for tests and platforms without a keychain
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
