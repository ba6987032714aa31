//! Persisted key-value store
//!
//! All durable state lives behind a small string-keyed port with a JSON
//! codec layered on top. Reads fall back to a caller-supplied default on
//! missing or corrupt data and writes are best-effort: a failed write is
//! logged, never propagated. There is no versioning or migration layer,
//! so every stored struct must remain backward-defaultable via serde
//! defaults.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Raw persistence port. Implementations are storage-technology-agnostic:
/// a directory of JSON files in production, a hash map in tests.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw serialized value for `key`, `None` when absent or
    /// unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Write the raw serialized value for `key`.
    fn write(&self, key: &str, raw: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed JSON facade over a [`KeyValueStore`] backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn KeyValueStore>,
}

impl Store {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Read and deserialize the value under `key`, returning `default`
    /// when the key is absent or holds data that no longer parses.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.backend.read(key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Discarding corrupt value for key '{}': {}", key, e);
                    default
                }
            },
            None => default,
        }
    }

    /// Serialize and persist `value` under `key`.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to serialize value for key '{}': {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.write(key, &raw) {
            tracing::error!("Failed to persist key '{}': {}", key, e);
        }
    }

    /// Remove the value under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            tracing::error!("Failed to remove key '{}': {}", key, e);
        }
    }
}
