//! Typed wrapper with automatic JSON serialization.

use crate::{KvBackend, KvError};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe store over a byte-level [`KvBackend`].
///
/// Values are encoded as JSON, so anything implementing `Serialize` and
/// `DeserializeOwned` can be stored. Decode failures surface as
/// [`KvError::Serialize`] so callers can decide their own corruption policy.
#[derive(Debug)]
pub struct Kv<B> {
    backend: B,
}

impl<B: KvBackend> Kv<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get a value by key.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value by key.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.set(key, &bytes)
    }

    /// Delete a value by key. No-op if the key is absent.
    pub fn delete(&self, key: &str) -> Result<(), KvError> {
        self.backend.delete(key)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: &str) -> Result<bool, KvError> {
        self.backend.exists(key)
    }
}
