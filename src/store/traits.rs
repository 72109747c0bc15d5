//! `KeyValueStore` trait — the only persistence the client needs.

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` if the key was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Returns whether anything was deleted.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;
}
