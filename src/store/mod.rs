// SPDX-License-Identifier: MIT
//! Key-to-list store abstraction.
//!
//! Snippets, history, and analytics are all "append a record to a per-user
//! list" collections. Handlers depend on this trait rather than a concrete
//! map so a future swap to a real database does not touch handler logic.
//! The only implementation today is [`MemoryStore`]: process-lifetime,
//! no eviction, no capacity bound.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A named collection of per-key append-only lists.
#[async_trait]
pub trait KeyListStore<T: Clone + Send + Sync + 'static>: Send + Sync {
    /// Records under `key`, empty when the key has never been written.
    async fn get(&self, key: &str) -> Vec<T>;

    /// Append one record to the list under `key`, creating it if absent.
    /// Returns the new list length.
    async fn append(&self, key: &str, value: T) -> usize;

    /// Replace the whole list under `key`.
    async fn put(&self, key: &str, values: Vec<T>);

    /// Remove the list under `key`. Removing an absent key is a no-op.
    async fn delete(&self, key: &str);

    /// All keys currently present.
    async fn keys(&self) -> Vec<String>;
}

/// In-memory [`KeyListStore`] backed by a `RwLock<HashMap>`.
pub struct MemoryStore<T> {
    inner: RwLock<HashMap<String, Vec<T>>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> KeyListStore<T> for MemoryStore<T> {
    async fn get(&self, key: &str) -> Vec<T> {
        self.inner.read().await.get(key).cloned().unwrap_or_default()
    }

    async fn append(&self, key: &str, value: T) -> usize {
        let mut guard = self.inner.write().await;
        let list = guard.entry(key.to_string()).or_default();
        list.push(value);
        list.len()
    }

    async fn put(&self, key: &str, values: Vec<T>) {
        self.inner.write().await.insert(key.to_string(), values);
    }

    async fn delete(&self, key: &str) {
        self.inner.write().await.remove(key);
    }

    async fn keys(&self) -> Vec<String> {
        self.inner.read().await.keys().cloned().collect()
    }
}
