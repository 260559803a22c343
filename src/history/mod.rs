// SPDX-License-Identifier: MIT
//! Per-user version history. Every pipeline action appends one entry;
//! the list grows without bound for the process lifetime.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::store::KeyListStore;

/// One recorded action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based version number, the length of the user's list at insert.
    pub version: usize,
    /// Action name, e.g. "review", "rewrite".
    pub action: String,
    /// ISO-8601 timestamp.
    pub created_at: String,
}

/// History facade over an injected store.
pub struct VersionHistory {
    store: Arc<dyn KeyListStore<HistoryEntry>>,
}

impl VersionHistory {
    pub fn new(store: Arc<dyn KeyListStore<HistoryEntry>>) -> Self {
        Self { store }
    }

    /// Record an action for `username` and return the assigned version.
    pub async fn record(&self, username: &str, action: &str) -> usize {
        // The version is the post-append length; append returns it so the
        // entry and list length cannot drift apart.
        let current = self.store.get(username).await.len();
        let entry = HistoryEntry {
            version: current + 1,
            action: action.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.store.append(username, entry).await
    }

    pub async fn list(&self, username: &str) -> Vec<HistoryEntry> {
        self.store.get(username).await
    }
}
