// SPDX-License-Identifier: MIT
//! Per-user snippet library. Append-only over the store seam; never
//! indexed or deduplicated.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::store::KeyListStore;

/// A saved code snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique snippet id (UUID v4).
    pub id: String,
    pub title: String,
    pub code: String,
    pub language: String,
    /// ISO-8601 timestamp when the snippet was saved.
    pub created_at: String,
}

/// Snippet collection facade over an injected store.
pub struct SnippetLibrary {
    store: Arc<dyn KeyListStore<Snippet>>,
}

impl SnippetLibrary {
    pub fn new(store: Arc<dyn KeyListStore<Snippet>>) -> Self {
        Self { store }
    }

    /// Save a snippet for `username` and return the stored record.
    pub async fn save(
        &self,
        username: &str,
        title: &str,
        code: &str,
        language: &str,
    ) -> Snippet {
        let snippet = Snippet {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            code: code.to_string(),
            language: language.to_string(),
            created_at: Utc::now().to_rfc3339(),
        };
        self.store.append(username, snippet.clone()).await;
        snippet
    }

    pub async fn list(&self, username: &str) -> Vec<Snippet> {
        self.store.get(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn library() -> SnippetLibrary {
        SnippetLibrary::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn save_assigns_unique_ids() {
        let lib = library();
        let a = lib.save("admin", "one", "print(1)", "python").await;
        let b = lib.save("admin", "two", "print(2)", "python").await;
        assert_ne!(a.id, b.id);
        assert_eq!(lib.list("admin").await.len(), 2);
    }

    #[tokio::test]
    async fn lists_are_per_user() {
        let lib = library();
        lib.save("admin", "one", "x", "rust").await;
        assert!(lib.list("student1").await.is_empty());
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        // No deduplication by design.
        let lib = library();
        lib.save("admin", "same", "x", "rust").await;
        lib.save("admin", "same", "x", "rust").await;
        assert_eq!(lib.list("admin").await.len(), 2);
    }
}
