// SPDX-License-Identifier: MIT
//! Company policy store for the enterprise persona.
//!
//! Uploaded documents are split into fixed-size character chunks and
//! retrieved by naive word-overlap search. This is not a vector store;
//! it only has to surface a few plausible paragraphs for prompt context.

use tokio::sync::RwLock;

/// Chunk size in characters for uploaded documents.
const CHUNK_SIZE: usize = 500;

/// How many chunks a context query returns at most.
const TOP_K: usize = 2;

pub struct PolicyStore {
    chunks: RwLock<Vec<String>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self {
            chunks: RwLock::new(Vec::new()),
        }
    }

    /// Replace the stored chunks with a freshly chunked document.
    /// Returns the number of chunks indexed.
    pub async fn ingest(&self, text: &str) -> usize {
        let chars: Vec<char> = text.chars().collect();
        let chunks: Vec<String> = chars
            .chunks(CHUNK_SIZE)
            .map(|c| c.iter().collect())
            .collect();
        let count = chunks.len();
        *self.chunks.write().await = chunks;
        count
    }

    /// Retrieve up to [`TOP_K`] chunks sharing at least one word with the
    /// query, joined by newlines.
    pub async fn context_for(&self, query: &str) -> String {
        let chunks = self.chunks.read().await;
        if chunks.is_empty() {
            return "No policy documents found.".to_string();
        }

        let query_lower = query.to_lowercase();
        let words: Vec<&str> = query_lower.split_whitespace().collect();
        let matching: Vec<&String> = chunks
            .iter()
            .filter(|chunk| {
                let lower = chunk.to_lowercase();
                words.iter().any(|w| lower.contains(w))
            })
            .take(TOP_K)
            .collect();

        if matching.is_empty() {
            "No matching policies found.".to_string()
        } else {
            matching
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_store_reports_no_documents() {
        let store = PolicyStore::new();
        assert_eq!(store.context_for("anything").await, "No policy documents found.");
    }

    #[tokio::test]
    async fn ingest_chunks_long_documents() {
        let store = PolicyStore::new();
        let count = store.ingest(&"a".repeat(1200)).await;
        assert_eq!(count, 3);
    }

    #[tokio::test]
    async fn retrieval_matches_on_shared_words() {
        let store = PolicyStore::new();
        store
            .ingest("All database passwords must rotate quarterly.")
            .await;
        let ctx = store.context_for("how do database credentials rotate").await;
        assert!(ctx.contains("rotate quarterly"));
    }

    #[tokio::test]
    async fn no_overlap_reports_no_match() {
        let store = PolicyStore::new();
        store.ingest("Encryption required at rest.").await;
        assert_eq!(
            store.context_for("zzz qqq").await,
            "No matching policies found.".to_string()
        );
    }

    #[tokio::test]
    async fn reingest_replaces_previous_chunks() {
        let store = PolicyStore::new();
        store.ingest("old policy text").await;
        store.ingest("new policy text").await;
        let ctx = store.context_for("policy").await;
        assert!(ctx.contains("new"));
        assert!(!ctx.contains("old"));
    }
}
